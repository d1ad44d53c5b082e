//! Relative level/heading bookkeeping for sub-procedures.
//!
//! Row mining and wall scanning must hand control back at ground level with
//! the original heading. A [`Pose`] records how far a procedure has climbed
//! and turned so it can be unwound exactly, including after a failure.

use crate::core::types::Turn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pose {
    raised: u32,
    /// Net quarter turns, right positive, normalized to `-1..=2`.
    quarter_turns: i32,
}

impl Pose {
    pub fn ground() -> Self {
        Self::default()
    }

    /// Levels above ground.
    pub fn raised(&self) -> u32 {
        self.raised
    }

    /// 1-based level within the tunnel height.
    pub fn level(&self) -> u32 {
        self.raised + 1
    }

    pub fn quarter_turns(&self) -> i32 {
        self.quarter_turns
    }

    pub fn rise(&mut self) {
        self.raised += 1;
    }

    pub fn lower(&mut self) {
        self.raised = self.raised.saturating_sub(1);
    }

    pub fn turn(&mut self, turn: Turn) {
        let delta = match turn {
            Turn::Right => 1,
            Turn::Left => -1,
        };
        self.quarter_turns = match (self.quarter_turns + delta).rem_euclid(4) {
            3 => -1,
            normalized => normalized,
        };
    }

    /// Turns that bring the heading back to where the procedure started.
    pub fn unwind_turns(&self) -> Vec<Turn> {
        let net = if self.quarter_turns > 0 {
            Turn::Right
        } else {
            Turn::Left
        };
        vec![net.reversed(); self.quarter_turns.unsigned_abs() as usize]
    }

    pub fn is_home(&self) -> bool {
        self.raised == 0 && self.quarter_turns == 0
    }
}
