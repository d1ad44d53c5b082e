//! Obstacle-tolerant movement.
//!
//! Plain movement only ever digs through collapsing fill. A stable material in
//! the way is a permanent wall as far as movement is concerned and reports
//! [`Failure::Blocked`]; widening the tunnel is the job of the mining
//! procedures, not of movement.

use tracing::{debug, warn};

use crate::core::catalog::Catalog;
use crate::core::pose::Pose;
use crate::core::types::{Failure, Motion, Stride, Target, Turn};
use crate::excavate::mine_cell;
use crate::io::actuator::Actuator;

/// Move one cell forward or back, clearing unstable fill on the way.
///
/// `clear_limit` caps the digs spent on one cell of collapsing material.
/// Heading is unchanged on return, whatever the outcome.
pub fn travel<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    clear_limit: u32,
    stride: Stride,
) -> Result<(), Failure> {
    match stride {
        Stride::Forward => advance(act, catalog, clear_limit),
        Stride::Back => back_off(act, catalog, clear_limit),
    }
}

fn advance<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    clear_limit: u32,
) -> Result<(), Failure> {
    if act.travel(Motion::Forward) {
        return Ok(());
    }
    let cleared = clear_unstable_ahead(act, catalog, clear_limit)?;
    if act.travel(Motion::Forward) {
        debug!(cleared, "advanced after clearing fill");
        return Ok(());
    }
    debug!(cleared, "cell ahead is clear but forward move failed");
    Err(Failure::Blocked)
}

/// Dig unstable material ahead until the cell stays empty.
fn clear_unstable_ahead<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    clear_limit: u32,
) -> Result<u32, Failure> {
    let mut cleared = 0;
    while let Some(material) = act.inspect(Target::Ahead) {
        if !catalog.is_unstable(&material) {
            debug!(%material, "stable obstruction ahead");
            return Err(Failure::Blocked);
        }
        if cleared == clear_limit {
            warn!(%material, clear_limit, "fill kept collapsing into the cell ahead");
            return Err(Failure::StuckClearing { limit: clear_limit });
        }
        if !act.dig(Target::Ahead) {
            warn!(%material, "could not dig unstable fill");
            return Err(Failure::Blocked);
        }
        cleared += 1;
    }
    Ok(cleared)
}

/// Step back; when that is refused, turn around and advance instead.
fn back_off<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    clear_limit: u32,
) -> Result<(), Failure> {
    if act.travel(Motion::Back) {
        return Ok(());
    }
    debug!("back step refused, turning around");
    act.turn(Turn::Right);
    act.turn(Turn::Right);
    let result = advance(act, catalog, clear_limit);
    act.turn(Turn::Left);
    act.turn(Turn::Left);
    result
}

/// Climb one level inside the tunnel column.
///
/// If the cell above is occupied it is mined under the inventory policy and
/// the climb retried once.
pub fn rise<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    pose: &mut Pose,
) -> Result<(), Failure> {
    if !act.travel(Motion::Up) {
        if act.inspect(Target::Above).is_none() {
            return Err(Failure::Blocked);
        }
        mine_cell(act, catalog, Target::Above)?;
        if !act.travel(Motion::Up) {
            return Err(Failure::Blocked);
        }
    }
    pose.rise();
    Ok(())
}

pub fn descend<A: Actuator + ?Sized>(act: &mut A, pose: &mut Pose) -> Result<(), Failure> {
    if !act.travel(Motion::Down) {
        warn!(level = pose.level(), "descent refused");
        return Err(Failure::Blocked);
    }
    pose.lower();
    Ok(())
}

pub fn turn<A: Actuator + ?Sized>(act: &mut A, pose: &mut Pose, turn: Turn) {
    act.turn(turn);
    pose.turn(turn);
}

/// Descend to ground level and undo recorded turns.
///
/// Turns are undone even when the descent fails, so the heading is always
/// back where the procedure started. The descent failure is still returned.
pub fn restore<A: Actuator + ?Sized>(act: &mut A, pose: &mut Pose) -> Result<(), Failure> {
    let lowered = descend_to_ground(act, pose);
    for unwind in pose.unwind_turns() {
        turn(act, pose, unwind);
    }
    lowered
}

fn descend_to_ground<A: Actuator + ?Sized>(act: &mut A, pose: &mut Pose) -> Result<(), Failure> {
    while pose.raised() > 0 {
        descend(act, pose)?;
    }
    Ok(())
}
