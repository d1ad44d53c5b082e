//! Shared deterministic types for the excavation engine.
//!
//! These types define the contract between the control engine and the
//! actuator layer. They carry no I/O and must stay stable across runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of inventory slots exposed by the actuator layer (indexed `1..=16`).
pub const SLOT_COUNT: usize = 16;

const AIR: &str = "minecraft:air";

/// Namespaced material identifier, e.g. `minecraft:coal_ore`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(String);

impl MaterialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier hosts use for an empty cell.
    pub fn air() -> Self {
        Self(AIR.to_string())
    }

    pub fn is_air(&self) -> bool {
        self.0 == AIR
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MaterialId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translation primitives understood by the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Forward,
    Back,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    pub fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Horizontal direction for resilient movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stride {
    Forward,
    Back,
}

/// Cell addressed by inspect/dig, relative to the agent's heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Ahead,
    Above,
    Below,
}

/// Contents of one occupied inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotContents {
    pub material: MaterialId,
    pub count: u32,
    /// Maximum stack size for `material` in this slot.
    pub capacity: u32,
}

impl SlotContents {
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.count)
    }
}

/// Fuel reported by the actuator layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelLevel {
    /// Host does not meter fuel.
    Unlimited,
    Units(u32),
}

/// Terminal failure of a mining or movement call.
///
/// Every kind aborts the strip: the controller unwinds to the mouth and stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Failure {
    /// No slot can take the yield and nothing ignorable can be discarded.
    #[error("inventory full: no free slot and nothing ignorable to discard")]
    InventoryFull,

    /// A stable obstruction, an entity, or a failed translation.
    #[error("path blocked")]
    Blocked,

    /// Unstable material kept refilling the cell past the retry ceiling.
    #[error("unstable material still falling after {limit} digs")]
    StuckClearing { limit: u32 },
}
