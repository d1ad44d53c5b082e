//! Capability interface to the host's actuator/sensor layer.
//!
//! The [`Actuator`] trait decouples the control engine from whatever drives
//! the physical agent. Every call is synchronous and blocks until the host has
//! completed it. Tests and the CLI use [`crate::io::world::SimWorld`].

use crate::core::inventory::Inventory;
use crate::core::types::{FuelLevel, MaterialId, Motion, SLOT_COUNT, SlotContents, Target, Turn};

/// Host-provided primitives the engine drives.
pub trait Actuator {
    /// Translate one cell. Returns `false` if the host refused the move.
    fn travel(&mut self, motion: Motion) -> bool;

    fn turn(&mut self, turn: Turn);

    /// Material in the targeted cell, or `None` when it is empty.
    fn inspect(&mut self, target: Target) -> Option<MaterialId>;

    /// Excavate the targeted cell. The yield goes to the host inventory.
    fn dig(&mut self, target: Target) -> bool;

    /// Contents of the 1-based slot `index`.
    fn slot(&mut self, index: usize) -> Option<SlotContents>;

    fn select(&mut self, index: usize);

    /// Discard the entire selected stack at the current location.
    fn drop_selected(&mut self) -> bool;

    fn fuel_level(&mut self) -> FuelLevel;

    /// Burn `amount` items from the selected slot. `false` if they are not fuel.
    fn refuel_selected(&mut self, amount: u32) -> bool;
}

/// Query every slot and build a snapshot for a single policy decision.
pub fn snapshot_inventory<A: Actuator + ?Sized>(act: &mut A) -> Inventory {
    Inventory::from_slots((1..=SLOT_COUNT).map(|index| act.slot(index)).collect())
}
