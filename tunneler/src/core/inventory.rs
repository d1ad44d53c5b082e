//! First-fit inventory decisions over a live snapshot.
//!
//! A snapshot is taken from the actuator immediately before each decision and
//! discarded afterwards; host-side state changes between calls (drops, refuels,
//! digs), so it is never reused.

use crate::core::catalog::Catalog;
use crate::core::types::{MaterialId, SLOT_COUNT, SlotContents};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Option<SlotContents>>,
}

impl Inventory {
    /// Build a snapshot from slots ordered `1..=n`.
    pub fn from_slots(slots: Vec<Option<SlotContents>>) -> Self {
        Self { slots }
    }

    pub fn empty() -> Self {
        Self::from_slots(vec![None; SLOT_COUNT])
    }

    /// Contents of the 1-based `index`.
    pub fn slot(&self, index: usize) -> Option<&SlotContents> {
        index
            .checked_sub(1)
            .and_then(|offset| self.slots.get(offset))
            .and_then(Option::as_ref)
    }

    /// Occupied slots as `(index, contents)`, low to high.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &SlotContents)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(offset, slot)| slot.as_ref().map(|contents| (offset + 1, contents)))
    }

    /// First slot that is empty or already holds `item` with room for `quantity`.
    ///
    /// Scans low to high; the first slot matching either condition wins.
    pub fn find_slot_for(&self, item: &MaterialId, quantity: u32) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| match slot {
                None => true,
                Some(contents) => &contents.material == item && contents.remaining() >= quantity,
            })
            .map(|offset| offset + 1)
    }

    /// First slot holding a material the catalog marks as ignorable.
    pub fn first_ignored(&self, catalog: &Catalog) -> Option<usize> {
        self.occupied()
            .find(|(_, contents)| catalog.is_ignored(&contents.material))
            .map(|(index, _)| index)
    }
}
