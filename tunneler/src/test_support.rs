//! Test-only builders for simulated worlds and miner configurations.

use crate::core::catalog::Catalog;
use crate::core::types::{MaterialId, SLOT_COUNT};
use crate::io::config::MinerConfig;
use crate::io::world::{Cell, PlacedCell, PlacedStack, SimWorld, WorldSpec};

/// Strip of `depth` x `height` with automatic refuelling off.
pub fn config(depth: u32, height: u32) -> MinerConfig {
    MinerConfig {
        depth,
        height,
        auto_refuel: false,
        ..MinerConfig::default()
    }
}

/// Solid stone behind the rock face, unmetered fuel, empty inventory.
pub fn rock_spec() -> WorldSpec {
    WorldSpec::default()
}

/// Stone ground and air everywhere else; only placed cells hold material.
pub fn open_spec() -> WorldSpec {
    WorldSpec {
        fill: MaterialId::air(),
        ..WorldSpec::default()
    }
}

pub fn place(spec: &mut WorldSpec, at: Cell, material: &str) {
    spec.cells.push(PlacedCell {
        at,
        material: MaterialId::from(material),
    });
}

/// Fill every slot with a full stack of `material`.
pub fn pack_inventory(spec: &mut WorldSpec, material: &str) {
    spec.inventory = (1..=SLOT_COUNT)
        .map(|slot| PlacedStack {
            slot,
            material: MaterialId::from(material),
            count: spec.stack_limit,
        })
        .collect();
}

/// Replace the stack in `slot` (1-based).
pub fn put_stack(spec: &mut WorldSpec, slot: usize, material: &str, count: u32) {
    spec.inventory.retain(|stack| stack.slot != slot);
    spec.inventory.push(PlacedStack {
        slot,
        material: MaterialId::from(material),
        count,
    });
}

/// Build a world with the default catalog.
pub fn build(spec: &WorldSpec) -> SimWorld {
    SimWorld::new(spec, Catalog::default()).expect("valid world spec")
}
