//! In-memory host world implementing [`Actuator`].
//!
//! The world is a sparse voxel grid described by a [`WorldSpec`]. The agent
//! starts at the origin facing `+z` in front of a rock face: below `y = 0` is
//! `ground`, cells with `z <= 0` are open air, everything else is `fill`
//! unless a cell is placed explicitly. Cells above `top` are always air.
//!
//! When a cell is vacated, the unstable material stacked above it drops to
//! the lowest open cell of the column. Unbreakable materials refuse digs.
//! Entities block movement without being visible to inspection. Every
//! translation burns one unit of metered fuel.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::catalog::Catalog;
use crate::core::inventory::Inventory;
use crate::core::types::{FuelLevel, MaterialId, Motion, SLOT_COUNT, SlotContents, Target, Turn};
use crate::io::actuator::Actuator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    fn below(self) -> Self {
        self.offset(0, -1, 0)
    }
}

/// Explicit cell override. `minecraft:air` carves an opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCell {
    pub at: Cell,
    pub material: MaterialId,
}

/// Inventory stack present when the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedStack {
    pub slot: usize,
    pub material: MaterialId,
    pub count: u32,
}

/// World description (TOML).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSpec {
    /// Material behind the rock face. `minecraft:air` for an open world.
    pub fill: MaterialId,

    /// Material below `y = 0`.
    pub ground: MaterialId,

    /// Highest `y` that can hold material.
    pub top: i32,

    /// Starting fuel. Omit for a host that does not meter fuel.
    pub fuel: Option<u32>,

    /// Stack capacity of every inventory slot.
    pub stack_limit: u32,

    pub unbreakable: BTreeSet<MaterialId>,

    /// Fuel units gained per item burned.
    pub fuel_values: BTreeMap<MaterialId, u32>,

    pub cells: Vec<PlacedCell>,

    /// Cells occupied by something that blocks movement but cannot be mined.
    pub entities: Vec<Cell>,

    pub inventory: Vec<PlacedStack>,
}

impl Default for WorldSpec {
    fn default() -> Self {
        Self {
            fill: MaterialId::from("minecraft:stone"),
            ground: MaterialId::from("minecraft:stone"),
            top: 32,
            fuel: None,
            stack_limit: 64,
            unbreakable: [MaterialId::from("minecraft:bedrock")].into_iter().collect(),
            fuel_values: [
                ("minecraft:coal", 80),
                ("minecraft:charcoal", 80),
                ("minecraft:coal_block", 800),
                ("minecraft:oak_planks", 15),
                ("minecraft:stick", 5),
            ]
            .into_iter()
            .map(|(item, units)| (MaterialId::from(item), units))
            .collect(),
            cells: Vec::new(),
            entities: Vec::new(),
            inventory: Vec::new(),
        }
    }
}

impl WorldSpec {
    pub fn validate(&self) -> Result<()> {
        if self.top < 1 {
            return Err(anyhow!("top must be >= 1"));
        }
        if self.stack_limit == 0 {
            return Err(anyhow!("stack_limit must be > 0"));
        }
        let mut seen = HashSet::new();
        for stack in &self.inventory {
            if !(1..=SLOT_COUNT).contains(&stack.slot) {
                bail!("inventory slot {} out of range 1..={}", stack.slot, SLOT_COUNT);
            }
            if !seen.insert(stack.slot) {
                bail!("inventory slot {} listed twice", stack.slot);
            }
            if stack.count == 0 || stack.count > self.stack_limit {
                bail!(
                    "inventory slot {}: count {} must be within 1..={}",
                    stack.slot,
                    stack.count,
                    self.stack_limit
                );
            }
        }
        Ok(())
    }
}

/// Load a world description from TOML.
pub fn load_world_spec(path: &Path) -> Result<WorldSpec> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let spec: WorldSpec =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    spec.validate().with_context(|| format!("validate {}", path.display()))?;
    Ok(spec)
}

/// Count of every primitive the engine issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionLog {
    pub forward: u32,
    pub back: u32,
    pub up: u32,
    pub down: u32,
    pub turns: u32,
    pub digs: u32,
    pub drops: u32,
    pub refuels: u32,
    /// Mined items lost because no slot could take them.
    pub spilled: u32,
}

impl ActionLog {
    pub fn translations(&self) -> u32 {
        self.forward + self.back + self.up + self.down
    }
}

/// Simulated host.
#[derive(Debug, Clone)]
pub struct SimWorld {
    catalog: Catalog,
    fill: MaterialId,
    ground: MaterialId,
    top: i32,
    stack_limit: u32,
    unbreakable: BTreeSet<MaterialId>,
    fuel_values: BTreeMap<MaterialId, u32>,
    placed: HashMap<Cell, MaterialId>,
    entities: HashSet<Cell>,
    agent: Cell,
    /// Quarter turns clockwise from `+z`.
    facing: u8,
    slots: Vec<Option<SlotContents>>,
    selected: usize,
    fuel: FuelLevel,
    log: ActionLog,
}

impl SimWorld {
    /// Build a world. `catalog` decides what digs yield and what falls.
    pub fn new(spec: &WorldSpec, catalog: Catalog) -> Result<Self> {
        spec.validate()?;
        let mut slots = vec![None; SLOT_COUNT];
        for stack in &spec.inventory {
            slots[stack.slot - 1] = Some(SlotContents {
                material: stack.material.clone(),
                count: stack.count,
                capacity: spec.stack_limit,
            });
        }
        Ok(Self {
            catalog,
            fill: spec.fill.clone(),
            ground: spec.ground.clone(),
            top: spec.top,
            stack_limit: spec.stack_limit,
            unbreakable: spec.unbreakable.clone(),
            fuel_values: spec.fuel_values.clone(),
            placed: spec
                .cells
                .iter()
                .map(|placed| (placed.at, placed.material.clone()))
                .collect(),
            entities: spec.entities.iter().copied().collect(),
            agent: Cell::new(0, 0, 0),
            facing: 0,
            slots,
            selected: 1,
            fuel: spec.fuel.map_or(FuelLevel::Unlimited, FuelLevel::Units),
            log: ActionLog::default(),
        })
    }

    pub fn agent(&self) -> Cell {
        self.agent
    }

    pub fn facing(&self) -> u8 {
        self.facing
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn inventory(&self) -> Inventory {
        Inventory::from_slots(self.slots.clone())
    }

    /// Material at `cell`, `None` for air.
    pub fn material_at(&self, cell: Cell) -> Option<MaterialId> {
        let material = if let Some(placed) = self.placed.get(&cell) {
            placed
        } else if cell.y > self.top {
            return None;
        } else if cell.y < 0 {
            &self.ground
        } else if cell.z <= 0 {
            return None;
        } else {
            &self.fill
        };
        (!material.is_air()).then(|| material.clone())
    }

    fn set(&mut self, cell: Cell, material: MaterialId) {
        self.placed.insert(cell, material);
    }

    fn heading(&self) -> (i32, i32) {
        match self.facing {
            0 => (0, 1),
            1 => (1, 0),
            2 => (0, -1),
            _ => (-1, 0),
        }
    }

    fn target_cell(&self, target: Target) -> Cell {
        match target {
            Target::Ahead => {
                let (dx, dz) = self.heading();
                self.agent.offset(dx, 0, dz)
            }
            Target::Above => self.agent.above(),
            Target::Below => self.agent.below(),
        }
    }

    fn is_open(&self, cell: Cell) -> bool {
        cell != self.agent && !self.entities.contains(&cell) && self.material_at(cell).is_none()
    }

    /// Drop the unstable stack above `vacated` onto the lowest open cell below it.
    fn settle(&mut self, vacated: Cell) {
        let mut landing = vacated;
        while landing.y > -self.top && self.is_open(landing.below()) {
            landing = landing.below();
        }
        let mut probe = vacated.above();
        while probe.y <= self.top && probe != self.agent {
            match self.material_at(probe) {
                Some(material) if self.catalog.is_unstable(&material) => {
                    trace!(from = ?probe, to = ?landing, %material, "material falls");
                    self.set(landing, material);
                    self.set(probe, MaterialId::air());
                    landing = landing.above();
                    probe = probe.above();
                }
                _ => break,
            }
        }
    }

    fn store(&mut self, item: &MaterialId) {
        match self.inventory().find_slot_for(item, 1) {
            Some(index) => match self.slots[index - 1].as_mut() {
                Some(contents) => contents.count += 1,
                None => {
                    self.slots[index - 1] = Some(SlotContents {
                        material: item.clone(),
                        count: 1,
                        capacity: self.stack_limit,
                    });
                }
            },
            None => {
                debug!(%item, "no room, item spilled");
                self.log.spilled += 1;
            }
        }
    }
}

impl Actuator for SimWorld {
    fn travel(&mut self, motion: Motion) -> bool {
        if self.fuel == FuelLevel::Units(0) {
            return false;
        }
        let (dx, dz) = self.heading();
        let dest = match motion {
            Motion::Forward => self.agent.offset(dx, 0, dz),
            Motion::Back => self.agent.offset(-dx, 0, -dz),
            Motion::Up => self.agent.above(),
            Motion::Down => self.agent.below(),
        };
        if self.material_at(dest).is_some() || self.entities.contains(&dest) {
            return false;
        }
        let vacated = self.agent;
        self.agent = dest;
        if let FuelLevel::Units(units) = &mut self.fuel {
            *units -= 1;
        }
        match motion {
            Motion::Forward => self.log.forward += 1,
            Motion::Back => self.log.back += 1,
            Motion::Up => self.log.up += 1,
            Motion::Down => self.log.down += 1,
        }
        self.settle(vacated);
        true
    }

    fn turn(&mut self, turn: Turn) {
        self.facing = match turn {
            Turn::Right => (self.facing + 1) % 4,
            Turn::Left => (self.facing + 3) % 4,
        };
        self.log.turns += 1;
    }

    fn inspect(&mut self, target: Target) -> Option<MaterialId> {
        self.material_at(self.target_cell(target))
    }

    fn dig(&mut self, target: Target) -> bool {
        let cell = self.target_cell(target);
        let Some(material) = self.material_at(cell) else {
            return false;
        };
        if self.unbreakable.contains(&material) {
            return false;
        }
        self.set(cell, MaterialId::air());
        self.log.digs += 1;
        let item = self.catalog.drop_of(&material).clone();
        self.store(&item);
        self.settle(cell);
        true
    }

    fn slot(&mut self, index: usize) -> Option<SlotContents> {
        self.inventory().slot(index).cloned()
    }

    fn select(&mut self, index: usize) {
        if (1..=SLOT_COUNT).contains(&index) {
            self.selected = index;
        }
    }

    fn drop_selected(&mut self) -> bool {
        match self.slots[self.selected - 1].take() {
            Some(_) => {
                self.log.drops += 1;
                true
            }
            None => false,
        }
    }

    fn fuel_level(&mut self) -> FuelLevel {
        self.fuel
    }

    fn refuel_selected(&mut self, amount: u32) -> bool {
        let index = self.selected - 1;
        let Some(contents) = self.slots[index].as_mut() else {
            return false;
        };
        let Some(value) = self.fuel_values.get(&contents.material).copied() else {
            return false;
        };
        if contents.count < amount {
            return false;
        }
        contents.count -= amount;
        if contents.count == 0 {
            self.slots[index] = None;
        }
        if let FuelLevel::Units(units) = &mut self.fuel {
            *units = units.saturating_add(value.saturating_mul(amount));
        }
        self.log.refuels += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_world(cells: &[(Cell, &str)]) -> SimWorld {
        let spec = WorldSpec {
            fill: MaterialId::air(),
            cells: cells
                .iter()
                .map(|(at, material)| PlacedCell {
                    at: *at,
                    material: MaterialId::from(*material),
                })
                .collect(),
            ..WorldSpec::default()
        };
        SimWorld::new(&spec, Catalog::default()).expect("world")
    }

    #[test]
    fn rock_face_starts_in_front_of_the_agent() {
        let world = SimWorld::new(&WorldSpec::default(), Catalog::default()).expect("world");
        assert_eq!(world.material_at(Cell::new(0, 0, 0)), None);
        assert_eq!(world.material_at(Cell::new(0, 5, 0)), None);
        assert_eq!(
            world.material_at(Cell::new(0, 0, 1)),
            Some(MaterialId::from("minecraft:stone"))
        );
        assert!(world.material_at(Cell::new(0, -1, 0)).is_some());
    }

    #[test]
    fn dig_stores_the_yield_not_the_material() {
        let mut world = open_world(&[(Cell::new(0, 0, 1), "minecraft:coal_ore")]);
        assert!(world.dig(Target::Ahead));
        let slot = world.slot(1).expect("slot 1");
        assert_eq!(slot.material.as_str(), "minecraft:coal");
        assert_eq!(world.inspect(Target::Ahead), None);
    }

    #[test]
    fn unstable_column_refills_dug_cell() {
        let mut world = open_world(&[
            (Cell::new(0, 0, 1), "minecraft:gravel"),
            (Cell::new(0, 1, 1), "minecraft:sand"),
        ]);
        assert!(world.dig(Target::Ahead));
        assert_eq!(
            world.inspect(Target::Ahead),
            Some(MaterialId::from("minecraft:sand"))
        );
        assert!(world.dig(Target::Ahead));
        assert_eq!(world.inspect(Target::Ahead), None);
        assert_eq!(world.log().digs, 2);
    }

    #[test]
    fn metered_fuel_stops_movement_at_zero() {
        let spec = WorldSpec {
            fill: MaterialId::air(),
            fuel: Some(1),
            ..WorldSpec::default()
        };
        let mut world = SimWorld::new(&spec, Catalog::default()).expect("world");
        assert!(world.travel(Motion::Forward));
        assert!(!world.travel(Motion::Forward));
        assert_eq!(world.fuel_level(), FuelLevel::Units(0));
    }

    #[test]
    fn refuel_burns_only_fuel_items() {
        let spec = WorldSpec {
            fuel: Some(0),
            inventory: vec![
                PlacedStack {
                    slot: 1,
                    material: MaterialId::from("minecraft:dirt"),
                    count: 3,
                },
                PlacedStack {
                    slot: 2,
                    material: MaterialId::from("minecraft:coal"),
                    count: 1,
                },
            ],
            ..WorldSpec::default()
        };
        let mut world = SimWorld::new(&spec, Catalog::default()).expect("world");
        assert!(!world.refuel_selected(1));
        world.select(2);
        assert!(world.refuel_selected(1));
        assert_eq!(world.fuel_level(), FuelLevel::Units(80));
        assert!(world.slot(2).is_none());
    }

    #[test]
    fn bedrock_and_entities_block() {
        let mut world = open_world(&[(Cell::new(0, 0, 1), "minecraft:bedrock")]);
        assert!(!world.dig(Target::Ahead));
        assert!(!world.travel(Motion::Forward));

        let spec = WorldSpec {
            fill: MaterialId::air(),
            entities: vec![Cell::new(0, 0, 1)],
            ..WorldSpec::default()
        };
        let mut world = SimWorld::new(&spec, Catalog::default()).expect("world");
        assert_eq!(world.inspect(Target::Ahead), None);
        assert!(!world.travel(Motion::Forward));
    }

    #[test]
    fn spec_rejects_duplicate_slots() {
        let stack = PlacedStack {
            slot: 3,
            material: MaterialId::from("minecraft:coal"),
            count: 1,
        };
        let spec = WorldSpec {
            inventory: vec![stack.clone(), stack],
            ..WorldSpec::default()
        };
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn load_world_spec_reads_toml() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("world.toml");
        fs::write(
            &path,
            r#"fill = "minecraft:dirt"
fuel = 200

[[cells]]
at = { x = 0, y = 0, z = 3 }
material = "minecraft:iron_ore"
"#,
        )
        .expect("write");

        let spec = load_world_spec(&path).expect("load");
        assert_eq!(spec.fill.as_str(), "minecraft:dirt");
        assert_eq!(spec.fuel, Some(200));
        assert_eq!(spec.cells.len(), 1);
        assert_eq!(spec.stack_limit, 64);
    }
}
