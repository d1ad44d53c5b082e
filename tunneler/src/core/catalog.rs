//! Static material classification.
//!
//! The catalog answers three questions about a material: is it worth keeping,
//! does it collapse into vacated space, and what item does mining it produce.
//! It is loaded once and never mutated during a run.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::types::MaterialId;

/// Filler never worth an inventory slot.
const IGNORED: &[&str] = &[
    "minecraft:stone",
    "minecraft:cobblestone",
    "minecraft:dirt",
    "minecraft:grass_block",
    "minecraft:gravel",
    "minecraft:sand",
    "minecraft:red_sand",
    "minecraft:andesite",
    "minecraft:diorite",
    "minecraft:granite",
    "minecraft:tuff",
    "minecraft:deepslate",
    "minecraft:cobbled_deepslate",
    "minecraft:netherrack",
];

/// Loose fill that falls into a cell once it is vacated.
const UNSTABLE: &[&str] = &["minecraft:gravel", "minecraft:sand", "minecraft:red_sand"];

/// Mined material -> item produced. Unlisted materials drop themselves.
const DROPS: &[(&str, &str)] = &[
    ("minecraft:stone", "minecraft:cobblestone"),
    ("minecraft:grass_block", "minecraft:dirt"),
    ("minecraft:deepslate", "minecraft:cobbled_deepslate"),
    ("minecraft:coal_ore", "minecraft:coal"),
    ("minecraft:deepslate_coal_ore", "minecraft:coal"),
    ("minecraft:iron_ore", "minecraft:raw_iron"),
    ("minecraft:deepslate_iron_ore", "minecraft:raw_iron"),
    ("minecraft:copper_ore", "minecraft:raw_copper"),
    ("minecraft:gold_ore", "minecraft:raw_gold"),
    ("minecraft:deepslate_gold_ore", "minecraft:raw_gold"),
    ("minecraft:diamond_ore", "minecraft:diamond"),
    ("minecraft:deepslate_diamond_ore", "minecraft:diamond"),
    ("minecraft:emerald_ore", "minecraft:emerald"),
    ("minecraft:lapis_ore", "minecraft:lapis_lazuli"),
    ("minecraft:redstone_ore", "minecraft:redstone"),
    ("minecraft:nether_quartz_ore", "minecraft:quartz"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub ignored: BTreeSet<MaterialId>,
    pub unstable: BTreeSet<MaterialId>,
    pub drops: BTreeMap<MaterialId, MaterialId>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            ignored: IGNORED.iter().copied().map(MaterialId::from).collect(),
            unstable: UNSTABLE.iter().copied().map(MaterialId::from).collect(),
            drops: DROPS
                .iter()
                .map(|(mined, item)| (MaterialId::from(*mined), MaterialId::from(*item)))
                .collect(),
        }
    }
}

impl Catalog {
    pub fn is_ignored(&self, material: &MaterialId) -> bool {
        self.ignored.contains(material)
    }

    pub fn is_unstable(&self, material: &MaterialId) -> bool {
        self.unstable.contains(material)
    }

    /// Item produced by mining `material` (identity when unmapped).
    pub fn drop_of<'a>(&'a self, material: &'a MaterialId) -> &'a MaterialId {
        self.drops.get(material).unwrap_or(material)
    }
}
