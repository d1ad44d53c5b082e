//! Fuel arithmetic for strip planning.

use crate::core::types::FuelLevel;

/// Fuel level below which the controller tops up before mining a row.
pub const DEFAULT_LOW_FUEL_THRESHOLD: u32 = 50;

/// True when metered fuel is below `threshold`.
pub fn is_low(level: FuelLevel, threshold: u32) -> bool {
    match level {
        FuelLevel::Unlimited => false,
        FuelLevel::Units(units) => units < threshold,
    }
}

/// Translations a full strip issues, one fuel unit each.
///
/// Per row: climb and descend the row (`2(h-1)`), step forward (1), climb and
/// descend the wall scan (`2(h-1)`). Then one step back per row to the mouth.
pub fn estimate_fuel(depth: u32, height: u32) -> u64 {
    let climb = u64::from(height.saturating_sub(1));
    let per_row = 4 * climb + 1;
    u64::from(depth) * (per_row + 1)
}

pub fn is_sufficient(level: FuelLevel, depth: u32, height: u32) -> bool {
    match level {
        FuelLevel::Unlimited => true,
        FuelLevel::Units(units) => u64::from(units) >= estimate_fuel(depth, height),
    }
}
