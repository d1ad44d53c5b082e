//! Outer strip-mining loop with rollback to the tunnel mouth.

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::core::fuel::is_low;
use crate::core::types::{Failure, FuelLevel, SLOT_COUNT, Stride};
use crate::io::actuator::Actuator;
use crate::io::config::MinerConfig;
use crate::movement::travel;
use crate::perimeter::scan_walls;
use crate::row::mine_row;

/// Why `run_strip` stopped. Either way the agent is back at the mouth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stop", rename_all = "snake_case")]
pub enum StripStop {
    /// Every configured row was mined.
    CompletedAtDepth,
    /// A row failed at `position` (rows advanced when it happened).
    AbortedAt { position: u32, failure: Failure },
}

/// Summary of a strip run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StripOutcome {
    pub depth: u32,
    pub height: u32,
    /// Deepest position reached before returning.
    pub rows_advanced: u32,
    pub stop: StripStop,
}

/// Progress reported after each fully mined and scanned row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowReport {
    pub position: u32,
    pub fuel: FuelLevel,
}

/// The agent could not get back to the mouth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stranded at position {position} while returning to the mouth: {failure}")]
pub struct StrandedError {
    pub position: u32,
    pub failure: Failure,
}

/// Mine a straight strip of `config.depth` rows, then return to the mouth.
///
/// Any row failure (inventory full, blocked path, collapsing fill) ends the
/// run: the agent retreats from wherever it is and the stop records where it
/// happened. Only a failed retreat is an error ([`StrandedError`]).
#[instrument(skip_all, fields(depth = config.depth, height = config.height))]
pub fn run_strip<A: Actuator + ?Sized, F: FnMut(&RowReport)>(
    act: &mut A,
    config: &MinerConfig,
    mut on_row: F,
) -> Result<StripOutcome> {
    config.validate()?;
    let mut position = 0u32;
    let mut rows_advanced = 0u32;
    let mut stop = StripStop::CompletedAtDepth;

    while position < config.depth {
        if config.auto_refuel {
            top_up_fuel(act, config.low_fuel_threshold);
        }
        if let Err(failure) = advance_row(act, config, &mut position) {
            warn!(position, %failure, "row failed, returning to mouth");
            stop = StripStop::AbortedAt { position, failure };
            rows_advanced = rows_advanced.max(position);
            return_to_mouth(act, config, &mut position)?;
            break;
        }
        rows_advanced = position;
        let fuel = act.fuel_level();
        debug!(position, ?fuel, "row complete");
        on_row(&RowReport { position, fuel });
    }

    return_to_mouth(act, config, &mut position)?;
    info!(rows_advanced, ?stop, "strip finished at mouth");
    Ok(StripOutcome {
        depth: config.depth,
        height: config.height,
        rows_advanced,
        stop,
    })
}

/// Mine the row ahead, step into it, and scan its walls.
///
/// `position` is incremented as soon as the step succeeds, so a scan failure
/// reports the row the agent is standing in.
fn advance_row<A: Actuator + ?Sized>(
    act: &mut A,
    config: &MinerConfig,
    position: &mut u32,
) -> Result<(), Failure> {
    mine_row(act, &config.catalog, config.height)?;
    travel(
        act,
        &config.catalog,
        config.clear_retry_limit,
        Stride::Forward,
    )?;
    *position += 1;
    scan_walls(act, &config.catalog, config.height)
}

/// Step back until `position` reaches 0. A no-op at the mouth.
pub fn return_to_mouth<A: Actuator + ?Sized>(
    act: &mut A,
    config: &MinerConfig,
    position: &mut u32,
) -> Result<(), StrandedError> {
    if *position > 0 {
        debug!(from = *position, "retreating to mouth");
    }
    while *position > 0 {
        travel(act, &config.catalog, config.clear_retry_limit, Stride::Back).map_err(
            |failure| StrandedError {
                position: *position,
                failure,
            },
        )?;
        *position -= 1;
    }
    Ok(())
}

/// Burn fuel items until fuel reaches `threshold` or nothing burns.
///
/// Running out of fuel items is not fatal here; it surfaces later as a
/// refused move. Returns the number of items burned.
pub fn top_up_fuel<A: Actuator + ?Sized>(act: &mut A, threshold: u32) -> u32 {
    let mut burned = 0;
    loop {
        let level = act.fuel_level();
        if !is_low(level, threshold) {
            break;
        }
        if !refuel_once(act) {
            warn!(?level, threshold, "fuel low and nothing left to burn");
            break;
        }
        burned += 1;
    }
    if burned > 0 {
        debug!(burned, "topped up fuel");
    }
    burned
}

/// Burn one item from the lowest slot whose contents accept it.
fn refuel_once<A: Actuator + ?Sized>(act: &mut A) -> bool {
    for index in 1..=SLOT_COUNT {
        if act.slot(index).is_none() {
            continue;
        }
        act.select(index);
        if act.refuel_selected(1) {
            return true;
        }
    }
    false
}
