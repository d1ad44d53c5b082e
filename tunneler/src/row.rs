//! Row mining: the full column of cells directly ahead.

use tracing::{instrument, warn};

use crate::core::catalog::Catalog;
use crate::core::pose::Pose;
use crate::core::types::{Failure, Target};
use crate::excavate::mine_cell;
use crate::io::actuator::Actuator;
use crate::movement::{restore, rise};

/// Mine `height` cells ahead, bottom to top, then drop back to ground level.
///
/// A failure stops the climb at the level where it happened. The descent
/// runs regardless, so the caller always resumes at ground level.
#[instrument(skip_all, fields(height = height))]
pub fn mine_row<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    height: u32,
) -> Result<(), Failure> {
    let mut pose = Pose::ground();
    let climbed = climb_column(act, catalog, height, &mut pose);
    let restored = restore(act, &mut pose);
    if let (Err(failure), Err(descent)) = (&climbed, &restored) {
        warn!(%failure, %descent, "row aborted and descent failed");
    }
    climbed.and(restored)
}

fn climb_column<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    height: u32,
    pose: &mut Pose,
) -> Result<(), Failure> {
    while pose.level() < height {
        mine_cell(act, catalog, Target::Ahead)?;
        rise(act, catalog, pose)?;
    }
    mine_cell(act, catalog, Target::Ahead)
}
