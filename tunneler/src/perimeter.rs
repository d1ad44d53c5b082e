//! Perimeter scan of the current cross-section.
//!
//! Walks the boundary of the cell column the agent stands in: floor, left wall
//! bottom to top, ceiling, right wall top to bottom. Anything valuable found
//! on the boundary is mined under the inventory policy; ignorable material is
//! left in place.

use tracing::{instrument, warn};

use crate::core::catalog::Catalog;
use crate::core::pose::Pose;
use crate::core::types::{Failure, Target, Turn};
use crate::excavate::mine_cell;
use crate::io::actuator::Actuator;
use crate::movement::{descend, restore, rise, turn};

/// Scan and clear the walls, floor and ceiling around the agent.
///
/// Heading and ground level are restored before returning, on failure too.
#[instrument(skip_all, fields(height = height))]
pub fn scan_walls<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    height: u32,
) -> Result<(), Failure> {
    let mut pose = Pose::ground();
    let scanned = walk_boundary(act, catalog, height, &mut pose);
    if scanned.is_err() {
        warn!(
            level = pose.level(),
            quarter_turns = pose.quarter_turns(),
            "wall scan aborted, unwinding"
        );
    }
    let restored = restore(act, &mut pose);
    scanned.and(restored)
}

fn walk_boundary<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    height: u32,
    pose: &mut Pose,
) -> Result<(), Failure> {
    clear_if_valuable(act, catalog, Target::Below)?;

    turn(act, pose, Turn::Left);
    loop {
        clear_if_valuable(act, catalog, Target::Ahead)?;
        if pose.level() >= height {
            break;
        }
        rise(act, catalog, pose)?;
    }
    clear_if_valuable(act, catalog, Target::Above)?;

    turn(act, pose, Turn::Right);
    turn(act, pose, Turn::Right);
    loop {
        clear_if_valuable(act, catalog, Target::Ahead)?;
        if pose.raised() == 0 {
            break;
        }
        descend(act, pose)?;
    }

    turn(act, pose, Turn::Left);
    Ok(())
}

fn clear_if_valuable<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    target: Target,
) -> Result<(), Failure> {
    match act.inspect(target) {
        Some(material) if !catalog.is_ignored(&material) => mine_cell(act, catalog, target),
        _ => Ok(()),
    }
}
