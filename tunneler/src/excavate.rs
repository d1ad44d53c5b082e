//! Single-cell excavation under the inventory retention policy.

use tracing::{debug, warn};

use crate::core::catalog::Catalog;
use crate::core::types::{Failure, MaterialId, Target};
use crate::io::actuator::{Actuator, snapshot_inventory};

/// Mine the cell at `target` if the inventory policy allows it.
///
/// In order: an empty cell succeeds untouched; a yield with a free or
/// matching slot is dug; ignorable material is dug even with nowhere to put
/// it; otherwise an ignorable stack is discarded to make room. Only when none
/// of those apply does it fail, leaving the cell intact.
pub fn mine_cell<A: Actuator + ?Sized>(
    act: &mut A,
    catalog: &Catalog,
    target: Target,
) -> Result<(), Failure> {
    let Some(material) = act.inspect(target) else {
        return Ok(());
    };
    let item = catalog.drop_of(&material);

    if let Some(slot) = snapshot_inventory(act).find_slot_for(item, 1) {
        debug!(%material, %item, slot, ?target, "mining into slot");
        dig(act, target, &material);
        return Ok(());
    }
    if catalog.is_ignored(&material) {
        debug!(%material, ?target, "no room, mining ignorable material anyway");
        dig(act, target, &material);
        return Ok(());
    }
    if make_room_for_ignored(act, catalog) {
        dig(act, target, &material);
        return Ok(());
    }
    warn!(%material, %item, ?target, "inventory full");
    Err(Failure::InventoryFull)
}

/// Discard the first ignorable stack (lowest slot) to free its slot.
///
/// Returns `false` when no slot holds ignorable material or the host refused
/// the drop.
pub fn make_room_for_ignored<A: Actuator + ?Sized>(act: &mut A, catalog: &Catalog) -> bool {
    let Some(slot) = snapshot_inventory(act).first_ignored(catalog) else {
        return false;
    };
    act.select(slot);
    if !act.drop_selected() {
        warn!(slot, "host refused to drop ignorable stack");
        return false;
    }
    debug!(slot, "discarded ignorable stack");
    true
}

fn dig<A: Actuator + ?Sized>(act: &mut A, target: Target, material: &MaterialId) {
    // An unbreakable cell stays put; movement reports it as blocked later.
    if !act.dig(target) {
        warn!(%material, ?target, "dig refused");
    }
}
