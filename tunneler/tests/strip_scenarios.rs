//! End-to-end strip runs against the simulated world.
//!
//! Each scenario builds a world, runs the controller, and checks the stop
//! reason together with the primitives the agent issued.

use tunneler::core::types::{Failure, FuelLevel};
use tunneler::io::actuator::Actuator;
use tunneler::io::config::MinerConfig;
use tunneler::io::world::{Cell, SimWorld, WorldSpec};
use tunneler::strip::{StrandedError, StripOutcome, StripStop, run_strip};
use tunneler::test_support::{build, config, pack_inventory, place, put_stack, rock_spec};

const MOUTH: Cell = Cell::new(0, 0, 0);

fn dig(world: &mut SimWorld, cfg: &MinerConfig) -> StripOutcome {
    run_strip(world, cfg, |_| {}).expect("strip run")
}

#[test]
fn shallow_strip_in_solid_rock() {
    let mut world = build(&rock_spec());

    let outcome = dig(&mut world, &config(3, 2));

    assert_eq!(outcome.stop, StripStop::CompletedAtDepth);
    assert_eq!(outcome.rows_advanced, 3);
    let log = world.log();
    assert_eq!(log.forward, 3);
    assert_eq!(log.back, 3);
    assert_eq!(log.digs, 6);
    // One climb per row pass and one per wall scan.
    assert_eq!(log.up, 6);
    assert_eq!(log.down, 6);
    assert_eq!(log.turns, 12);
    assert_eq!(world.agent(), MOUTH);
    assert_eq!(world.facing(), 0);
    for z in 1..=3 {
        assert_eq!(world.material_at(Cell::new(0, 0, z)), None);
        assert_eq!(world.material_at(Cell::new(0, 1, z)), None);
    }
    assert!(world.material_at(Cell::new(0, 0, 4)).is_some());
}

#[test]
fn every_row_cell_is_dug_across_shapes() {
    for (depth, height) in [(1, 2), (2, 3), (4, 2), (6, 4)] {
        let mut world = build(&rock_spec());

        let outcome = dig(&mut world, &config(depth, height));

        assert_eq!(outcome.stop, StripStop::CompletedAtDepth, "{depth}x{height}");
        assert_eq!(world.log().forward, depth);
        assert!(world.log().digs >= depth * height, "{depth}x{height}");
        assert_eq!(world.agent(), MOUTH);
    }
}

#[test]
fn full_inventory_during_third_row_returns_two_cells() {
    let mut spec = rock_spec();
    pack_inventory(&mut spec, "minecraft:emerald");
    place(&mut spec, Cell::new(0, 0, 3), "minecraft:iron_ore");
    let mut world = build(&spec);

    let outcome = dig(&mut world, &config(5, 2));

    assert_eq!(
        outcome.stop,
        StripStop::AbortedAt {
            position: 2,
            failure: Failure::InventoryFull
        }
    );
    assert_eq!(outcome.rows_advanced, 2);
    assert_eq!(world.log().forward, 2);
    assert_eq!(world.log().back, 2);
    assert_eq!(world.agent(), MOUTH);
    assert_eq!(
        world.material_at(Cell::new(0, 0, 3)).map(|m| m.as_str().to_string()),
        Some("minecraft:iron_ore".to_string())
    );
}

#[test]
fn retreat_matches_the_failing_row() {
    for row in 0..5 {
        let mut spec = rock_spec();
        pack_inventory(&mut spec, "minecraft:emerald");
        place(&mut spec, Cell::new(0, 0, row + 1), "minecraft:diamond_ore");
        let mut world = build(&spec);

        let outcome = dig(&mut world, &config(8, 2));

        let expected = u32::try_from(row).expect("row fits");
        assert_eq!(
            outcome.stop,
            StripStop::AbortedAt {
                position: expected,
                failure: Failure::InventoryFull
            }
        );
        assert_eq!(world.log().back, expected, "row {row}");
        assert_eq!(world.log().forward, expected, "row {row}");
        assert_eq!(world.agent(), MOUTH);
    }
}

#[test]
fn wall_scan_failure_reports_the_row_stepped_into() {
    let mut spec = rock_spec();
    pack_inventory(&mut spec, "minecraft:emerald");
    place(&mut spec, Cell::new(-1, 0, 2), "minecraft:diamond_ore");
    let mut world = build(&spec);

    let outcome = dig(&mut world, &config(5, 2));

    assert_eq!(
        outcome.stop,
        StripStop::AbortedAt {
            position: 2,
            failure: Failure::InventoryFull
        }
    );
    assert_eq!(world.log().back, 2);
    assert_eq!(world.agent(), MOUTH);
    assert_eq!(world.facing(), 0);
}

#[test]
fn wall_ores_are_collected_on_the_way() {
    let mut spec = rock_spec();
    place(&mut spec, Cell::new(-1, 1, 1), "minecraft:coal_ore");
    place(&mut spec, Cell::new(1, 0, 2), "minecraft:lapis_ore");
    place(&mut spec, Cell::new(0, -1, 2), "minecraft:gold_ore");
    let mut world = build(&spec);

    let outcome = dig(&mut world, &config(2, 2));

    assert_eq!(outcome.stop, StripStop::CompletedAtDepth);
    let items: Vec<String> = world
        .inventory()
        .occupied()
        .map(|(_, stack)| stack.material.as_str().to_string())
        .collect();
    for item in ["minecraft:coal", "minecraft:lapis_lazuli", "minecraft:raw_gold"] {
        assert!(items.iter().any(|held| held == item), "missing {item}");
    }
    assert_eq!(world.material_at(Cell::new(-1, 1, 1)), None);
    assert!(world.material_at(Cell::new(-1, 0, 1)).is_some());
}

#[test]
fn bedrock_ahead_blocks_the_strip() {
    let mut spec = rock_spec();
    place(&mut spec, Cell::new(0, 0, 3), "minecraft:bedrock");
    let mut world = build(&spec);

    let outcome = dig(&mut world, &config(5, 2));

    assert_eq!(
        outcome.stop,
        StripStop::AbortedAt {
            position: 2,
            failure: Failure::Blocked
        }
    );
    assert_eq!(world.log().back, 2);
    assert_eq!(world.agent(), MOUTH);
}

#[test]
fn endless_sand_ahead_gives_up_after_the_clear_limit() {
    let mut spec = rock_spec();
    for y in 0..10 {
        place(&mut spec, Cell::new(0, y, 3), "minecraft:sand");
    }
    let mut world = build(&spec);
    let cfg = MinerConfig {
        clear_retry_limit: 2,
        ..config(5, 2)
    };

    let outcome = dig(&mut world, &cfg);

    assert_eq!(
        outcome.stop,
        StripStop::AbortedAt {
            position: 2,
            failure: Failure::StuckClearing { limit: 2 }
        }
    );
    assert_eq!(world.log().forward, 2);
    assert_eq!(world.log().back, 2);
    assert_eq!(world.agent(), MOUTH);
    assert!(world.material_at(Cell::new(0, 0, 3)).is_some());
}

#[test]
fn gravel_settling_behind_the_agent_is_cleared_on_the_way_out() {
    let mut spec = rock_spec();
    place(&mut spec, Cell::new(0, 2, 0), "minecraft:gravel");
    let mut world = build(&spec);

    let outcome = dig(&mut world, &config(1, 2));

    assert_eq!(outcome.stop, StripStop::CompletedAtDepth);
    // The gravel dropped into the mouth once the agent stepped out of it,
    // so the retreat turned around and dug through instead of backing up.
    let log = world.log();
    assert_eq!(log.back, 0);
    assert_eq!(log.forward, 2);
    assert_eq!(log.digs, 3);
    assert_eq!(log.turns, 8);
    assert_eq!(world.agent(), MOUTH);
    assert_eq!(world.facing(), 0);
}

#[test]
fn auto_refuel_burns_coal_before_the_first_row() {
    let mut spec = WorldSpec {
        fuel: Some(20),
        ..rock_spec()
    };
    put_stack(&mut spec, 1, "minecraft:coal", 4);
    let mut world = build(&spec);
    let cfg = MinerConfig {
        auto_refuel: true,
        ..config(3, 2)
    };

    let outcome = dig(&mut world, &cfg);

    assert_eq!(outcome.stop, StripStop::CompletedAtDepth);
    assert_eq!(world.log().refuels, 1);
    // 20 + 80, minus 18 translations.
    assert_eq!(world.fuel_level(), FuelLevel::Units(82));
}

#[test]
fn running_dry_mid_scan_strands_the_agent() {
    let spec = WorldSpec {
        fuel: Some(4),
        ..rock_spec()
    };
    let mut world = build(&spec);

    let err = run_strip(&mut world, &config(3, 2), |_| {}).unwrap_err();

    let stranded = err
        .downcast_ref::<StrandedError>()
        .expect("stranded error");
    assert_eq!(
        *stranded,
        StrandedError {
            position: 1,
            failure: Failure::Blocked
        }
    );
    assert_eq!(world.fuel_level(), FuelLevel::Units(0));
}

#[test]
fn row_reports_carry_fuel_left() {
    let spec = WorldSpec {
        fuel: Some(100),
        ..rock_spec()
    };
    let mut world = build(&spec);
    let mut reports = Vec::new();

    run_strip(&mut world, &config(2, 2), |row| reports.push(*row)).expect("strip run");

    let fuel: Vec<FuelLevel> = reports.iter().map(|row| row.fuel).collect();
    assert_eq!(fuel, vec![FuelLevel::Units(95), FuelLevel::Units(90)]);
}
