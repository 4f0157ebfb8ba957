//! Hook reachability against open and walled floors.
use std::sync::Arc;

use foresight::collision::TileMap;
use foresight::input::ControlInput;
use foresight::search::reach::{can_hook, find_hook_aim, ReachParams};
use foresight::sim::TeeWorld;
use foresight::world::ClientId;
use glam::Vec2;
use rstest::rstest;
use test_utils::maps::{open_floor, walled_floor};
use test_utils::{character, standing_y, world_with};

fn duel(map: Arc<TileMap>) -> TeeWorld {
    world_with(
        map,
        [
            character(0, Vec2::new(96.0, standing_y(10)), ControlInput::default()),
            character(1, Vec2::new(256.0, standing_y(10)), ControlInput::default()),
        ],
    )
}

#[test]
fn finds_an_aim_across_open_floor() {
    let world = duel(open_floor(10));
    let input = ControlInput::default();
    let solution = find_hook_aim(&world, ClientId(0), ClientId(1), &input, ReachParams::default())
        .expect("target in reach");

    assert!(solution.direction.x > 0.0);
    assert!(solution.tick <= ReachParams::default().hook_ticks);
    let aimed = ControlInput {
        target: solution.target,
        hook: true,
        ..input
    };
    assert!(can_hook(&world, ClientId(0), &aimed, ReachParams::default().hook_ticks));
}

#[test]
fn a_wall_blocks_every_aim() {
    let world = duel(walled_floor());
    assert_eq!(
        find_hook_aim(
            &world,
            ClientId(0),
            ClientId(1),
            &ControlInput::default(),
            ReachParams::default()
        ),
        None
    );
}

#[rstest]
#[case::missing_local(ClientId(7), ClientId(1))]
#[case::missing_target(ClientId(0), ClientId(7))]
fn missing_characters_yield_nothing(#[case] local: ClientId, #[case] target: ClientId) {
    let world = duel(open_floor(10));
    assert!(find_hook_aim(&world, local, target, &ControlInput::default(), ReachParams::default())
        .is_none());
}

#[test]
fn the_search_leaves_the_live_world_alone() {
    let world = duel(open_floor(10));
    let before = world.clone();
    let found = find_hook_aim(
        &world,
        ClientId(0),
        ClientId(1),
        &ControlInput::default(),
        ReachParams::default(),
    );
    assert!(found.is_some());
    assert_eq!(world, before);
}

#[test]
fn the_hook_horizon_counts_physics_steps() {
    let world = duel(open_floor(10));
    let params = ReachParams::default();
    let solution = find_hook_aim(&world, ClientId(0), ClientId(1), &ControlInput::default(), params)
        .expect("target in reach");
    let aimed = ControlInput {
        target: solution.target,
        ..ControlInput::default()
    };
    assert!(can_hook(&world, ClientId(0), &aimed, solution.tick));
    assert!(!can_hook(&world, ClientId(0), &aimed, solution.tick - 1));
}
