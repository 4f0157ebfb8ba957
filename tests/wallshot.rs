//! Laser wallshots and the self-unfreeze plan.
use foresight::geometry::BounceModel;
use foresight::input::{ControlInput, Direction, Weapon};
use foresight::search::wallshot::{plan_self_unfreeze, solutions, UnfreezeParams, UnfreezePlan, WallshotParams};
use foresight::sim::TeeWorld;
use foresight::world::ClientId;
use glam::Vec2;
use test_utils::maps::{ceiling_lane, freeze_lane, pillar_room};
use test_utils::{character, movement, standing_y, world_with};

const SHOOTER: Vec2 = Vec2::new(100.0, 300.0);
const TARGET: Vec2 = Vec2::new(300.0, 300.0);

fn params(model: BounceModel) -> WallshotParams {
    WallshotParams {
        model,
        ..WallshotParams::default()
    }
}

#[test]
fn specular_bounce_reaches_behind_the_pillar() {
    let found = solutions(
        pillar_room().as_ref(),
        SHOOTER,
        TARGET,
        800.0,
        params(BounceModel::Specular),
    );
    assert!(!found.is_empty());
    assert!(found.iter().all(|solution| solution.trajectory.len() == 2));

    let first = found.first().expect("at least one solution");
    let leg = first.trajectory.first().expect("first leg");
    assert!(leg.delta().x > 0.0);
    assert!(leg.delta().y < 0.0);
    assert!(first.aim().is_some());
}

#[test]
fn truncated_rays_never_bounce() {
    let found = solutions(
        pillar_room().as_ref(),
        SHOOTER,
        TARGET,
        800.0,
        params(BounceModel::Truncate),
    );
    assert!(found.is_empty());
}

#[test]
fn huge_reach_stays_bounded() {
    let found = solutions(
        pillar_room().as_ref(),
        SHOOTER,
        TARGET,
        3.0e9,
        params(BounceModel::Specular),
    );
    assert!(!found.is_empty());
    assert!(found.iter().all(|solution| solution.trajectory.len() <= 2));
}

#[test]
fn solutions_come_in_scan_order() {
    let found = solutions(
        pillar_room().as_ref(),
        SHOOTER,
        TARGET,
        800.0,
        params(BounceModel::Specular),
    );
    assert!(found.windows(2).all(|pair| match pair {
        [a, b] => a.angle < b.angle,
        _ => true,
    }));
}

fn walker(weapon: Weapon) -> (TeeWorld, ControlInput) {
    let input = movement(Direction::Right, false);
    let mut local = character(0, Vec2::new(62.0, standing_y(10)), input);
    local.weapon = weapon;
    (world_with(freeze_lane(), [local]), input)
}

#[test]
fn coming_freeze_arms_the_laser() {
    let (world, input) = walker(Weapon::Hammer);
    let plan = plan_self_unfreeze(
        &world,
        ClientId(0),
        &input,
        Weapon::Hammer,
        800.0,
        UnfreezeParams::default(),
    );
    assert_eq!(plan, UnfreezePlan::SwitchToLaser);

    let mut sent = input;
    plan.apply_to(&mut sent);
    assert_eq!(sent.wanted_weapon, Some(Weapon::Laser));
    assert_eq!(sent.fire, input.fire);
}

#[test]
fn armed_laser_waits_for_the_freeze_tile() {
    let (world, input) = walker(Weapon::Laser);
    let plan = plan_self_unfreeze(
        &world,
        ClientId(0),
        &input,
        Weapon::Laser,
        800.0,
        UnfreezeParams::default(),
    );
    assert_eq!(plan, UnfreezePlan::Idle);
}

#[test]
fn missing_local_plans_nothing() {
    let (world, input) = walker(Weapon::Laser);
    assert_eq!(
        plan_self_unfreeze(&world, ClientId(3), &input, Weapon::Laser, 800.0, UnfreezeParams::default()),
        UnfreezePlan::Idle
    );
}

/// Laser armed, walking right one tick short of the freeze in [`ceiling_lane`].
fn laser_walker() -> (TeeWorld, ControlInput) {
    let input = movement(Direction::Right, false);
    let mut local = character(0, Vec2::new(250.0, standing_y(4)), input);
    local.vel = Vec2::new(8.0, 0.0);
    local.weapon = Weapon::Laser;
    (world_with(ceiling_lane(), [local]), input)
}

fn plan_with(model: BounceModel) -> (UnfreezePlan, ControlInput) {
    let (world, input) = laser_walker();
    let plan = plan_self_unfreeze(
        &world,
        ClientId(0),
        &input,
        Weapon::Laser,
        800.0,
        UnfreezeParams {
            wallshot: params(model),
            ..UnfreezeParams::default()
        },
    );
    (plan, input)
}

#[test]
fn imminent_freeze_fires_a_bounced_shot() {
    let (plan, input) = plan_with(BounceModel::Specular);
    let UnfreezePlan::Fire { aim, solution } = &plan else {
        panic!("expected a shot, got {plan:?}");
    };
    assert_eq!(solution.trajectory.len(), 2);
    assert_eq!(solution.aim(), Some(*aim));

    let mut sent = input;
    plan.apply_to(&mut sent);
    assert_eq!(sent.target, *aim);
    assert_eq!(sent.fire.get(), 2);
    assert_eq!(sent.wanted_weapon, None);
}

#[test]
fn unbounced_rays_cannot_thaw() {
    let (plan, input) = plan_with(BounceModel::Truncate);
    assert_eq!(plan, UnfreezePlan::NoWallshot);

    let mut sent = input;
    plan.apply_to(&mut sent);
    assert_eq!(sent, input);
}
