//! Wallshot search over laser launch angles, and the self-unfreeze shot
//! built on it.

use std::f32::consts::TAU;

use glam::{IVec2, Vec2};

use crate::collision::CollisionMap;
use crate::constants::{
    PHYSICAL_SIZE, UNFREEZE_FIRE_TICKS, UNFREEZE_SWITCH_TICKS, UNFREEZE_TARGET_TICKS,
    WALLSHOT_ANGLE_STEP,
};
use crate::geometry::{segment_circle_entry, trace_bounce, BounceModel, Segment};
use crate::input::{ControlInput, Weapon};
use crate::numeric::quantize_aim;
use crate::replay::predict;
use crate::world::{ClientId, Simulation};

/// Parameters of the launch-angle scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallshotParams {
    /// Wall hits the laser may make before reaching the target.
    pub bounces: u32,
    /// Angular step of the scan, in radians.
    pub angle_step: f32,
    /// Radius of the circle around the target that counts as a hit.
    pub radius: f32,
    /// How traced rays leave a wall.
    pub model: BounceModel,
}

impl Default for WallshotParams {
    fn default() -> Self {
        Self {
            bounces: 1,
            angle_step: WALLSHOT_ANGLE_STEP,
            radius: PHYSICAL_SIZE,
            model: BounceModel::default(),
        }
    }
}

/// A launch angle whose traced laser hits the target.
#[derive(Clone, Debug, PartialEq)]
pub struct WallshotSolution {
    /// Launch angle; the direction is `(sin angle, cos angle)`.
    pub angle: f32,
    /// Traced legs, starting in front of the shooter.
    pub trajectory: Vec<Segment>,
}

impl WallshotSolution {
    /// Aim vector along the first leg, as sent with the input.
    #[must_use]
    pub fn aim(&self) -> Option<IVec2> {
        self.trajectory
            .first()
            .map(|leg| quantize_aim(leg.delta()))
            .filter(|aim| *aim != IVec2::ZERO)
    }
}

/// Every launch angle in `[0, 2pi)` whose laser reaches `target`.
///
/// The laser starts one unit in front of `shooter` and travels
/// `laser_reach - PHYSICAL_SIZE` units. An angle qualifies when the leg at
/// index `bounces` enters the circle of `radius` around `target` at a point
/// on that leg. Solutions are returned in scan order.
#[must_use]
pub fn solutions<M: CollisionMap + ?Sized>(
    map: &M,
    shooter: Vec2,
    target: Vec2,
    laser_reach: f32,
    params: WallshotParams,
) -> Vec<WallshotSolution> {
    if !(params.angle_step.is_finite() && params.angle_step > 0.0) {
        return Vec::new();
    }
    let Ok(leg_index) = usize::try_from(params.bounces) else {
        return Vec::new();
    };
    let reach = laser_reach - PHYSICAL_SIZE;

    std::iter::successors(Some(0.0_f32), |angle| Some(angle + params.angle_step))
        .take_while(|angle| *angle < TAU)
        .filter_map(|angle| {
            let (sin, cos) = angle.sin_cos();
            let dir = Vec2::new(sin, cos);
            let trajectory = trace_bounce(
                map,
                shooter + dir,
                dir,
                reach,
                params.bounces,
                params.model,
            );
            let leg = trajectory.get(leg_index)?;
            segment_circle_entry(target, params.radius, leg)?;
            Some(WallshotSolution { angle, trajectory })
        })
        .collect()
}

/// Tick offsets and scan settings of the self-unfreeze shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnfreezeParams {
    /// Look-ahead at which a coming freeze triggers a laser switch.
    pub switch_ticks: u32,
    /// Look-ahead at which a coming freeze triggers the shot.
    pub fire_ticks: u32,
    /// Look-ahead used as the shot's target position.
    pub target_ticks: u32,
    /// Launch-angle scan settings.
    pub wallshot: WallshotParams,
}

impl Default for UnfreezeParams {
    fn default() -> Self {
        Self {
            switch_ticks: UNFREEZE_SWITCH_TICKS,
            fire_ticks: UNFREEZE_FIRE_TICKS,
            target_ticks: UNFREEZE_TARGET_TICKS,
            wallshot: WallshotParams::default(),
        }
    }
}

/// What the self-unfreeze shot decided this frame.
#[derive(Clone, Debug, PartialEq)]
pub enum UnfreezePlan {
    /// Nothing to do.
    Idle,
    /// Arm the laser ahead of a coming freeze.
    SwitchToLaser,
    /// About to freeze with the laser armed but no angle reaches.
    NoWallshot,
    /// Fire along the first leg of `solution`.
    Fire {
        /// Quantised aim along the first leg.
        aim: IVec2,
        /// The chosen wallshot.
        solution: WallshotSolution,
    },
}

impl UnfreezePlan {
    /// Writes the plan into `input`. Firing presses and releases, so the
    /// fire counter advances by two.
    pub const fn apply_to(&self, input: &mut ControlInput) {
        match self {
            Self::SwitchToLaser => input.wanted_weapon = Some(Weapon::Laser),
            Self::Fire { aim, .. } => {
                input.target = *aim;
                input.fire.bump(2);
            }
            Self::Idle | Self::NoWallshot => {}
        }
    }
}

/// Plans a laser shot that bounces back into `local` to thaw it.
///
/// Nothing happens while the character already sits in a freeze tile. A
/// freeze predicted `switch_ticks` ahead asks for the laser; with the laser
/// armed, a freeze tile predicted `fire_ticks` ahead fires at the position
/// predicted `target_ticks` ahead.
#[must_use]
pub fn plan_self_unfreeze<W: Simulation>(
    live: &W,
    local: ClientId,
    input: &ControlInput,
    weapon: Weapon,
    laser_reach: f32,
    params: UnfreezeParams,
) -> UnfreezePlan {
    let Some(now) = live.character(local) else {
        return UnfreezePlan::Idle;
    };
    if now.in_freeze_tile {
        return UnfreezePlan::Idle;
    }
    let ahead = |ticks| predict(live, local, ticks, *input).ok();
    let (Some(switch), Some(fire), Some(target)) = (
        ahead(params.switch_ticks),
        ahead(params.fire_ticks),
        ahead(params.target_ticks),
    ) else {
        return UnfreezePlan::Idle;
    };

    if switch.final_state.is_frozen() && weapon != Weapon::Laser {
        log::debug!("freeze predicted in {} ticks; arming laser", params.switch_ticks);
        return UnfreezePlan::SwitchToLaser;
    }
    if !(fire.final_state.in_freeze_tile && weapon == Weapon::Laser) {
        return UnfreezePlan::Idle;
    }
    let found = solutions(
        live.collision(),
        now.pos,
        target.final_state.pos,
        laser_reach,
        params.wallshot,
    );
    found
        .into_iter()
        .find_map(|solution| solution.aim().map(|aim| (aim, solution)))
        .map_or(UnfreezePlan::NoWallshot, |(aim, solution)| {
            log::debug!("self-unfreeze wallshot at angle {:.2}", solution.angle);
            UnfreezePlan::Fire { aim, solution }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::TileMap;

    #[test]
    fn fire_bumps_twice_and_aims() {
        let mut input = ControlInput::default();
        let plan = UnfreezePlan::Fire {
            aim: IVec2::new(10, -20),
            solution: WallshotSolution {
                angle: 0.0,
                trajectory: Vec::new(),
            },
        };
        plan.apply_to(&mut input);
        assert_eq!(input.target, IVec2::new(10, -20));
        assert_eq!(input.fire.get(), 2);
        assert_eq!(input.wanted_weapon, None);
    }

    #[test]
    fn switch_requests_laser_only() {
        let mut input = ControlInput::default();
        UnfreezePlan::SwitchToLaser.apply_to(&mut input);
        assert_eq!(input.wanted_weapon, Some(Weapon::Laser));
        assert_eq!(input.fire.get(), 0);
    }

    #[test]
    fn open_map_has_no_bounce_solutions() {
        let map = TileMap::new(20, 20);
        let found = solutions(
            &map,
            Vec2::new(100.0, 300.0),
            Vec2::new(300.0, 300.0),
            800.0,
            WallshotParams {
                model: BounceModel::Specular,
                ..WallshotParams::default()
            },
        );
        assert!(found.is_empty());
    }

    #[test]
    fn straight_shot_with_zero_bounces() {
        let map = TileMap::new(20, 20);
        let found = solutions(
            &map,
            Vec2::new(100.0, 300.0),
            Vec2::new(300.0, 300.0),
            800.0,
            WallshotParams {
                bounces: 0,
                ..WallshotParams::default()
            },
        );
        assert!(!found.is_empty());
        let first = found.first().expect("solution");
        assert!(first.trajectory.len() == 1);
        assert!(first.aim().is_some_and(|aim| aim.x > 0));
    }
}
