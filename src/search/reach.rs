//! Hook-reachability search: find an aim that lets the hook grab a player.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{IVec2, Vec2};

use crate::constants::{AIM_DISTANCE, HOOK_REACH_TICKS, HOOK_SCAN_STEP, PHYSICAL_SIZE};
use crate::geometry::bearing;
use crate::input::{ControlInput, ControlSlot};
use crate::numeric::quantize_aim;
use crate::replay::{advance_until, Fixed};
use crate::vector_math::try_normalize;
use crate::world::{ClientId, Fork, Simulation};

/// Sampling parameters of the reachability scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReachParams {
    /// Angular step between aim candidates, in radians.
    pub scan_step: f32,
    /// Radius of the circle of aim points around the target.
    pub aim_offset: f32,
    /// Ticks the hook is given to attach.
    pub hook_ticks: u32,
    /// Length the aim vector is scaled to before quantisation.
    pub aim_distance: f32,
}

impl Default for ReachParams {
    fn default() -> Self {
        Self {
            scan_step: HOOK_SCAN_STEP,
            aim_offset: PHYSICAL_SIZE,
            hook_ticks: HOOK_REACH_TICKS,
            aim_distance: AIM_DISTANCE,
        }
    }
}

/// An aim that hooks the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimSolution {
    /// Unit aim direction.
    pub direction: Vec2,
    /// Quantised aim vector sent with the input.
    pub target: IVec2,
    /// Replay tick at which the hook attached.
    pub tick: u32,
    /// Scan index of the winning angle.
    pub index: usize,
}

impl AimSolution {
    /// Writes the aim into `slot`.
    ///
    /// Silent aim changes only the transmitted aim vector; otherwise the
    /// cursor is moved and the client derives the aim from it.
    pub fn apply_to(&self, slot: &mut ControlSlot, silent: bool, aim_distance: f32) {
        if silent {
            slot.input.target = self.target;
        } else {
            slot.mouse = self.direction * aim_distance;
        }
    }
}

/// Replay tick at which `input`, with the hook held, attaches to a player.
fn attach_tick<W: Simulation>(
    live: &W,
    local: ClientId,
    input: &ControlInput,
    ticks: u32,
) -> Option<u32> {
    let hooked = ControlInput {
        hook: true,
        ..*input
    };
    let mut fork = Fork::of(live);
    match advance_until(&mut fork, local, ticks, &mut Fixed(hooked), |_, state| {
        state.is_attached()
    }) {
        Ok(trace) => trace.first_attach,
        Err(err) => {
            log::trace!("hook replay skipped: {err}");
            None
        }
    }
}

/// Whether holding the hook with `input` grabs a player within `ticks`.
#[must_use]
pub fn can_hook<W: Simulation>(live: &W, local: ClientId, input: &ControlInput, ticks: u32) -> bool {
    attach_tick(live, local, input, ticks).is_some()
}

/// Scans aims around `target` and returns the first that hooks a player.
///
/// Aim points lie on a circle of `aim_offset` around the target, starting a
/// quarter turn from the bearing to it and sweeping half a turn. Returns
/// `None` when either character is missing or no aim attaches.
#[must_use]
pub fn find_hook_aim<W: Simulation>(
    live: &W,
    local: ClientId,
    target: ClientId,
    input: &ControlInput,
    params: ReachParams,
) -> Option<AimSolution> {
    if !(params.scan_step.is_finite() && params.scan_step > 0.0) {
        return None;
    }
    let from = live.character(local)?.pos;
    let goal = live.character(target)?.pos;
    let start = bearing(goal - from) + FRAC_PI_2;

    std::iter::successors(Some(0.0_f32), |offset| Some(offset + params.scan_step))
        .take_while(|offset| *offset < PI)
        .enumerate()
        .find_map(|(index, offset)| {
            let aim_point = goal + Vec2::from_angle(start + offset) * params.aim_offset;
            let direction = try_normalize(aim_point - from)?;
            let candidate = ControlInput {
                target: quantize_aim(direction * params.aim_distance),
                ..*input
            };
            let tick = attach_tick(live, local, &candidate, params.hook_ticks)?;
            log::debug!("hook aim {index} reaches {target} at tick {tick}");
            Some(AimSolution {
                direction,
                target: candidate.target,
                tick,
                index,
            })
        })
}
