//! Per-frame composition of every assist.
//!
//! [`AssistEngine::update`] runs once per client frame, after the live
//! input has been sampled and before it is sent. The steps run in a fixed
//! order, each one seeing the input as the previous steps left it:
//!
//! 1. release a jump pressed by the previous frame
//! 2. spinbot
//! 3. stabilizer
//! 4. fly bot
//! 5. anti-falling-freeze
//! 6. anti-going-freeze
//! 7. survival search
//! 8. hook auto-aim
//! 9. self-unfreeze wallshot

use glam::{IVec2, Vec2};

use crate::assist::{
    anti_falling_freeze, anti_going_freeze, spinbot, stabilizer, AntiGoingMode, FlyBot, FlyKeys,
};
use crate::config::AssistConfig;
use crate::geometry::Segment;
use crate::input::Controls;
use crate::search::reach::{find_hook_aim, AimSolution};
use crate::search::survival::{self, SurvivalOutcome};
use crate::search::wallshot::{plan_self_unfreeze, UnfreezePlan};
use crate::target::{nearest, LiveSnapshot};
use crate::world::{CharacterState, ClientId, Simulation};

/// Everything the engine reads in one frame.
#[derive(Debug)]
pub struct Frame<'a, W> {
    /// The client's predicted world.
    pub world: &'a W,
    /// Player snapshot for target selection.
    pub snapshot: &'a LiveSnapshot,
    /// Local clock in seconds.
    pub time: f32,
    /// Arrow keys held this frame.
    pub keys: FlyKeys,
}

/// Hook aim chosen by the auto-aim step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HookAim {
    /// Player the aim was computed for.
    pub target: ClientId,
    /// The aim.
    pub solution: AimSolution,
}

/// What each step decided this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Local player the assists ran for; `None` when the frame was skipped.
    pub local: Option<ClientId>,
    /// A jump pressed last frame was released.
    pub released_jump: bool,
    /// Aim vector written by the spinbot.
    pub spin_aim: Option<IVec2>,
    /// Player the stabilizer walked towards.
    pub followed: Option<ClientId>,
    /// Anchor of the fly bot.
    pub fly_anchor: Option<Vec2>,
    /// Jump pressed to clear a freeze below.
    pub jumped_over_freeze: bool,
    /// Direction changed to avoid a freeze to the side.
    pub avoided_freeze: bool,
    /// Survival search result.
    pub survival: Option<SurvivalOutcome>,
    /// Hook aim that was applied.
    pub hook_aim: Option<HookAim>,
    /// Self-unfreeze decision.
    pub unfreeze: Option<UnfreezePlan>,
}

impl FrameReport {
    /// Legs of the wallshot fired this frame, for drawing.
    #[must_use]
    pub fn wallshot_trajectory(&self) -> Option<&[Segment]> {
        match &self.unfreeze {
            Some(UnfreezePlan::Fire { solution, .. }) => Some(&solution.trajectory),
            _ => None,
        }
    }
}

/// Runs the enabled assists against the active input slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssistEngine {
    config: AssistConfig,
    fly: FlyBot,
    release_jump: bool,
}

impl AssistEngine {
    /// Creates an engine with `config`.
    #[must_use]
    pub const fn new(config: AssistConfig) -> Self {
        Self {
            config,
            fly: FlyBot::new(),
            release_jump: false,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AssistConfig {
        &self.config
    }

    /// Replaces the configuration; state such as the fly anchor is kept.
    pub const fn set_config(&mut self, config: AssistConfig) {
        self.config = config;
    }

    /// Runs one frame of assists, rewriting the active slot of `controls`.
    ///
    /// Nothing beyond the pending jump release happens while there is no
    /// local player, while it is inactive or spectating, or when the world
    /// has no character for it. The live world is never advanced.
    pub fn update<W: Simulation>(&mut self, frame: &Frame<'_, W>, controls: &mut Controls) -> FrameReport {
        let mut report = FrameReport::default();
        if self.release_jump {
            controls.active_mut().input.jump = false;
            self.release_jump = false;
            report.released_jump = true;
        }

        let Some((local, state)) = eligible_local(frame) else {
            log::trace!("no eligible local character; assists idle");
            return report;
        };
        report.local = Some(local);

        self.movement_assists(frame, &state, controls, &mut report);
        self.searches(frame, local, controls, &mut report);
        report
    }

    fn movement_assists<W: Simulation>(
        &mut self,
        frame: &Frame<'_, W>,
        state: &CharacterState,
        controls: &mut Controls,
        report: &mut FrameReport,
    ) {
        let config = self.config;
        let slot = controls.active_mut();

        if config.spinbot.enabled {
            spinbot(slot, frame.time, &config.spinbot);
            report.spin_aim = Some(slot.input.target);
        }
        if config.stabilizer.enabled {
            report.followed = stabilizer(frame.snapshot, config.stabilizer.range, &mut slot.input);
        }
        if config.fly.enabled {
            self.fly.update(frame.keys, state, &mut slot.input);
            report.fly_anchor = self.fly.anchor();
        } else {
            self.fly.reset();
        }
        if config.anti_falling_freeze.enabled
            && anti_falling_freeze(frame.world.collision(), state, &mut slot.input)
        {
            self.release_jump = true;
            report.jumped_over_freeze = true;
        }
        if config.anti_going_freeze.mode != AntiGoingMode::Off {
            report.avoided_freeze = anti_going_freeze(
                frame.world.collision(),
                state,
                config.anti_going_freeze.range,
                config.anti_going_freeze.mode,
                &mut slot.input,
            );
        }
    }

    fn searches<W: Simulation>(
        &self,
        frame: &Frame<'_, W>,
        local: ClientId,
        controls: &mut Controls,
        report: &mut FrameReport,
    ) {
        let config = &self.config;
        let slot = controls.active_mut();

        if config.survival.enabled {
            let outcome = survival::search(frame.world, local, &slot.input, config.survival.params());
            outcome.apply_to(&mut slot.input);
            report.survival = Some(outcome);
        }

        if config.auto_aim.enabled {
            let aim = nearest(frame.snapshot, config.auto_aim.range).and_then(|target| {
                find_hook_aim(
                    frame.world,
                    local,
                    target,
                    &slot.input,
                    config.auto_aim.reach_params(),
                )
                .map(|solution| HookAim { target, solution })
            });
            if let Some(found) = aim {
                found
                    .solution
                    .apply_to(slot, config.auto_aim.silent, config.auto_aim.aim_distance);
                if config.auto_aim.autofire {
                    slot.input.fire.bump(1);
                }
            }
            report.hook_aim = aim;
        }

        if config.wallshot.enabled {
            let plan = plan_self_unfreeze(
                frame.world,
                local,
                &slot.input,
                frame.snapshot.local_weapon,
                frame.snapshot.laser_reach,
                config.wallshot.unfreeze_params(),
            );
            plan.apply_to(&mut slot.input);
            report.unfreeze = Some(plan);
        }
    }
}

fn eligible_local<W: Simulation>(frame: &Frame<'_, W>) -> Option<(ClientId, CharacterState)> {
    let player = frame.snapshot.local()?;
    if !player.active || player.spectating {
        return None;
    }
    let state = frame.world.character(player.id)?;
    Some((player.id, state))
}
