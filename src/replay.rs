//! Tick replay driver.
//!
//! Advances a [`Fork`] tick by tick, feeding the tracked character an input
//! chosen by an [`InputPolicy`], and records what happened to it.

use glam::Vec2;
use thiserror::Error;

use crate::input::ControlInput;
use crate::world::{CharacterState, ClientId, Fork, Simulation};

/// Errors raised by the replay driver.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReplayError {
    /// The tracked character is not in the forked world.
    #[error("character {0} is not in the world")]
    MissingCharacter(ClientId),
}

/// Chooses the input for each replayed tick.
pub trait InputPolicy {
    /// Input for replay tick `tick`, counted from one.
    fn input_for(&mut self, tick: u32) -> ControlInput;
}

/// The same input on every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fixed(pub ControlInput);

impl InputPolicy for Fixed {
    fn input_for(&mut self, _tick: u32) -> ControlInput {
        self.0
    }
}

/// A recorded input sequence; the last entry repeats once it runs out.
#[derive(Clone, Copy, Debug)]
pub struct Recorded<'a>(pub &'a [ControlInput]);

impl InputPolicy for Recorded<'_> {
    fn input_for(&mut self, tick: u32) -> ControlInput {
        let index = usize::try_from(tick.saturating_sub(1)).unwrap_or(usize::MAX);
        self.0
            .get(index)
            .or_else(|| self.0.last())
            .copied()
            .unwrap_or_default()
    }
}

/// Policy backed by a closure; see [`from_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FromFn<F>(F);

impl<F: FnMut(u32) -> ControlInput> InputPolicy for FromFn<F> {
    fn input_for(&mut self, tick: u32) -> ControlInput {
        (self.0)(tick)
    }
}

/// Wraps a closure mapping the tick number to an input.
#[must_use]
pub const fn from_fn<F: FnMut(u32) -> ControlInput>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// What happened to the tracked character during a replay.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayTrace {
    /// Ticks actually simulated.
    pub ticks_run: u32,
    /// First tick the character was frozen.
    pub first_freeze: Option<u32>,
    /// First tick the character's hook held another player.
    pub first_attach: Option<u32>,
    /// Tick at which the stop predicate ended the replay.
    pub stopped_at: Option<u32>,
    /// Tick at which the character disappeared from the world.
    pub removed_at: Option<u32>,
    /// Position after each simulated tick.
    pub path: Vec<Vec2>,
    /// Last observed state.
    pub final_state: CharacterState,
}

impl ReplayTrace {
    /// Whether the character stayed unfrozen for the whole replay.
    #[must_use]
    pub const fn survived(&self) -> bool {
        self.first_freeze.is_none() && self.removed_at.is_none()
    }
}

/// Advances `fork` by up to `ticks` ticks under `policy`.
///
/// # Errors
///
/// Returns [`ReplayError::MissingCharacter`] without simulating anything
/// when `tracked` is not in the fork.
pub fn advance<W, P>(
    fork: &mut Fork<W>,
    tracked: ClientId,
    ticks: u32,
    policy: &mut P,
) -> Result<ReplayTrace, ReplayError>
where
    W: Simulation,
    P: InputPolicy + ?Sized,
{
    advance_until(fork, tracked, ticks, policy, |_, _| false)
}

/// Like [`advance`], but stops after the first tick for which `stop`
/// returns `true`.
///
/// # Errors
///
/// Returns [`ReplayError::MissingCharacter`] without simulating anything
/// when `tracked` is not in the fork.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use glam::Vec2;
/// use foresight::collision::TileMap;
/// use foresight::input::ControlInput;
/// use foresight::replay::{advance_until, Fixed};
/// use foresight::sim::{Character, TeeWorld};
/// use foresight::world::{ClientId, Fork};
///
/// let mut live = TeeWorld::new(Arc::new(TileMap::new(10, 10)));
/// live.spawn(Character::new(ClientId(0), Vec2::new(160.0, 32.0)));
///
/// let mut fork = Fork::of(&live);
/// let trace = advance_until(
///     &mut fork,
///     ClientId(0),
///     50,
///     &mut Fixed(ControlInput::default()),
///     |_, state| state.pos.y > 64.0,
/// )
/// .unwrap();
/// assert!(trace.stopped_at.is_some());
/// assert_eq!(fork.ticks_advanced(), u64::from(trace.ticks_run));
/// ```
pub fn advance_until<W, P, S>(
    fork: &mut Fork<W>,
    tracked: ClientId,
    ticks: u32,
    policy: &mut P,
    mut stop: S,
) -> Result<ReplayTrace, ReplayError>
where
    W: Simulation,
    P: InputPolicy + ?Sized,
    S: FnMut(u32, &CharacterState) -> bool,
{
    let world = fork.world_mut();
    let mut last = world
        .character(tracked)
        .ok_or(ReplayError::MissingCharacter(tracked))?;
    let mut trace = ReplayTrace {
        ticks_run: 0,
        first_freeze: None,
        first_attach: None,
        stopped_at: None,
        removed_at: None,
        path: Vec::with_capacity(usize::try_from(ticks).unwrap_or_default()),
        final_state: last,
    };

    for tick in 1..=ticks {
        let input = policy.input_for(tick);
        if !world.apply_input(tracked, &input) {
            trace.removed_at = Some(tick);
            break;
        }
        world.begin_tick();
        world.tick();
        trace.ticks_run = tick;

        let Some(state) = world.character(tracked) else {
            trace.removed_at = Some(tick);
            break;
        };
        last = state;
        trace.path.push(state.pos);
        if state.is_frozen() && trace.first_freeze.is_none() {
            trace.first_freeze = Some(tick);
        }
        if state.is_attached() && trace.first_attach.is_none() {
            trace.first_attach = Some(tick);
        }
        if stop(tick, &state) {
            trace.stopped_at = Some(tick);
            break;
        }
    }

    trace.final_state = last;
    Ok(trace)
}

/// Forks `live` and replays `tracked` for `ticks` ticks of `input`.
///
/// # Errors
///
/// Returns [`ReplayError::MissingCharacter`] when `tracked` is absent.
pub fn predict<W: Simulation>(
    live: &W,
    tracked: ClientId,
    ticks: u32,
    input: ControlInput,
) -> Result<ReplayTrace, ReplayError> {
    advance(&mut Fork::of(live), tracked, ticks, &mut Fixed(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::collision::TileMap;
    use crate::input::Direction;
    use crate::world::HookState;
    use rstest::rstest;

    /// One character that stops accepting input from tick `refuses_at`.
    #[derive(Clone, Debug)]
    struct Refusing {
        map: Arc<TileMap>,
        tick: u64,
        refuses_at: u64,
    }

    impl Simulation for Refusing {
        type Map = TileMap;

        fn game_tick(&self) -> u64 {
            self.tick
        }

        fn tick_speed(&self) -> u32 {
            50
        }

        fn collision(&self) -> &TileMap {
            &self.map
        }

        fn character(&self, id: ClientId) -> Option<CharacterState> {
            (id == ClientId(0)).then_some(CharacterState {
                id,
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                freeze_ticks: 0,
                in_freeze_tile: false,
                deep_frozen: false,
                hook: HookState::Idle,
                hook_pos: Vec2::ZERO,
                hooked_player: None,
            })
        }

        fn apply_input(&mut self, id: ClientId, _input: &ControlInput) -> bool {
            id == ClientId(0) && self.tick < self.refuses_at
        }

        fn begin_tick(&mut self) {
            self.tick += 1;
        }

        fn tick(&mut self) {}
    }

    #[test]
    fn refused_input_does_not_advance_the_fork() {
        let live = Refusing {
            map: Arc::new(TileMap::new(2, 2)),
            tick: 0,
            refuses_at: 2,
        };
        let mut fork = Fork::of(&live);
        let trace = advance(&mut fork, ClientId(0), 5, &mut Fixed(ControlInput::default()))
            .unwrap();
        assert_eq!(trace.removed_at, Some(3));
        assert_eq!(trace.ticks_run, 2);
        assert_eq!(fork.ticks_advanced(), u64::from(trace.ticks_run));
    }

    fn input(direction: Direction) -> ControlInput {
        ControlInput {
            direction,
            ..ControlInput::default()
        }
    }

    #[rstest]
    #[case::first(1, Direction::Left)]
    #[case::second(2, Direction::Right)]
    #[case::repeats_last(9, Direction::Right)]
    fn recorded_repeats_last_entry(#[case] tick: u32, #[case] expected: Direction) {
        let inputs = [input(Direction::Left), input(Direction::Right)];
        assert_eq!(Recorded(&inputs).input_for(tick).direction, expected);
    }

    #[test]
    fn empty_recording_is_default_input() {
        assert_eq!(Recorded(&[]).input_for(3), ControlInput::default());
    }

    #[test]
    fn closures_see_the_tick_number() {
        let mut policy = from_fn(|tick| {
            if tick % 2 == 0 {
                input(Direction::Left)
            } else {
                input(Direction::Stop)
            }
        });
        assert_eq!(policy.input_for(1).direction, Direction::Stop);
        assert_eq!(policy.input_for(2).direction, Direction::Left);
    }
}
