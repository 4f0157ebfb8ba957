//! Survival search: pick the movement that keeps the character unfrozen.

use crate::constants::{SURVIVAL_HORIZON_TICKS, SURVIVAL_PRECHECK_TICKS};
use crate::input::{ControlInput, Direction};
use crate::replay::{advance_until, Fixed, ReplayError};
use crate::world::{ClientId, Fork, Simulation};

use super::{select_best, Candidate, Score};

/// Replay horizons of the survival search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurvivalParams {
    /// Ticks the live input is replayed before searching.
    pub precheck_ticks: u32,
    /// Ticks each candidate is replayed.
    pub horizon_ticks: u32,
}

impl Default for SurvivalParams {
    fn default() -> Self {
        Self {
            precheck_ticks: SURVIVAL_PRECHECK_TICKS,
            horizon_ticks: SURVIVAL_HORIZON_TICKS,
        }
    }
}

/// The part of the input the survival search controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Movement {
    /// Horizontal direction.
    pub direction: Direction,
    /// Hook held.
    pub hook: bool,
}

impl Movement {
    /// All six movements in enumeration order: each direction of
    /// [`Direction::ALL`] with the hook released, then held.
    pub fn all() -> impl Iterator<Item = Self> {
        Direction::ALL.into_iter().flat_map(|direction| {
            [false, true]
                .into_iter()
                .map(move |hook| Self { direction, hook })
        })
    }
}

/// What the survival search concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurvivalDecision {
    /// The live input already survives the pre-check horizon.
    AlreadySafe,
    /// This movement survives and should replace the live one.
    Apply(Candidate<Movement>),
    /// Every movement freezes; the latest freeze is reported.
    NoSafeInput {
        /// The best losing candidate.
        best: Option<Candidate<Movement>>,
    },
    /// The local character could not be replayed.
    Unavailable(ReplayError),
}

/// Decision plus the number of replays it took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurvivalOutcome {
    /// The decision.
    pub decision: SurvivalDecision,
    /// Replays performed, pre-check included.
    pub replays: u32,
}

impl SurvivalOutcome {
    /// Writes an [`SurvivalDecision::Apply`] movement into `input`.
    ///
    /// Only direction and hook change. Returns whether `input` was touched.
    pub const fn apply_to(&self, input: &mut ControlInput) -> bool {
        match self.decision {
            SurvivalDecision::Apply(candidate) => {
                let Movement { direction, hook } = candidate.hypothesis;
                *input = input.with_movement(direction, hook);
                true
            }
            SurvivalDecision::AlreadySafe
            | SurvivalDecision::NoSafeInput { .. }
            | SurvivalDecision::Unavailable(_) => false,
        }
    }
}

/// Replays `input` for `ticks`, stopping at the first freeze.
fn freeze_score<W: Simulation>(
    live: &W,
    local: ClientId,
    input: ControlInput,
    ticks: u32,
) -> Result<Score, ReplayError> {
    let mut fork = Fork::of(live);
    let trace = advance_until(&mut fork, local, ticks, &mut Fixed(input), |_, state| {
        state.is_frozen()
    })?;
    Ok(Score::from_trace(&trace))
}

/// Searches for a movement that keeps `local` unfrozen.
///
/// The live `input` is replayed first; when it survives the search ends
/// there. Otherwise the six movements are tried in order and the first that
/// survives wins. The live world is never modified.
#[must_use]
pub fn search<W: Simulation>(
    live: &W,
    local: ClientId,
    input: &ControlInput,
    params: SurvivalParams,
) -> SurvivalOutcome {
    let precheck = match freeze_score(live, local, *input, params.precheck_ticks) {
        Ok(score) => score,
        Err(err) => {
            log::debug!("survival search skipped: {err}");
            return SurvivalOutcome {
                decision: SurvivalDecision::Unavailable(err),
                replays: 0,
            };
        }
    };
    if precheck == Score::Survived {
        return SurvivalOutcome {
            decision: SurvivalDecision::AlreadySafe,
            replays: 1,
        };
    }
    log::debug!("live input scores {precheck:?}; searching movements");

    let mut replays = 1;
    let candidates = Movement::all().enumerate().map(|(index, movement)| {
        replays += 1;
        let hypothesis = input.with_movement(movement.direction, movement.hook);
        let score = freeze_score(live, local, hypothesis, params.horizon_ticks).unwrap_or_else(
            |err| {
                log::warn!("candidate {index} could not be replayed: {err}");
                Score::FrozeAt(0)
            },
        );
        Candidate {
            index,
            hypothesis: movement,
            score,
        }
    });
    let best = select_best(candidates);

    let decision = match best {
        Some(candidate) if candidate.score == Score::Survived => {
            log::debug!("applying {:?}", candidate.hypothesis);
            SurvivalDecision::Apply(candidate)
        }
        losing => SurvivalDecision::NoSafeInput { best: losing },
    };
    SurvivalOutcome { decision, replays }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movements_follow_enumeration_order() {
        let order: Vec<(Direction, bool)> =
            Movement::all().map(|m| (m.direction, m.hook)).collect();
        assert_eq!(
            order,
            vec![
                (Direction::Stop, false),
                (Direction::Stop, true),
                (Direction::Left, false),
                (Direction::Left, true),
                (Direction::Right, false),
                (Direction::Right, true),
            ]
        );
    }

    #[test]
    fn only_apply_touches_input() {
        let mut input = ControlInput::default();
        let refused = SurvivalOutcome {
            decision: SurvivalDecision::NoSafeInput { best: None },
            replays: 7,
        };
        assert!(!refused.apply_to(&mut input));
        assert_eq!(input, ControlInput::default());

        let applied = SurvivalOutcome {
            decision: SurvivalDecision::Apply(Candidate {
                index: 3,
                hypothesis: Movement {
                    direction: Direction::Left,
                    hook: true,
                },
                score: Score::Survived,
            }),
            replays: 5,
        };
        assert!(applied.apply_to(&mut input));
        assert_eq!(input.direction, Direction::Left);
        assert!(input.hook);
    }
}
