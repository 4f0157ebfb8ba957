//! Behavioural tests for the survival search.
//!
//! Each scenario replays the local character on forks of a small world and
//! checks both the decision and how many replays it cost.
use foresight::input::{ControlInput, Direction};
use foresight::search::survival::{search, SurvivalDecision, SurvivalOutcome, SurvivalParams};
use foresight::search::Score;
use foresight::sim::TeeWorld;
use foresight::world::ClientId;
use glam::{IVec2, Vec2};
use test_utils::maps::{freeze_lane, freeze_pit};
use test_utils::{character, movement, standing_y, world_with};

#[derive(Clone, Debug)]
struct Env {
    world: TeeWorld,
    input: ControlInput,
    outcome: Option<SurvivalOutcome>,
}

impl Default for Env {
    fn default() -> Self {
        let input = ControlInput::default();
        Self {
            world: world_with(
                freeze_lane(),
                [character(0, Vec2::new(48.0, standing_y(10)), input)],
            ),
            input,
            outcome: None,
        }
    }
}

impl Env {
    fn run(&mut self) {
        let outcome = search(&self.world, ClientId(0), &self.input, SurvivalParams::default());
        outcome.apply_to(&mut self.input);
        self.outcome = Some(outcome);
    }

    fn outcome(&self) -> SurvivalOutcome {
        self.outcome.expect("search has run")
    }
}

#[test]
fn survival_search_on_a_freeze_lane() {
    rspec::run(&rspec::given(
        "a character standing left of a freeze tile",
        Env::default(),
        |ctx| {
            ctx.when("it keeps standing still", |ctx| {
                ctx.before_each(|env| {
                    env.input = movement(Direction::Stop, false);
                    env.run();
                });

                ctx.then("the pre-check alone decides", |env| {
                    assert_eq!(env.outcome().decision, SurvivalDecision::AlreadySafe);
                    assert_eq!(env.outcome().replays, 1);
                });

                ctx.then("the input is left alone", |env| {
                    assert_eq!(env.input, movement(Direction::Stop, false));
                });
            });

            ctx.when("it walks right into the freeze", |ctx| {
                ctx.before_each(|env| {
                    env.input = ControlInput {
                        target: IVec2::new(64, 0),
                        ..movement(Direction::Right, false)
                    };
                    env.run();
                });

                ctx.then("the first surviving movement is applied", |env| {
                    let SurvivalDecision::Apply(candidate) = env.outcome().decision else {
                        panic!("expected a movement, got {:?}", env.outcome().decision);
                    };
                    assert_eq!(candidate.index, 0);
                    assert_eq!(candidate.score, Score::Survived);
                    assert_eq!(env.outcome().replays, 2);
                });

                ctx.then("only movement and hook change", |env| {
                    assert_eq!(env.input.direction, Direction::Stop);
                    assert!(!env.input.hook);
                    assert_eq!(env.input.target, IVec2::new(64, 0));
                });
            });
        },
    ));
}

#[test]
fn survival_search_over_a_freeze_pit() {
    rspec::run(&rspec::given(
        "a character falling towards a floor of freeze",
        Env {
            world: world_with(
                freeze_pit(),
                [character(0, Vec2::new(320.0, 200.0), ControlInput::default())],
            ),
            input: ControlInput {
                target: IVec2::new(0, -64),
                ..ControlInput::default()
            },
            outcome: None,
        },
        |ctx| {
            ctx.before_each(Env::run);

            ctx.then("every movement is tried", |env| {
                assert_eq!(env.outcome().replays, 7);
            });

            ctx.then("no safe input is reported", |env| {
                assert!(matches!(
                    env.outcome().decision,
                    SurvivalDecision::NoSafeInput { best: Some(_) }
                ));
            });

            ctx.then("the input is unchanged", |env| {
                assert_eq!(env.input.direction, Direction::Stop);
                assert_eq!(env.input.target, IVec2::new(0, -64));
            });
        },
    ));
}

#[test]
fn missing_local_is_unavailable() {
    let env = Env::default();
    let outcome = search(&env.world, ClientId(4), &env.input, SurvivalParams::default());
    assert!(matches!(outcome.decision, SurvivalDecision::Unavailable(_)));
    assert_eq!(outcome.replays, 0);
}

#[test]
fn survival_search_above_a_freeze_tile() {
    let mut falling = character(0, Vec2::new(144.0, 232.0), ControlInput::default());
    falling.vel = Vec2::new(0.0, 4.0);
    rspec::run(&rspec::given(
        "a character dropping straight onto a freeze tile",
        Env {
            world: world_with(freeze_lane(), [falling]),
            input: ControlInput::default(),
            outcome: None,
        },
        |ctx| {
            ctx.before_each(Env::run);

            ctx.then("stopping still freezes, so a later movement wins", |env| {
                let SurvivalDecision::Apply(candidate) = env.outcome().decision else {
                    panic!("expected a movement, got {:?}", env.outcome().decision);
                };
                assert_eq!(candidate.index, 2);
                assert_eq!(candidate.score, Score::Survived);
            });

            ctx.then("the search stops at the first survivor", |env| {
                assert_eq!(env.outcome().replays, 4);
            });

            ctx.then("it steers left without hooking", |env| {
                assert_eq!(env.input.direction, Direction::Left);
                assert!(!env.input.hook);
            });
        },
    ));
}
