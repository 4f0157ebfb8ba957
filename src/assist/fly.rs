use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::FLY_ANCHOR_RESET_DISTANCE;
use crate::input::{ControlInput, Direction};
use crate::world::{CharacterState, HookState};

/// Arrow keys held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyKeys {
    /// Raise the anchor.
    pub up: bool,
    /// Lower the anchor.
    pub down: bool,
    /// Move the anchor left.
    pub left: bool,
    /// Move the anchor right.
    pub right: bool,
}

impl FlyKeys {
    /// One-unit anchor nudge; up wins over down, down over left, left over
    /// right.
    #[must_use]
    pub const fn nudge(self) -> Vec2 {
        if self.up {
            Vec2::NEG_Y
        } else if self.down {
            Vec2::Y
        } else if self.left {
            Vec2::NEG_X
        } else if self.right {
            Vec2::X
        } else {
            Vec2::ZERO
        }
    }
}

/// Toggles the hook so that a grabbed hook is released and immediately
/// thrown again.
///
/// A held hook that is not flying is released; a released hook is pressed.
pub fn ungrab_fast_hook(input: &mut ControlInput, hook: HookState) {
    if !input.hook {
        input.hook = true;
    } else if hook != HookState::Flying {
        input.hook = false;
    }
}

/// Hovers the character around an anchor point using the hook.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlyBot {
    anchor: Option<Vec2>,
}

impl FlyBot {
    /// A fly bot without an anchor.
    #[must_use]
    pub const fn new() -> Self {
        Self { anchor: None }
    }

    /// Current anchor, once the bot has run.
    #[must_use]
    pub const fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Forgets the anchor; the next update re-anchors at the character.
    pub const fn reset(&mut self) {
        self.anchor = None;
    }

    /// Steers `input` towards the anchor.
    ///
    /// The first update anchors at the character. Keys nudge the anchor by
    /// one unit, and an anchor further than 50 units away snaps back to the
    /// character. Above the anchor the hook is released; below it the hook
    /// is re-thrown with [`ungrab_fast_hook`].
    pub fn update(&mut self, keys: FlyKeys, local: &CharacterState, input: &mut ControlInput) {
        let nudged = self.anchor.map_or(local.pos, |anchor| anchor + keys.nudge());
        let anchor = if nudged.distance(local.pos) > FLY_ANCHOR_RESET_DISTANCE {
            local.pos
        } else {
            nudged
        };
        self.anchor = Some(anchor);

        if local.pos.y <= anchor.y {
            input.hook = false;
        } else {
            ungrab_fast_hook(input, local.hook);
        }
        input.direction = if anchor.x <= local.pos.x {
            Direction::Left
        } else {
            Direction::Right
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Character;
    use crate::world::ClientId;
    use rstest::rstest;

    fn state_at(pos: Vec2, hook: HookState) -> CharacterState {
        CharacterState {
            hook,
            ..Character::new(ClientId(0), pos).state()
        }
    }

    #[rstest]
    #[case::presses_released(false, HookState::Idle, true)]
    #[case::keeps_flying(true, HookState::Flying, true)]
    #[case::releases_grabbed(true, HookState::Grabbed, false)]
    #[case::releases_retracted(true, HookState::Retracted, false)]
    fn ungrab_toggles(#[case] held: bool, #[case] state: HookState, #[case] expected: bool) {
        let mut input = ControlInput {
            hook: held,
            ..ControlInput::default()
        };
        ungrab_fast_hook(&mut input, state);
        assert_eq!(input.hook, expected);
    }

    #[rstest]
    #[case::up(FlyKeys { up: true, down: true, ..FlyKeys::default() }, Vec2::NEG_Y)]
    #[case::down(FlyKeys { down: true, left: true, ..FlyKeys::default() }, Vec2::Y)]
    #[case::left(FlyKeys { left: true, right: true, ..FlyKeys::default() }, Vec2::NEG_X)]
    #[case::right(FlyKeys { right: true, ..FlyKeys::default() }, Vec2::X)]
    #[case::none(FlyKeys::default(), Vec2::ZERO)]
    fn key_precedence(#[case] keys: FlyKeys, #[case] expected: Vec2) {
        assert_eq!(keys.nudge(), expected);
    }

    #[test]
    fn first_update_anchors_at_the_character() {
        let mut bot = FlyBot::new();
        let mut input = ControlInput {
            hook: true,
            ..ControlInput::default()
        };
        let here = Vec2::new(100.0, 100.0);
        bot.update(FlyKeys { up: true, ..FlyKeys::default() }, &state_at(here, HookState::Grabbed), &mut input);
        assert_eq!(bot.anchor(), Some(here));
        assert!(!input.hook);
        assert_eq!(input.direction, Direction::Left);
    }

    #[test]
    fn below_the_anchor_rethrows_the_hook() {
        let mut bot = FlyBot::new();
        let mut input = ControlInput::default();
        let here = Vec2::new(100.0, 100.0);
        bot.update(FlyKeys::default(), &state_at(here, HookState::Idle), &mut input);

        let lower = Vec2::new(90.0, 110.0);
        bot.update(FlyKeys::default(), &state_at(lower, HookState::Idle), &mut input);
        assert!(input.hook);
        assert_eq!(input.direction, Direction::Right);
    }

    #[test]
    fn distant_anchor_snaps_back() {
        let mut bot = FlyBot::new();
        let mut input = ControlInput::default();
        bot.update(FlyKeys::default(), &state_at(Vec2::new(100.0, 100.0), HookState::Idle), &mut input);
        let far = Vec2::new(200.0, 100.0);
        bot.update(FlyKeys::default(), &state_at(far, HookState::Idle), &mut input);
        assert_eq!(bot.anchor(), Some(far));

        bot.reset();
        assert_eq!(bot.anchor(), None);
    }
}
