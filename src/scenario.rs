//! Scenario files for the command-line runner.
//!
//! A scenario describes a map, the characters on it and which of them is
//! local. A [`Session`] turns it into a live [`TeeWorld`] and steps it
//! frame by frame, running the [`AssistEngine`] before each tick exactly
//! as a client would.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::assist::FlyKeys;
use crate::collision::TileMap;
use crate::constants::MAX_CLIENTS;
use crate::engine::{AssistEngine, Frame, FrameReport};
use crate::input::{Controls, Weapon};
use crate::sim::{Character, TeeWorld, Tuning};
use crate::world::{CharacterState, ClientId, Simulation};

/// Errors raised while loading or building a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a valid scenario.
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    /// Two characters share a slot.
    #[error("character {0} is listed twice")]
    DuplicateCharacter(ClientId),
    /// A character sits in a slot the game does not have.
    #[error("character {0} is outside the player slots")]
    SlotOutOfRange(ClientId),
    /// The local slot names no listed character.
    #[error("local character {0} is not listed")]
    UnknownLocal(ClientId),
}

const fn default_frames() -> u32 {
    100
}

/// A scenario as read from JSON.
///
/// ```
/// use foresight::scenario::Scenario;
///
/// let text = serde_json::json!({
///     "map": { "rows": ["....", "####"] },
///     "characters": [{ "id": 0, "pos": [48.0, 17.5] }],
///     "local": 0,
///     "frames": 3
/// })
/// .to_string();
/// let scenario = Scenario::from_json(&text).unwrap();
/// let session = scenario.into_session().unwrap();
/// assert_eq!(session.frames(), 3);
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    /// Tile map, given as rows of tile symbols.
    pub map: TileMap,
    /// Physics tuning; defaults apply to missing fields.
    #[serde(default)]
    pub tuning: Tuning,
    /// Characters present at the start.
    #[serde(default)]
    pub characters: Vec<Character>,
    /// Slot the assists control.
    #[serde(default)]
    pub local: Option<ClientId>,
    /// Weapon armed by the local character, overriding its own.
    #[serde(default)]
    pub weapon: Option<Weapon>,
    /// Frames to run.
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Arrow keys held on every frame.
    #[serde(default)]
    pub keys: FlyKeys,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Json`] for malformed JSON or a bad map.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] when the file cannot be read and
    /// [`ScenarioError::Json`] when it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Builds the live world and the local player's controls.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::SlotOutOfRange`] for a slot past
    /// [`MAX_CLIENTS`], [`ScenarioError::DuplicateCharacter`] when two
    /// characters share a slot and [`ScenarioError::UnknownLocal`] when `local` names
    /// no character.
    pub fn into_session(self) -> Result<Session, ScenarioError> {
        let mut world = TeeWorld::new(Arc::new(self.map)).with_tuning(self.tuning);
        for character in self.characters {
            if character.id.0 >= MAX_CLIENTS {
                return Err(ScenarioError::SlotOutOfRange(character.id));
            }
            if world.get(character.id).is_some() {
                return Err(ScenarioError::DuplicateCharacter(character.id));
            }
            world.spawn(character);
        }

        let mut controls = Controls::default();
        if let Some(id) = self.local {
            let local = world.get_mut(id).ok_or(ScenarioError::UnknownLocal(id))?;
            if let Some(weapon) = self.weapon {
                local.weapon = weapon;
            }
            controls = Controls::with_primary(local.input);
        }

        Ok(Session {
            world,
            controls,
            local: self.local,
            frames: self.frames,
            keys: self.keys,
        })
    }
}

/// What happened during one frame of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSummary {
    /// Game tick after the frame.
    pub tick: u64,
    /// Local character after the tick, if present.
    pub local: Option<CharacterState>,
    /// Engine decisions taken before the tick.
    pub report: FrameReport,
}

/// A running scenario.
#[derive(Clone, Debug)]
pub struct Session {
    world: TeeWorld,
    controls: Controls,
    local: Option<ClientId>,
    frames: u32,
    keys: FlyKeys,
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Game ticks stay far below the f32 mantissa during a session."
)]
fn seconds(tick: u64, tick_speed: u32) -> f32 {
    tick as f32 / tick_speed.max(1) as f32
}

impl Session {
    /// The live world.
    #[must_use]
    pub const fn world(&self) -> &TeeWorld {
        &self.world
    }

    /// Input buffers as the engine last left them.
    #[must_use]
    pub const fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Frames the scenario asks for.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    /// Runs the engine on the current state, sends the resulting input and
    /// advances the live world by one tick.
    pub fn step(&mut self, engine: &mut AssistEngine) -> FrameSummary {
        let snapshot = self.world.snapshot(self.local);
        let frame = Frame {
            world: &self.world,
            snapshot: &snapshot,
            time: seconds(self.world.game_tick(), self.world.tick_speed()),
            keys: self.keys,
        };
        let report = engine.update(&frame, &mut self.controls);

        self.world.begin_tick();
        if let Some(id) = self.local {
            let input = self.controls.active().input;
            if !self.world.apply_input(id, &input) {
                log::debug!("local character {id} left the world");
            }
        }
        self.world.tick();

        FrameSummary {
            tick: self.world.game_tick(),
            local: self.local.and_then(|id| self.world.character(id)),
            report,
        }
    }

    /// Steps `frames` times, collecting every summary.
    pub fn run(&mut self, engine: &mut AssistEngine, frames: u32) -> Vec<FrameSummary> {
        (0..frames).map(|_| self.step(engine)).collect()
    }
}
