//! The bundled demo scenario and configuration load and run.
use std::path::PathBuf;

use foresight::config::AssistConfig;
use foresight::geometry::BounceModel;
use foresight::scenario::{Scenario, ScenarioError};
use foresight::AssistEngine;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn demo_config_enables_the_listed_assists() {
    let config = AssistConfig::load(demo("assists.json")).expect("demo config");
    assert!(config.survival.enabled);
    assert!(config.auto_aim.silent);
    assert!(config.wallshot.enabled);
    assert_eq!(config.wallshot.bounce_model, BounceModel::Specular);
    assert!(!config.spinbot.enabled);
}

#[test]
fn demo_scenario_stays_out_of_freeze_with_assists() {
    let scenario = Scenario::load(demo("freeze_lane.json")).expect("demo scenario");
    let mut session = scenario.into_session().expect("session");
    let config = AssistConfig::load(demo("assists.json")).expect("demo config");
    let mut engine = AssistEngine::new(config);

    let summaries = session.run(&mut engine, session.frames());

    assert_eq!(summaries.len(), 40);
    assert!(summaries
        .iter()
        .filter_map(|summary| summary.local)
        .all(|state| !state.is_frozen()));
}

#[test]
fn demo_scenario_freezes_without_assists() {
    let scenario = Scenario::load(demo("freeze_lane.json")).expect("demo scenario");
    let mut session = scenario.into_session().expect("session");
    let summaries = session.run(&mut AssistEngine::default(), 40);
    assert!(summaries
        .iter()
        .filter_map(|summary| summary.local)
        .any(|state| state.is_frozen()));
}

#[test]
fn missing_scenario_is_an_io_error() {
    assert!(matches!(
        Scenario::load(demo("nope.json")),
        Err(ScenarioError::Io(_))
    ));
}
