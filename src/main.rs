//! Runs a scenario through the assist engine and prints one line per frame.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use foresight::scenario::{FrameSummary, Scenario};
use foresight::{init_logging, AssistConfig, AssistEngine};

/// Replay a scenario with predictive assists enabled
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON)
    #[arg(short, long)]
    scenario: PathBuf,
    /// Assist configuration file (JSON); every assist is off without one
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Frames to run, overriding the scenario
    #[arg(short, long)]
    frames: Option<u32>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn describe(summary: &FrameSummary) -> String {
    let mut line = format!("tick {:>4}", summary.tick);
    if let Some(state) = summary.local {
        line.push_str(&format!(
            " pos ({:8.2}, {:8.2}) vel ({:6.2}, {:6.2}){}",
            state.pos.x,
            state.pos.y,
            state.vel.x,
            state.vel.y,
            if state.is_frozen() { " frozen" } else { "" }
        ));
    }
    let report = &summary.report;
    if let Some(outcome) = &report.survival {
        line.push_str(&format!(" survival {:?} ({} replays)", outcome.decision, outcome.replays));
    }
    if let Some(aim) = &report.hook_aim {
        line.push_str(&format!(" hook-aim {} {:?}", aim.target, aim.solution.target));
    }
    if let Some(plan) = &report.unfreeze {
        line.push_str(&format!(" unfreeze {plan:?}"));
    }
    line
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;
    let config = args
        .config
        .as_ref()
        .map(|path| {
            AssistConfig::load(path).with_context(|| format!("loading config {}", path.display()))
        })
        .transpose()?
        .unwrap_or_default();

    let mut session = scenario.into_session().context("building scenario world")?;
    let frames = args.frames.unwrap_or_else(|| session.frames());
    let mut engine = AssistEngine::new(config);
    log::info!("running {frames} frames");

    let mut out = io::stdout().lock();
    for _ in 0..frames {
        let summary = session.step(&mut engine);
        writeln!(out, "{}", describe(&summary))?;
    }
    Ok(())
}
