//! Logger setup for the runner and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default level for a `-v` count: warnings, then info, debug and trace.
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set; otherwise the level follows `verbosity`.
pub fn init(verbosity: u8) {
    let env = Env::default().default_filter_or(level_for(verbosity).to_string());
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set, which repeated
    // calls from tests are allowed to do.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
