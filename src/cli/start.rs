use crate::cli::{
    actions::Action,
    commands::{self, logging},
    dispatch::handler,
    telemetry,
};
use anyhow::Result;

/// Parse arguments, install logging and return the action to run.
///
/// # Errors
/// Returns an error if telemetry cannot be initialized or the arguments are
/// invalid.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(logging::verbosity_level(&matches))?;

    handler(&matches)
}
