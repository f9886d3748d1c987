//! `-v` / `GATEHOUSE_LOG_LEVEL`.
//!
//! Repeated `-v` flags and level names both resolve to a count that indexes
//! [`LEVELS`]; `error` (no flag) is the default.

use clap::{builder::ValueParser, Arg, ArgAction, ArgMatches, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

pub const LEVELS: [(&str, Level); 5] = [
    ("error", Level::ERROR),
    ("warn", Level::WARN),
    ("info", Level::INFO),
    ("debug", Level::DEBUG),
    ("trace", Level::TRACE),
];

/// Parse a level name (`info`) or a verbosity count (`2`) into a count.
///
/// # Errors
/// Returns an error for unknown names or counts past `trace`.
pub fn parse_verbosity(value: &str) -> Result<u8, String> {
    let value = value.trim().to_lowercase();
    if let Ok(count) = value.parse::<u8>() {
        if usize::from(count) < LEVELS.len() {
            return Ok(count);
        }
    }

    LEVELS
        .iter()
        .position(|(name, _)| *name == value)
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| {
            let names: Vec<&str> = LEVELS.iter().map(|(name, _)| *name).collect();
            format!("invalid log level, expected one of: {}", names.join(", "))
        })
}

/// Level for a verbosity count; counts past the table stay at `trace`.
#[must_use]
pub fn level_for(count: u8) -> Level {
    let index = usize::from(count).min(LEVELS.len() - 1);
    LEVELS[index].1
}

/// Resolved log level from parsed arguments.
#[must_use]
pub fn level(matches: &ArgMatches) -> Level {
    level_for(matches.get_one::<u8>(ARG_VERBOSITY).copied().unwrap_or(0))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: error, warn, info, debug, trace (default: error)")
            .env("GATEHOUSE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_verbosity)),
    )
}
