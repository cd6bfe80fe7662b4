#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo binary.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `TYPEREEL_*` prefix.

use std::env;

use thiserror::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Typereel Demo — scripted code-editing console playback

USAGE:
    typereel-demo [OPTIONS]

OPTIONS:
    --speed=F      Stream rate in characters per second (default: 100)
    --seed=N       Jitter seed for reproducible playback (default: fixed)
    --quiet        Suppress log output
    --help, -h     Show this help message
    --version, -V  Show version

ENVIRONMENT:
    TYPEREEL_SPEED   Same as --speed
    TYPEREEL_SEED    Same as --seed
";

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Options),
    Help,
    Version,
}

/// Playback options.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub speed: f32,
    pub seed: u32,
    pub quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            speed: 100.0,
            seed: 0,
            quiet: false,
        }
    }
}

/// Help text for `--help`.
#[must_use]
pub fn help_text() -> &'static str {
    HELP_TEXT
}

/// Version string for `--version`.
#[must_use]
pub fn version() -> &'static str {
    VERSION
}

/// Parse command-line arguments (without the program name).
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Command> {
    let mut options = Options::default();

    if let Ok(value) = env::var("TYPEREEL_SPEED") {
        options.speed = parse_speed(&value)?;
    }
    if let Ok(value) = env::var("TYPEREEL_SEED") {
        options.seed = parse_seed(&value)?;
    }

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(Command::Help);
        }
        if arg == "--version" || arg == "-V" {
            return Ok(Command::Version);
        }
        if arg == "--quiet" {
            options.quiet = true;
        } else if let Some(value) = arg.strip_prefix("--speed=") {
            options.speed = parse_speed(value)?;
        } else if let Some(value) = arg.strip_prefix("--seed=") {
            options.seed = parse_seed(value)?;
        } else {
            return Err(CliError::invalid(format!("unknown option: {arg}")));
        }
    }

    Ok(Command::Run(options))
}

fn parse_speed(value: &str) -> Result<f32> {
    let speed: f32 = value
        .parse()
        .map_err(|_| CliError::invalid(format!("--speed expects a number, got {value:?}")))?;
    if speed <= 0.0 || !speed.is_finite() {
        return Err(CliError::invalid("--speed must be a positive number"));
    }
    Ok(speed)
}

fn parse_seed(value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| CliError::invalid(format!("--seed expects an integer, got {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_with_no_args() {
        let cmd = parse(Vec::new()).unwrap();
        assert_eq!(cmd, Command::Run(Options::default()));
    }

    #[test]
    fn parses_speed_and_seed() {
        let cmd = parse(vec!["--speed=250".to_string(), "--seed=42".to_string()]).unwrap();
        let Command::Run(options) = cmd else {
            panic!("expected run command");
        };
        assert!((options.speed - 250.0).abs() < f32::EPSILON);
        assert_eq!(options.seed, 42);
    }

    #[test]
    fn quiet_flag() {
        let Command::Run(options) = parse(vec!["--quiet".to_string()]).unwrap() else {
            panic!("expected run command");
        };
        assert!(options.quiet);
    }

    #[test]
    fn help_and_version_win() {
        assert_eq!(parse(vec!["--help".to_string()]).unwrap(), Command::Help);
        assert_eq!(parse(vec!["-V".to_string()]).unwrap(), Command::Version);
    }

    #[test]
    fn rejects_unknown_options() {
        assert!(parse(vec!["--bogus".to_string()]).is_err());
    }

    #[test]
    fn rejects_non_positive_speed() {
        assert!(parse(vec!["--speed=0".to_string()]).is_err());
        assert!(parse(vec!["--speed=-3".to_string()]).is_err());
        assert!(parse(vec!["--speed=abc".to_string()]).is_err());
    }
}
