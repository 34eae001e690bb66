//! Logging setup
//!
//! The library only emits `tracing` events. Binaries call [`init_logging`]
//! once to send them to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive that overrides the
/// verbosity flags, e.g. `TREENOTE_LOG=treenote=trace`.
pub const LOG_ENV: &str = "TREENOTE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    /// Map `-q` and repeated `-v` flags to a verbosity.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Verbosity::Quiet;
        }
        match verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        }
    }

    pub fn level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

/// Install a stderr subscriber filtered by `TREENOTE_LOG` or, when unset,
/// by `verbosity`.
pub fn init_logging(
    verbosity: Verbosity,
    use_color: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(use_color)
        .try_init()
}
