//! Logging configuration and initialization.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: '{}'. Use 'text' or 'json'.", s)),
        }
    }
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Startup, API, and store events only.
    #[default]
    Production,
    /// Operational detail across all targets.
    Verbose,
    /// Everything at debug.
    Debug,
    /// Warnings and errors only.
    Quiet,
}

/// Logging configuration built from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub preset: LogPreset,
    pub format: LogFormat,
}

impl LogConfig {
    /// Derive a config from CLI flags; the most verbose flag wins,
    /// except quiet, which always wins.
    pub fn from_cli(verbose: bool, debug: bool, quiet: bool, format: LogFormat) -> Self {
        let preset = if quiet {
            LogPreset::Quiet
        } else if debug {
            LogPreset::Debug
        } else if verbose {
            LogPreset::Verbose
        } else {
            LogPreset::Production
        };
        Self { preset, format }
    }

    /// Build an EnvFilter; RUST_LOG takes precedence when set.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }

        let directives = match self.preset {
            LogPreset::Production => {
                "followup::startup=info,followup::api=info,followup::store=info,\
                 followup::auth=warn,followup::rate=warn,tower_http=warn"
            }
            LogPreset::Verbose => "followup=info,tower_http=info",
            LogPreset::Debug => "followup=debug,tower_http=debug",
            LogPreset::Quiet => "followup=warn,tower_http=error",
        };

        EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init(config: &LogConfig) {
    let filter = config.build_filter();

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(true))
                .init();
        }
    }
}
