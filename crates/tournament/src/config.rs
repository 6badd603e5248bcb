//! Session settings, loadable from TOML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, TournamentError};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "rps_tournament.toml";

/// Results file every run appends to
pub const DEFAULT_RESULTS_FILE: &str = "tourny_results.txt";

/// Rounds per tournament run
pub const DEFAULT_ROUNDS: u32 = 10_000;

/// Tournaments played when the count prompt is left empty
pub const DEFAULT_TOURNAMENTS: u32 = 50;

/// Settings for a tournament session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Program and fixed leading arguments; bot names and rounds are appended
    pub command: Vec<String>,
    /// Rounds the executable plays per run
    pub rounds: u32,
    /// Number of runs when none is given on the command line or prompt
    pub tournaments: u32,
    /// File that collects the stdout of every run
    pub results_path: PathBuf,
    /// Kill a run that takes longer than this (None = wait forever)
    pub timeout_secs: Option<u64>,
    /// Abort the session on a failed or timed-out run instead of continuing
    pub strict: bool,
    /// Print "Completed tournament i" after each run
    pub progress: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            command: vec!["java".to_string(), "Tournament".to_string()],
            rounds: DEFAULT_ROUNDS,
            tournaments: DEFAULT_TOURNAMENTS,
            results_path: PathBuf::from(DEFAULT_RESULTS_FILE),
            timeout_secs: None,
            strict: false,
            progress: true,
        }
    }
}

impl TournamentConfig {
    /// Parse a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| TournamentError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| TournamentError::io(path, e))?;
        Self::from_toml(&contents, path)
    }

    /// Load `path` if given, otherwise `rps_tournament.toml` when it exists,
    /// otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    tracing::debug!("using config from {}", fallback.display());
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Layer command line values over this config
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<()> {
        if let Some(path) = &overrides.results_path {
            self.results_path = path.clone();
        }
        if let Some(rounds) = overrides.rounds {
            self.rounds = rounds;
        }
        if let Some(secs) = overrides.timeout_secs {
            if secs == 0 {
                return Err(TournamentError::InvalidInput(
                    "--timeout-secs must be positive".to_string(),
                ));
            }
            self.timeout_secs = Some(secs);
        }
        if overrides.strict {
            self.strict = true;
        }
        if overrides.quiet {
            self.progress = false;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        let program_missing = self
            .command
            .first()
            .is_none_or(|program| program.trim().is_empty());
        if program_missing {
            return Err(TournamentError::Config {
                path: origin.to_path_buf(),
                message: "`command` must name a program".to_string(),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(TournamentError::Config {
                path: origin.to_path_buf(),
                message: "`timeout_secs` must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Values given on the command line; `None`/`false` leaves the config alone
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub results_path: Option<PathBuf>,
    pub rounds: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub strict: bool,
    pub quiet: bool,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
