//! Run settings for the seed generator.
//!
//! Each setting is resolved with precedence: CLI > ENV > config file > default.
//! The defaults reproduce the fixed project layout, so running with no
//! arguments from the project root reads the census extract and rewrites the
//! villages init script.

use crate::emitter::{SeedOptions, DEFAULT_BATCH_SIZE, DEFAULT_STATE_NAME};
use crate::error::SeedError;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "Other Related Docs/DB/punjab_villages.json";
pub const DEFAULT_OUTPUT: &str = "Database/init/03-villages-full.sql";
pub const DEFAULT_CONFIG_FILE: &str = "villages-sql.yaml";

pub const ENV_INPUT: &str = "VILLAGES_SQL_INPUT";
pub const ENV_OUTPUT: &str = "VILLAGES_SQL_OUTPUT";
pub const ENV_BATCH_SIZE: &str = "VILLAGES_SQL_BATCH_SIZE";
pub const ENV_STATE: &str = "VILLAGES_SQL_STATE";

/// Optional settings file (`villages-sql.yaml`)
///
/// ```yaml
/// input: data/punjab_villages.json
/// output: db/init/03-villages-full.sql
/// batch_size: 250
/// state_name: Punjab
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub batch_size: Option<usize>,
    #[serde(default)]
    pub state_name: Option<String>,
}

impl ConfigFile {
    /// Load a config file
    ///
    /// When `required` is false a missing file yields `Ok(None)`; this is how the
    /// default `villages-sql.yaml` is treated. An explicitly named file must exist.
    pub fn load<P: AsRef<Path>>(path: P, required: bool) -> Result<Option<Self>, SeedError> {
        let path = path.as_ref();

        if !path.exists() {
            if required {
                return Err(SeedError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SeedError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = serde_yaml::from_str(&contents).map_err(|e| {
            SeedError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(Some(config))
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub state_name: Option<String>,
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub batch_size: NonZeroUsize,
    pub state_name: String,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn resolve(cli: CliOverrides, file: Option<ConfigFile>) -> Result<Self, SeedError> {
        Self::resolve_with(cli, file, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup
    pub fn resolve_with<F>(
        cli: CliOverrides,
        file: Option<ConfigFile>,
        env: F,
    ) -> Result<Self, SeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();

        let input = cli
            .input
            .or_else(|| env(ENV_INPUT).map(PathBuf::from))
            .or(file.input)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

        let output = cli
            .output
            .or_else(|| env(ENV_OUTPUT).map(PathBuf::from))
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let env_batch = match env(ENV_BATCH_SIZE) {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|_| {
                SeedError::Config(format!("{} must be a positive integer, got '{}'", ENV_BATCH_SIZE, raw))
            })?),
            None => None,
        };
        let batch_size = cli
            .batch_size
            .or(env_batch)
            .or(file.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE.get());
        let batch_size = NonZeroUsize::new(batch_size)
            .ok_or_else(|| SeedError::Config("batch size must be at least 1".to_string()))?;

        let state_name = cli
            .state_name
            .or_else(|| env(ENV_STATE))
            .or(file.state_name)
            .unwrap_or_else(|| DEFAULT_STATE_NAME.to_string());

        Ok(Settings { input, output, batch_size, state_name })
    }

    /// Emitter options derived from these settings
    pub fn seed_options(&self) -> SeedOptions {
        let source_label = self
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string());

        SeedOptions {
            batch_size: self.batch_size,
            state_name: self.state_name.clone(),
            source_label,
        }
    }
}
