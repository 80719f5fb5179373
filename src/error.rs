//! Error type shared by every stage of the seed pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for seed generation
#[derive(Debug)]
pub enum SeedError {
    /// Input is not valid JSON
    Parse(String),
    /// Valid JSON that lacks the expected districts/tehsils/villages shape
    MalformedInput(String),
    FileNotFound {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Config(String),
}

impl SeedError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SeedError::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify a serde_json failure into syntax vs. shape errors.
    pub(crate) fn from_json(path: impl Into<PathBuf>, err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Syntax | Category::Eof => SeedError::Parse(err.to_string()),
            Category::Data => SeedError::MalformedInput(err.to_string()),
            Category::Io => SeedError::Io {
                path: path.into(),
                source: io::Error::from(err),
            },
        }
    }
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SeedError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            SeedError::FileNotFound { path } => {
                write!(f, "Input file not found: {}", path.display())
            }
            SeedError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            SeedError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
