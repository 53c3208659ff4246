use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Yaml(#[from] serde_yml::Error),

    #[error("Unknown llm service: {0}")]
    UnknownService(String),

    #[error("Temperature {0} is outside of 0.0..=2.0")]
    Temperature(f32),

    #[error(transparent)]
    Threshold(#[from] ThresholdError),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Pass threshold must be between 1 and 100 percent, got {0}")]
pub struct ThresholdError(pub u8);
