// crates/rockfall/src/error.rs

use thiserror::Error;

/// Everything that can stop an entity, or the whole game, from being created.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("host failed to create visual object `{name}`")]
    VisualCreation { name: String },

    #[error("host failed to load {kind} `{path}`")]
    AssetLoad { kind: &'static str, path: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
