//! Crate error type

use thiserror::Error;

use crate::player_data::Spec;
use crate::unit_stats::Stat;

/// Simulator result type
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors surfaced while loading configuration or running simulations
#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown {kind} preset: {name}")]
    UnknownPreset { kind: &'static str, name: String },

    #[error("spec {0:?} is already registered")]
    DuplicateSpec(Spec),

    #[error("spec {0:?} is not registered")]
    SpecNotRegistered(Spec),

    #[error("no default rotation for level {0}")]
    NoDefaultRotation(i32),

    #[error("reference stat {0:?} produced no measurable change")]
    DegenerateReferenceStat(Stat),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
