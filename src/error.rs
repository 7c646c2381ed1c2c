// ABOUTME: Application-wide error types for skafos.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::arm::MonitorError;
use crate::cloud::CloudError;
use crate::engine::EngineError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("missing required argument: {0}")]
    InvalidArgument(&'static str),

    #[error("deployment slot not found: {0}")]
    SlotNotFound(String),

    #[error("required template field is blank: {0}")]
    MissingField(String),

    #[error("cloud operation failed: {0}")]
    CloudOperation(#[from] CloudError),

    #[error("deployment failed: {0}")]
    Deploy(String),

    #[error("docker engine error: {0}")]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
