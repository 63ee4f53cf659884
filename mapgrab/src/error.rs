//! Error types and Result alias for mapgrab.

use crate::script::EmitterState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The map window (or the display it lives on) could not be located
    #[error("Environment not found: {0}")]
    EnvironmentNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Composite script: cannot {operation} while {state:?}")]
    ScriptState {
        operation: &'static str,
        state: EmitterState,
    },

    #[error("Input error: {0}")]
    Input(#[from] mapgrab_input::Error),

    #[error("Capture error: {0}")]
    Capture(#[from] mapgrab_capture::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
