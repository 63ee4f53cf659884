//! Error types for mapgrab-capture.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No window matching '{0}' was found")]
    WindowNotFound(String),

    #[error("`{program}` failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Could not parse {what} from: {input}")]
    ParseFailed { what: &'static str, input: String },

    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
