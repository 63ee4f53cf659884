use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to create uinput device: {0}")]
    DeviceCreation(#[from] std::io::Error),

    #[error("failed to emit input event: {0}")]
    EmitFailed(#[source] std::io::Error),

    #[error("position ({x}, {y}) is outside the {width}x{height} screen")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
