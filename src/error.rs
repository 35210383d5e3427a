use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the clock from starting or keep it from presenting frames.
///
/// Bad option values are never errors; they fall back to the defaults.
#[derive(Error, Debug)]
pub enum ClockError {
    #[error("failed to run the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create the clock window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("framebuffer error: {0}")]
    Framebuffer(#[from] pixels::Error),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ClockError>;
