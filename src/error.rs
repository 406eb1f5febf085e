//! Crate-wide error type.

use std::error::Error;
use std::fmt;

use crate::gpu::context::GpuContextError;

/// Top-level error for everything that can fail outside a render pass.
#[derive(Debug)]
pub enum TeaviewError {
    /// GPU device or surface initialization failed.
    Gpu(GpuContextError),
    /// Reading or writing an options file failed.
    Io(std::io::Error),
    /// An options file exists but does not parse as valid TOML.
    OptionsParse(String),
    /// The windowing layer failed (event loop creation or dispatch).
    Viewer(String),
}

impl fmt::Display for TeaviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "gpu error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::OptionsParse(msg) => write!(f, "options parse error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl Error for TeaviewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<GpuContextError> for TeaviewError {
    fn from(e: GpuContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for TeaviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
