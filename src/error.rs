//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the light-volumes crate.
///
/// Packing and uploading never fail: capacity overflow is truncated
/// silently. These variants cover the ambient failures around it.
#[derive(Debug)]
pub enum LightVolumeError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but hold values the buffers cannot be built from.
    InvalidOptions(String),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// A background thread panicked; holds the panic message.
    ThreadPanicked(String),
}

impl fmt::Display for LightVolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::ThreadPanicked(msg) => {
                write!(f, "thread panicked: {msg}")
            }
        }
    }
}

impl std::error::Error for LightVolumeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for LightVolumeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for LightVolumeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_includes_message() {
        let err = LightVolumeError::InvalidOptions("max_volumes is 0".into());
        assert_eq!(err.to_string(), "invalid options: max_volumes is 0");
    }

    #[test]
    fn io_errors_expose_source() {
        let err: LightVolumeError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.source().is_some());
        assert!(LightVolumeError::OptionsParse("bad".into())
            .source()
            .is_none());
    }

    #[test]
    fn thread_panic_names_message() {
        let err = LightVolumeError::ThreadPanicked("scene exploded".into());
        assert_eq!(err.to_string(), "thread panicked: scene exploded");
        assert!(err.source().is_none());
    }
}
