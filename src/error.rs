//! Error type for surface operations.
//!
//! The surface has a single failure mode: an operation that needs the canvas
//! was invoked before `setup` installed one. Everything else is total.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("invalid state: {0} requires an initialized canvas")]
    InvalidState(&'static str),
}

impl SurfaceError {
    /// Stable machine-readable code for the host layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidState(_) => "E_INVALID_STATE",
        }
    }
}
