/// Convenience result type used across soniform.
pub type SoniformResult<T> = Result<T, SoniformError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The per-frame render path never surfaces these: bad per-frame input is
/// absorbed locally (skip the draw, reallocate state). Errors exist for
/// construction-time validation and for the export pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SoniformError {
    /// Invalid user-provided configuration or asset data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while preparing or evaluating render state.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors raised by the export capture pipeline.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SoniformError {
    /// Build a [`SoniformError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SoniformError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`SoniformError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
