/// Result alias used across the crate.
pub type FoldResult<T> = Result<T, FoldError>;

/// Crate error type.
///
/// The animation engine's own arithmetic never fails; these variants cover configuration
/// loading, surface rasterization and frame encoding.
#[derive(thiserror::Error, Debug)]
pub enum FoldError {
    /// Invalid configuration, geometry, or host input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Drawing surface failure.
    #[error("render error: {0}")]
    Render(String),

    /// Frame sink / encoder failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FoldError {
    /// Build a [`FoldError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FoldError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FoldError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FoldError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
