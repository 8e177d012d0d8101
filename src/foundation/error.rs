/// Crate-wide result alias.
pub type FramecutResult<T> = Result<T, FramecutError>;

/// Errors surfaced by the engine.
///
/// Per-element problems during a paint or hit-test pass (an image that fails to decode, a text
/// layer that cannot be measured) are absorbed and logged instead of being returned; these
/// variants cover caller mistakes detected before any drawing happens.
#[derive(thiserror::Error, Debug)]
pub enum FramecutError {
    /// Invalid scene content or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image bytes or a `data:` URI could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Font registration or text shaping failed.
    #[error("font error: {0}")]
    Font(String),

    /// The render surface rejected an operation.
    #[error("render error: {0}")]
    Render(String),

    /// Scene document (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramecutError {
    /// Build a [`FramecutError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramecutError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FramecutError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`FramecutError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FramecutError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
