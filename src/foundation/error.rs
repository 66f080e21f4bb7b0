/// Convenience result type used across flipstyle.
pub type StyleResult<T> = Result<T, StyleError>;

/// Error taxonomy for the style and animation engine.
///
/// None of these escape an editing session: the session absorbs them, logs, and degrades.
#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    /// Malformed user input (bad hex, partial color text, out-of-domain numbers).
    #[error("validation error: {0}")]
    Validation(String),

    /// Gradient text that could not be parsed into at least two stops.
    #[error("gradient error: {0}")]
    Gradient(String),

    /// Text metrics were unavailable or the element has no measurable box.
    #[error("measurement error: {0}")]
    Measurement(String),

    /// Optional platform capability that is not present.
    #[error("unsupported capability: {0}")]
    Unsupported(String),

    /// Failures while parsing or rasterizing synthesized vector markup.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StyleError {
    /// Build a [`StyleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StyleError::Gradient`] value.
    pub fn gradient(msg: impl Into<String>) -> Self {
        Self::Gradient(msg.into())
    }

    /// Build a [`StyleError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    /// Build a [`StyleError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`StyleError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StyleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StyleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
