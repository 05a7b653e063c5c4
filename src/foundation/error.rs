/// Convenience result type used across the timeline engine.
pub type TimelineResult<T> = Result<T, TimelineError>;

/// Error taxonomy for caller-facing mistakes.
///
/// Dirty input data (unparseable sort keys, undatable events) is never reported
/// through this type; it is dropped, counted and logged instead.
#[derive(thiserror::Error, Debug)]
pub enum TimelineError {
    /// Invalid configuration or build parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// A selection request that cannot be resolved against the current tracks.
    #[error("selection error: {0}")]
    Selection(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimelineError {
    /// Build a [`TimelineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TimelineError::Selection`] value.
    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }

    /// Build a [`TimelineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
