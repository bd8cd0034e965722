/// Convenience result type used across plantfit.
pub type PlantfitResult<T> = Result<T, PlantfitError>;

/// Top-level error taxonomy used by the session and compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum PlantfitError {
    /// Invalid caller-provided data (sizes, config values, scripts).
    #[error("validation error: {0}")]
    Validation(String),

    /// A media source (camera, background photo, overlay) could not be acquired or decoded.
    #[error("media error: {0}")]
    Media(String),

    /// The plant catalog could not be fetched or parsed.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// The composited frame could not be serialized to an image.
    #[error("encode error: {0}")]
    Encode(String),

    /// The share target is missing or rejected the capture.
    #[error("share error: {0}")]
    Share(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlantfitError {
    /// Build a [`PlantfitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlantfitError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`PlantfitError::Catalog`] value.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Build a [`PlantfitError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PlantfitError::Share`] value.
    pub fn share(msg: impl Into<String>) -> Self {
        Self::Share(msg.into())
    }

    /// Build a [`PlantfitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
