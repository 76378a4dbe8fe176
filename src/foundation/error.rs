/// Convenience result type used across logoforge.
pub type LogoResult<T> = Result<T, LogoError>;

/// Top-level error taxonomy used by the fallible APIs.
///
/// Parameter resolution, geometry generation and rendering are total and never produce one of
/// these; they surface from schema validation, registry lookups, raster surface creation and job
/// loading.
#[derive(thiserror::Error, Debug)]
pub enum LogoError {
    /// Invalid user-provided schema, job or canvas data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown template id or inconsistent template definition.
    #[error("template error: {0}")]
    Template(String),

    /// Raster backend failures (surface too large, readback mismatch).
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LogoError {
    /// Build a [`LogoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LogoError::Template`] value.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`LogoError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LogoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
