//! Error taxonomy for slice generation.
//!
//! Everything here is fatal for the run that produced it. Non-fatal conditions
//! (unknown field types, corrected naming values) are reported as warnings in
//! [`crate::codegen::GenerationReport`] instead.

use std::path::PathBuf;

/// Fatal generation failure
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Payload is not valid JSON, or has no naming-convention block
    #[error("schema parse error: {0}")]
    SchemaParse(String),

    /// A required naming key is absent or empty
    #[error("missing naming field '{key}'")]
    MissingNamingField { key: String },

    /// A naming value cannot be turned into identifiers or a folder name
    #[error("invalid value '{value}' for naming field '{key}': {reason}")]
    InvalidNamingValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Internal inconsistency while rendering or validating the artifact batch
    #[error("render error in '{key}': {reason}")]
    Render { key: String, reason: String },

    /// I/O failure while persisting an artifact
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl GenerationError {
    /// Short machine-friendly name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::SchemaParse(_) => "SchemaParseError",
            GenerationError::MissingNamingField { .. } => "MissingNamingFieldError",
            GenerationError::InvalidNamingValue { .. } => "InvalidNamingValueError",
            GenerationError::Render { .. } => "RenderError",
            GenerationError::FileWrite { .. } => "FileWriteError",
            GenerationError::Config(_) => "ConfigError",
        }
    }
}

pub type Result<T, E = GenerationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_naming_field_names_key() {
        let err = GenerationError::MissingNamingField {
            key: "Users_1_000___".to_string(),
        };
        assert_eq!(err.to_string(), "missing naming field 'Users_1_000___'");
        assert_eq!(err.kind(), "MissingNamingFieldError");
    }

    #[test]
    fn test_file_write_carries_path() {
        let err = GenerationError::FileWrite {
            path: PathBuf::from("src/app/dashboard/posts/all/page.tsx"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("src/app/dashboard/posts/all/page.tsx"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
