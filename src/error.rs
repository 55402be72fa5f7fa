//! Error types.

use thiserror::Error;

use crate::record::ContentClass;

/// Result alias for override operations.
pub type Result<T> = std::result::Result<T, OverrideError>;

/// Errors returned by override operations.
///
/// Every variant maps to a caller-facing status code via
/// [`status`](Self::status): validation and lookup failures are `400`,
/// unexpected collaborator failures are `500`.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// Filesystem I/O failed mid-operation (typically `PermissionDenied`
    /// on the directive directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed, missing, or out-of-range request input.
    #[error("{0}")]
    Validation(String),

    /// The requested record type does not belong to the requested
    /// content class.
    #[error("Unknown combination!")]
    UnknownCombination {
        /// The record type as supplied by the caller.
        record_type: String,
        /// The content class it was requested against.
        content_class: ContentClass,
    },

    /// The target line or directive file is absent.
    #[error("{0}")]
    NotFound(String),

    /// The external configuration syntax check rejected the configuration.
    /// The checker's own output is carried for logging; the change on
    /// disk is not rolled back.
    #[error("Error: Configuration error.")]
    Config(String),

    /// The external service reload failed after a passing syntax check.
    #[error("Error: Service could not be restarted!")]
    Service(String),

    /// Unexpected collaborator failure (e.g. the runtime-state query).
    #[error("{0}")]
    Internal(String),
}

impl OverrideError {
    /// Caller-facing status code for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Io(_) | Self::Internal(_) => 500,
            Self::Validation(_)
            | Self::UnknownCombination { .. }
            | Self::NotFound(_)
            | Self::Config(_)
            | Self::Service(_) => 400,
        }
    }

    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(OverrideError::Validation("bad".into()).status(), 400);
        assert_eq!(OverrideError::NotFound("gone".into()).status(), 400);
        assert_eq!(OverrideError::Config("stderr".into()).status(), 400);
        assert_eq!(OverrideError::Service("stderr".into()).status(), 400);
        assert_eq!(OverrideError::Internal("boom".into()).status(), 500);
        assert_eq!(
            OverrideError::Io(std::io::Error::other("disk")).status(),
            500
        );
    }

    #[test]
    fn fixed_messages_hide_collaborator_output() {
        let e = OverrideError::Config("checkconf: syntax error line 3".into());
        assert_eq!(e.to_string(), "Error: Configuration error.");
        let e = OverrideError::Service("unit not found".into());
        assert_eq!(e.to_string(), "Error: Service could not be restarted!");
    }
}
