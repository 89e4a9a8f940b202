use linediff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using LineDiffError
pub type Result<T> = std::result::Result<T, LineDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A configuration value is out of range (rejected before any diffing)
    InvalidConfig,
    /// A pass broke the index-order invariant of the edit script
    InvariantViolation,

    // Surrounding application (CLI)
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, offending config field, request correlation).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    field: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            field: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the offending configuration field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the offending field, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for diff configuration and pipeline execution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineDiffError {
    // ===== Configuration Errors =====
    /// Compaction context radius must be zero or positive
    #[error("Invalid context radius {value}: must be >= 0")]
    InvalidContextRadius { value: i64 },

    /// Tab width must be strictly positive
    #[error("Invalid tab width {value}: must be > 0")]
    InvalidTabWidth { value: i64 },

    /// Token radius must be zero or positive
    #[error("Invalid token radius {value}: must be >= 0")]
    InvalidTokenRadius { value: i64 },

    /// Highlighting is enabled but the markup tag is empty
    #[error("Markup tag cannot be empty when highlighting is enabled")]
    EmptyMarkupTag,

    /// Span limit must allow at least one span
    #[error("Invalid max spans {value}: must be > 0")]
    InvalidMaxSpans { value: i64 },

    // ===== Pipeline Errors =====
    /// A pass produced entries whose indices are out of order or missing
    #[error("Invariant violated after pass '{pass}': {detail}")]
    InvariantViolation { pass: String, detail: String },
}

impl From<LineDiffError> for ExError {
    fn from(err: LineDiffError) -> Self {
        match err {
            LineDiffError::InvalidContextRadius { value } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_field("context_radius")
                    .with_message(format!("context radius must be >= 0, got {}", value))
            }

            LineDiffError::InvalidTabWidth { value } => ExError::new(ExErrorKind::InvalidConfig)
                .with_field("tab_width")
                .with_message(format!("tab width must be > 0, got {}", value)),

            LineDiffError::InvalidTokenRadius { value } => ExError::new(ExErrorKind::InvalidConfig)
                .with_field("highlight.token_radius")
                .with_message(format!("token radius must be >= 0, got {}", value)),

            LineDiffError::EmptyMarkupTag => ExError::new(ExErrorKind::InvalidConfig)
                .with_field("highlight.tag")
                .with_message("markup tag cannot be empty"),

            LineDiffError::InvalidMaxSpans { value } => ExError::new(ExErrorKind::InvalidConfig)
                .with_field("highlight.max_spans")
                .with_message(format!("max spans must be > 0, got {}", value)),

            LineDiffError::InvariantViolation { pass, detail } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_op(pass)
                    .with_message(detail)
            }
        }
    }
}

impl LineDiffError {
    /// True for errors raised while validating configuration
    pub fn is_config_error(&self) -> bool {
        !matches!(self, LineDiffError::InvariantViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
            (ExErrorKind::InvariantViolation, "ERR_INVARIANT_VIOLATION"),
            (ExErrorKind::Io, "ERR_IO"),
            (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_code_and_field() {
        let err: ExError = LineDiffError::InvalidTabWidth { value: 0 }.into();
        let text = err.to_string();
        assert!(text.starts_with("[ERR_INVALID_CONFIG]"));
        assert!(text.contains("tab_width"));
    }

    #[test]
    fn test_config_errors_are_classified() {
        assert!(LineDiffError::EmptyMarkupTag.is_config_error());
        assert!(!LineDiffError::InvariantViolation {
            pass: "p".into(),
            detail: "d".into()
        }
        .is_config_error());
    }
}
