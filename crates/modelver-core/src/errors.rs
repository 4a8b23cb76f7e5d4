use thiserror::Error;

/// Result type alias using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of the errors
/// that can abort a change cycle. Each kind maps to a stable error code that
/// can be used for programmatic error handling and testing.
///
/// Tolerated conditions (malformed proposal lines, missing artifacts, deletes
/// of absent elements) never produce an error and have no kind here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidSnapshotId,
    NotFound,
    AlreadyExists,

    // Sequence flow nesting
    FlowStructure,

    // Integration/IO
    Io,
    Serialization,
    ExternalService,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSnapshotId => "ERR_INVALID_SNAPSHOT_ID",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::FlowStructure => "ERR_FLOW_STRUCTURE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the model
/// context (model kind, element kind, snapshot, flow line) needed to locate
/// the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    model_kind: Option<String>,
    element_kind: Option<String>,
    snapshot_id: Option<String>,
    line: Option<usize>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            model_kind: None,
            element_kind: None,
            snapshot_id: None,
            line: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add model kind context
    pub fn with_model_kind(mut self, model_kind: impl Into<String>) -> Self {
        self.model_kind = Some(model_kind.into());
        self
    }

    /// Add element kind context
    pub fn with_element_kind(mut self, element_kind: impl Into<String>) -> Self {
        self.element_kind = Some(element_kind.into());
        self
    }

    /// Add snapshot id context
    pub fn with_snapshot_id(mut self, id: impl Into<String>) -> Self {
        self.snapshot_id = Some(id.into());
        self
    }

    /// Add a 1-based line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    /// Get the model kind context, if any
    pub fn model_kind(&self) -> Option<&str> {
        self.model_kind.as_deref()
    }

    /// Get the element kind context, if any
    pub fn element_kind(&self) -> Option<&str> {
        self.element_kind.as_deref()
    }

    /// Get the snapshot id context, if any
    pub fn snapshot_id(&self) -> Option<&str> {
        self.snapshot_id.as_deref()
    }

    /// Get the line context, if any
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(model_kind) = &self.model_kind {
            write!(f, " (model: {})", model_kind)?;
        }
        if let Some(element_kind) = &self.element_kind {
            write!(f, " (element: {})", element_kind)?;
        }
        if let Some(snapshot_id) = &self.snapshot_id {
            write!(f, " (snapshot: {})", snapshot_id)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the pure model layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    // ===== Flow Structure Errors =====
    /// An `end` line closes a block that was never opened
    #[error("Extra end at line {line}: no open block")]
    FlowExtraEnd { line: usize },

    /// An `else` line appears outside any open block
    #[error("Misplaced else at line {line}: no open block")]
    FlowElseOutsideBlock { line: usize },

    /// Input ended while a block was still open
    #[error("Missing end at line {line}: '{block}' opened at line {opened_at} is unterminated")]
    FlowMissingEnd {
        line: usize,
        opened_at: usize,
        block: String,
    },

    // ===== Vocabulary Errors =====
    /// Unrecognized model kind name
    #[error("Unknown model kind: {value}")]
    UnknownModelKind { value: String },

    /// Unrecognized element kind name
    #[error("Unknown element kind: {value}")]
    UnknownElementKind { value: String },

    /// Element kind used with a model it does not belong to
    #[error("Element kind {element_kind} is not part of the {model_kind} model")]
    ElementKindMismatch {
        model_kind: String,
        element_kind: String,
    },

    /// Two model contents of different kinds were compared
    #[error("Cannot compare a {left} model with a {right} model")]
    ModelKindMismatch { left: String, right: String },

    /// Snapshot directory name could not be parsed
    #[error("Invalid snapshot id '{value}': {reason}")]
    InvalidSnapshotId { value: String, reason: String },
}

impl ModelError {
    /// 1-based line number for flow structure errors
    pub fn line(&self) -> Option<usize> {
        match self {
            ModelError::FlowExtraEnd { line }
            | ModelError::FlowElseOutsideBlock { line }
            | ModelError::FlowMissingEnd { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Conversion from ModelError to ExError
impl From<ModelError> for ExError {
    fn from(err: ModelError) -> Self {
        let message = err.to_string();
        match err {
            ModelError::FlowExtraEnd { line }
            | ModelError::FlowElseOutsideBlock { line }
            | ModelError::FlowMissingEnd { line, .. } => {
                ExError::new(ExErrorKind::FlowStructure)
                    .with_op("validate_flow")
                    .with_element_kind("flow")
                    .with_line(line)
                    .with_message(message)
            }
            ModelError::UnknownModelKind { value } => ExError::new(ExErrorKind::InvalidInput)
                .with_model_kind(value)
                .with_message(message),
            ModelError::UnknownElementKind { value } => ExError::new(ExErrorKind::InvalidInput)
                .with_element_kind(value)
                .with_message(message),
            ModelError::ElementKindMismatch {
                model_kind,
                element_kind,
            } => ExError::new(ExErrorKind::InvalidInput)
                .with_model_kind(model_kind)
                .with_element_kind(element_kind)
                .with_message(message),
            ModelError::ModelKindMismatch { left, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_model_kind(left)
                .with_message(message),
            ModelError::InvalidSnapshotId { value, .. } => {
                ExError::new(ExErrorKind::InvalidSnapshotId)
                    .with_snapshot_id(value)
                    .with_message(message)
            }
        }
    }
}
