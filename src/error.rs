use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Task {task} is not in column {column}")]
    TaskNotInColumn { task: String, column: String },

    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Status {0} does not match any column")]
    UnknownStatus(String),

    #[error("Task ID already exists: {0}")]
    DuplicateTaskId(String),

    #[error("Column ID already exists: {0}")]
    DuplicateColumnId(String),

    #[error("Invalid task ID: {0:?}")]
    InvalidTaskId(String),

    #[error("Board state is inconsistent: {0}")]
    InconsistentState(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Broad class of a [`KanbanError`], for callers that only need to decide
/// how to present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Config,
}

impl KanbanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) | Self::ColumnNotFound(_) | Self::TaskNotInColumn { .. } => {
                ErrorKind::NotFound
            }
            Self::EmptyTitle
            | Self::UnknownStatus(_)
            | Self::DuplicateTaskId(_)
            | Self::DuplicateColumnId(_)
            | Self::InvalidTaskId(_)
            | Self::InconsistentState(_) => ErrorKind::Validation,
            Self::ConfigError(_) | Self::SerializationError(_) => ErrorKind::Config,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
