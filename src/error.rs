use thiserror::Error;

/// Failures surfaced to IPC callers. Each variant maps to a stable wire code.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    BadParams(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl DeskError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DeskError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DeskError::NotFound { .. } => "not_found",
            DeskError::BadParams(_) => "bad_params",
            DeskError::InvalidRecord(_) => "invalid_record",
            DeskError::Forbidden(_) => "forbidden",
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
