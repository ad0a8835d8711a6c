use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StudioError {
    /// The message meant for the acting user, without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::NotFound(msg)
            | StudioError::Validation(msg)
            | StudioError::Authentication(msg)
            | StudioError::Authorization(msg)
            | StudioError::Conflict(msg) => msg.clone(),
            StudioError::Database(_) | StudioError::Internal(_) => self.to_string(),
        }
    }
}

pub type StudioResult<T> = Result<T, StudioError>;
