use std::io;
use std::path::PathBuf;
use thiserror::Error;

// Everything that can fail outside of user-input validation.
// Validation problems never reach this type; they are gated in the UI.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to create data directory at {path}: {source}")]
    CreateDataDir { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_data_dir_error_display() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = AppError::CreateDataDir {
            path: PathBuf::from("/nope/record_manager"),
            source,
        };
        assert_eq!(
            err.to_string(),
            "failed to create data directory at /nope/record_manager: access denied"
        );
    }

    #[test]
    fn database_error_display_carries_the_cause() {
        let err = AppError::from(rusqlite::Error::InvalidQuery);
        assert!(err.to_string().starts_with("database error:"));
    }
}
