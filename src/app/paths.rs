use std::fs;
use std::path::{Path, PathBuf};

use crate::app::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "record_manager";

// Where the database and the log file live.
// The directory is created on startup if it does not exist yet.
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    // Resolve the platform data directory, falling back to the working directory
    pub fn resolve() -> AppResult<AppPaths> {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        AppPaths::under(&base)
    }

    pub fn under(base: &Path) -> AppResult<AppPaths> {
        let data_dir = base.join(APP_DIR_NAME);
        fs::create_dir_all(&data_dir).map_err(|source| AppError::CreateDataDir {
            path: data_dir.clone(),
            source,
        })?;
        Ok(AppPaths { data_dir })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("records.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("record_manager.log")
    }
}
