//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;
use tracing::debug;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the current directory if it exists
    pub fn load_env_file() -> Result<()> {
        Self::load_env_file_from(Path::new(".env"))
    }

    /// Load the given env file if it exists; variables already set win
    pub fn load_env_file_from(path: &Path) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {} file: {}", path.display(), e)))?;
            debug!(path = %path.display(), "loaded environment file");
        } else {
            debug!(path = %path.display(), "no environment file, using defaults and CLI arguments");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EnvManager::load_env_file_from(&dir.path().join(".env")).is_ok());
    }
}
