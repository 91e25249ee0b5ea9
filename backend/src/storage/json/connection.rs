use anyhow::{Context, Result};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DIRECTORY_NAME: &str = "Donation Matcher";
const REDIRECT_FILE_NAME: &str = ".donation_redirect";

/// DataConnection resolves and owns the data directory
#[derive(Debug, Clone)]
pub struct DataConnection {
    base_directory: PathBuf,
}

impl DataConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory.
    ///
    /// This uses ~/Documents/Donation Matcher, but a redirect file in that
    /// directory may point the data somewhere else.
    pub fn new_default() -> Result<Self> {
        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .context("Could not determine home directory")?;

        let default_data_dir = documents_dir.join(DEFAULT_DIRECTORY_NAME);
        Self::new(Self::resolve_redirect(default_data_dir))
    }

    /// Follow the redirect file inside `default_dir`, if present and valid
    pub fn resolve_redirect(default_dir: PathBuf) -> PathBuf {
        let redirect_file = default_dir.join(REDIRECT_FILE_NAME);

        if !redirect_file.exists() {
            info!("Using data directory: {}", default_dir.display());
            return default_dir;
        }

        match fs::read_to_string(&redirect_file) {
            Ok(redirected_path) => {
                let redirected_path = redirected_path.trim();
                let path = PathBuf::from(redirected_path);

                if path.is_dir() {
                    info!("Found redirect file, using data directory: {}", path.display());
                    path
                } else {
                    warn!(
                        "Redirect file points to non-existent directory: {}. Using default.",
                        redirected_path
                    );
                    default_dir
                }
            }
            Err(e) => {
                error!("Failed to read redirect file: {}. Using default directory.", e);
                default_dir
            }
        }
    }

    /// Get the data directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("a").join("b");

        let connection = DataConnection::new(&nested).expect("Failed to create connection");

        assert!(nested.is_dir());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_redirect_to_existing_directory() {
        let default_dir = TempDir::new().expect("Failed to create temp dir");
        let target_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(
            default_dir.path().join(REDIRECT_FILE_NAME),
            format!("{}\n", target_dir.path().display()),
        )
        .expect("Failed to write redirect");

        let resolved = DataConnection::resolve_redirect(default_dir.path().to_path_buf());

        assert_eq!(resolved, target_dir.path());
    }

    #[test]
    fn test_redirect_to_missing_directory_falls_back() {
        let default_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = default_dir.path().join("does-not-exist");
        fs::write(
            default_dir.path().join(REDIRECT_FILE_NAME),
            missing.display().to_string(),
        )
        .expect("Failed to write redirect");

        let resolved = DataConnection::resolve_redirect(default_dir.path().to_path_buf());

        assert_eq!(resolved, default_dir.path());
    }
}
