//! Filesystem storage for generated report files.
//!
//! Reports live flat in one directory. Only bare file names are accepted, so a caller can
//! never address a path outside that directory.

use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::error::{AppError, AppResult};

/// Report directory wrapper.
#[derive(Debug, Clone)]
pub struct ReportStorage {
    root: PathBuf,
}

impl ReportStorage {
    /// Open the report directory, creating it if necessary.
    pub async fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to create report directory {}: {}",
                root.display(),
                e
            ))
        })?;

        info!("Report storage initialized: dir={}", root.display());

        Ok(ReportStorage { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a report file, replacing any file of the same name.
    pub async fn put(&self, file_name: &str, contents: &str) -> AppResult<PathBuf> {
        let path = self.resolve(file_name)?;

        // The directory may have been removed since startup.
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create report directory: {}", e)))?;

        tokio::fs::write(&path, contents.as_bytes())
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write report {}: {}", file_name, e)))?;

        Ok(path)
    }

    /// Read a report file.
    pub async fn get(&self, file_name: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(file_name)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found("Report file", file_name))
            }
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read report {}: {}",
                file_name, e
            ))),
        }
    }

    /// Remove a report file if present.
    pub async fn remove(&self, file_name: &str) -> AppResult<()> {
        let path = self.resolve(file_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Map a bare file name to its path inside the report directory.
    fn resolve(&self, file_name: &str) -> AppResult<PathBuf> {
        validate_file_name(file_name)?;
        let path = self.root.join(file_name);
        if path.parent() != Some(self.root.as_path()) {
            return Err(AppError::InvalidInput(format!(
                "Invalid report file name '{}'",
                file_name
            )));
        }
        Ok(path)
    }
}

/// Accept only a single, normal path component.
pub fn validate_file_name(file_name: &str) -> AppResult<()> {
    let invalid = || AppError::InvalidInput(format!("Invalid report file name '{}'", file_name));

    if file_name.is_empty()
        || file_name.contains('/')
        || file_name.contains('\\')
        || file_name.contains('\0')
        || file_name.contains("..")
    {
        return Err(invalid());
    }

    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}
