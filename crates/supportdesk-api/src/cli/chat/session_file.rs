//! The remembered session token, kept in `{data_dir}/session_id`.

use std::path::{Path, PathBuf};

/// File-backed storage for the client's single session id.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session_id"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored id, if any. A missing or blank file means none.
    pub async fn load(&self) -> std::io::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let id = content.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn save(&self, session_id: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, session_id).await
    }

    pub async fn clear(&self) -> std::io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let file = SessionFile::new(tmp.path());
        assert_eq!(file.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let tmp = TempDir::new().unwrap();
        let file = SessionFile::new(&tmp.path().join("nested"));

        file.save("0192f0c4-7a1e-7000-8000-000000000001").await.unwrap();
        assert_eq!(
            file.load().await.unwrap().as_deref(),
            Some("0192f0c4-7a1e-7000-8000-000000000001")
        );

        file.clear().await.unwrap();
        assert_eq!(file.load().await.unwrap(), None);
        file.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let file = SessionFile::new(tmp.path());
        tokio::fs::write(file.path(), "  \n").await.unwrap();
        assert_eq!(file.load().await.unwrap(), None);
    }
}
