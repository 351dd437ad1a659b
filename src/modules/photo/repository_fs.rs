use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{api::error, modules::photo::repository::PhotoRepository};

#[derive(Clone)]
pub struct PhotoFsRepository {
    root: PathBuf,
}

impl PhotoFsRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the store directory if it doesn't exist
    pub async fn ensure_root(&self) -> Result<(), error::SystemError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    // Leading dot and trailing `.tmp` keep it out of listings and the file endpoint.
    fn temp_path(&self, name: &str) -> PathBuf {
        self.root.join(format!(".{}.tmp", name))
    }
}

#[async_trait::async_trait]
impl PhotoRepository for PhotoFsRepository {
    async fn exists(&self, name: &str) -> Result<bool, error::SystemError> {
        Ok(tokio::fs::try_exists(self.path(name)).await?)
    }

    async fn save(&self, name: &str, bytes: &[u8]) -> Result<(), error::SystemError> {
        self.ensure_root().await?;

        let temp_path = self.temp_path(name);
        tokio::fs::write(&temp_path, bytes).await?;

        if let Err(e) = tokio::fs::rename(&temp_path, self.path(name)).await {
            tokio::fs::remove_file(&temp_path).await.ok();
            return Err(e.into());
        }

        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<bool, error::SystemError> {
        match tokio::fs::remove_file(self.path(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<String>, error::SystemError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => log::debug!("Skipping non UTF-8 file name {:?}", raw),
            }
        }

        Ok(names)
    }

    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, error::SystemError> {
        let path = self.path(name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        Ok(Some(tokio::fs::read(&path).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_save_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PhotoFsRepository::new(dir.path());

        repo.save("2024-01-01.png", b"png-bytes").await.unwrap();

        assert!(repo.exists("2024-01-01.png").await.unwrap());
        assert_eq!(repo.read("2024-01-01.png").await.unwrap().as_deref(), Some(&b"png-bytes"[..]));
        assert!(!dir.path().join(".2024-01-01.png.tmp").exists());
    }

    #[actix_web::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PhotoFsRepository::new(dir.path());

        repo.save("2024-01-01.png", b"first").await.unwrap();
        repo.save("2024-01-01.png", b"second").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("2024-01-01.png")).unwrap(), b"second");
    }

    #[actix_web::test]
    async fn test_save_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PhotoFsRepository::new(dir.path().join("nested").join("uploads"));

        repo.save("2024-01-01.gif", b"gif").await.unwrap();

        assert!(repo.root().join("2024-01-01.gif").is_file());
    }

    #[actix_web::test]
    async fn test_remove_reports_absence() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PhotoFsRepository::new(dir.path());
        repo.save("2024-01-01.jpg", b"jpg").await.unwrap();

        assert!(repo.remove("2024-01-01.jpg").await.unwrap());
        assert!(!repo.remove("2024-01-01.jpg").await.unwrap());
    }

    #[actix_web::test]
    async fn test_list_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PhotoFsRepository::new(dir.path().join("missing"));

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_list_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("2024-01-02.png")).unwrap();
        std::fs::write(dir.path().join("2024-01-01.png"), b"png").unwrap();
        let repo = PhotoFsRepository::new(dir.path());

        assert_eq!(repo.list().await.unwrap(), vec!["2024-01-01.png".to_string()]);
        assert_eq!(repo.read("2024-01-02.png").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PhotoFsRepository::new(dir.path());

        assert_eq!(repo.read("2024-01-01.png").await.unwrap(), None);
    }
}
