use crate::api::error;

/// Flat, name-addressed storage for photo files.
#[async_trait::async_trait]
pub trait PhotoRepository {
    async fn exists(&self, name: &str) -> Result<bool, error::SystemError>;

    /// Writes `bytes` under `name`, replacing any previous content.
    async fn save(&self, name: &str, bytes: &[u8]) -> Result<(), error::SystemError>;

    /// Returns `false` when there was nothing to remove.
    async fn remove(&self, name: &str) -> Result<bool, error::SystemError>;

    /// Names of every file in the store. A store that does not exist yet is empty.
    async fn list(&self) -> Result<Vec<String>, error::SystemError>;

    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, error::SystemError>;
}
