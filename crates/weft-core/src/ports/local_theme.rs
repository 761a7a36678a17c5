//! Local theme port (driven/secondary port)
//!
//! The interface for the local theme directory: listing the raw file set
//! the eligibility resolver consumes, and reading/writing asset content.
//! Keys are forward-slash relative paths, the same shape the store uses.
//!
//! Content is read lazily: the engine lists first, filters, and only then
//! fetches bytes for the files that survived.

/// Port trait for local theme directory operations.
#[async_trait::async_trait]
pub trait ILocalTheme: Send + Sync {
    /// Lists every file under the theme root as relative keys.
    ///
    /// The listing is raw: eligibility filtering is the resolver's job,
    /// not the lister's.
    async fn list_files(&self) -> anyhow::Result<Vec<String>>;

    /// Reads the content of the file at `key`.
    async fn read_file(&self, key: &str) -> anyhow::Result<Vec<u8>>;

    /// Writes `data` to the file at `key`, creating parent directories.
    async fn write_file(&self, key: &str, data: &[u8]) -> anyhow::Result<()>;

    /// Deletes the file at `key`.
    async fn delete_file(&self, key: &str) -> anyhow::Result<()>;
}
