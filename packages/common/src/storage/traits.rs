use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Key-addressed object storage that hands out public URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing object.
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Retrieve an object as a streaming async reader.
    async fn get_stream(&self, key: &str) -> Result<BoxReader, StorageError>;

    /// Durable public URL under which `key` is reachable.
    fn public_url(&self, key: &str) -> String;
}
