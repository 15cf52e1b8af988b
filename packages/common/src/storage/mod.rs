mod error;
mod key;
mod traits;

pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3;

use std::sync::Arc;

use crate::config::{StorageBackendKind, StorageConfig};

pub use error::StorageError;
pub use key::validate_key;
pub use traits::{BoxReader, ObjectStore};

/// Build the object store selected by `config.backend`.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        StorageBackendKind::Filesystem => {
            let store = filesystem::FilesystemObjectStore::new(
                config.data_dir.clone(),
                config.public_base_url.clone(),
                config.max_image_size,
            )
            .await?;
            tracing::info!(dir = %config.data_dir.display(), "Using filesystem image storage");
            Ok(Arc::new(store))
        }
        #[cfg(feature = "object-storage")]
        StorageBackendKind::S3 => {
            let s3_config = config.s3.as_ref().ok_or_else(|| {
                StorageError::Backend("storage.backend = \"s3\" requires a [storage.s3] section".into())
            })?;
            let store = s3::S3ObjectStore::new(s3_config, config.public_base_url.clone())?;
            tracing::info!(bucket = %s3_config.bucket, "Using S3 image storage");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "object-storage"))]
        StorageBackendKind::S3 => Err(StorageError::Backend(
            "S3 storage requested but the `object-storage` feature is disabled".into(),
        )),
    }
}

/// Join a public base URL and an object key.
pub(crate) fn join_public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}
