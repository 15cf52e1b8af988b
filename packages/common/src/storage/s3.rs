use std::io::Cursor;

use async_trait::async_trait;
use s3::Region;
use s3::bucket::Bucket;
use s3::creds::Credentials;

use super::error::StorageError;
use super::join_public_url;
use super::key::validate_key;
use super::traits::{BoxReader, ObjectStore};
use crate::config::S3Config;

/// Object store backed by an S3-compatible bucket.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    public_base_url: String,
}

impl S3ObjectStore {
    pub fn new(config: &S3Config, public_base_url: String) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| StorageError::Backend(format!("invalid S3 region: {e}")))?,
        };

        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("S3 credentials error: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(format!("S3 bucket error: {e}")))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            public_base_url,
        })
    }
}

fn check_status(op: &str, key: &str, status: u16) -> Result<(), StorageError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(key.to_string())),
        _ => Err(StorageError::Backend(format!(
            "S3 {op} of '{key}' returned HTTP {status}"
        ))),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let response = self
            .bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| StorageError::Backend(format!("S3 upload failed: {e}")))?;
        check_status("upload", key, response.status_code())?;

        tracing::info!(bucket = %self.bucket.name(), key, "S3 upload");
        Ok(())
    }

    async fn get_stream(&self, key: &str) -> Result<BoxReader, StorageError> {
        validate_key(key)?;
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| StorageError::Backend(format!("S3 download failed: {e}")))?;
        check_status("download", key, response.status_code())?;

        Ok(Box::new(Cursor::new(response.bytes().to_vec())))
    }

    fn public_url(&self, key: &str) -> String {
        join_public_url(&self.public_base_url, key)
    }
}
