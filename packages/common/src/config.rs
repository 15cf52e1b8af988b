use std::path::PathBuf;

use serde::Deserialize;

/// Which object-storage backend holds uploaded images.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// Local directory, served back by the API under `/images`.
    #[default]
    Filesystem,
    /// Any S3-compatible bucket (requires the `object-storage` feature).
    S3,
}

/// Connection settings for an S3-compatible bucket.
#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    pub bucket: String,
    /// Region name. Default: "auto".
    #[serde(default = "default_s3_region")]
    pub region: String,
    /// Custom endpoint, e.g. `https://<project>.supabase.co/storage/v1/s3`.
    pub endpoint: Option<String>,
    pub access_key: String,
    pub secret_key: String,
    /// Use path-style addressing (`endpoint/bucket/key`). Default: true.
    #[serde(default = "default_s3_path_style")]
    pub path_style: bool,
}

/// App-level image storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,
    /// Root directory for the filesystem backend. Default: "./data/images".
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Prefix of the public URLs handed back to clients.
    /// Default: "http://127.0.0.1:8000/images".
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Largest accepted image in bytes. Default: 10 MiB.
    #[serde(default = "default_max_image_size")]
    pub max_image_size: u64,
    #[serde(default)]
    pub s3: Option<S3Config>,
}

fn default_s3_region() -> String {
    "auto".into()
}
fn default_s3_path_style() -> bool {
    true
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/images")
}
fn default_public_base_url() -> String {
    "http://127.0.0.1:8000/images".into()
}
fn default_max_image_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            data_dir: default_data_dir(),
            public_base_url: default_public_base_url(),
            max_image_size: default_max_image_size(),
            s3: None,
        }
    }
}
