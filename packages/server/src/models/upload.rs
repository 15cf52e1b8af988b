use serde::Serialize;
use utoipa::ToSchema;

/// Result of a successful image upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadImageResponse {
    /// Publicly reachable URL for the stored image.
    #[schema(example = "http://127.0.0.1:8000/images/6f1c2a9e-3b1d-4f0a-9c7e-2d6b8e5a4c10.jpg")]
    pub image_url: String,
    /// Generated storage name (`<uuid>.<ext>`).
    #[schema(example = "6f1c2a9e-3b1d-4f0a-9c7e-2d6b8e5a4c10.jpg")]
    pub filename: String,
    /// Stored size in bytes.
    pub size: usize,
}
