use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::storage::{ObjectStore, validate_key};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::upload::UploadImageResponse;
use crate::state::AppState;
use crate::utils::image_file::prepare_upload;

/// Multipart framing overhead allowed on top of the image size limit.
const MULTIPART_SLACK: u64 = 1024 * 1024;

pub fn upload_body_limit(max_image_size: u64) -> DefaultBodyLimit {
    let limit = max_image_size.saturating_add(MULTIPART_SLACK);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    post,
    path = "/upload-image",
    tag = "Images",
    operation_id = "uploadImage",
    summary = "Upload a jewellery image",
    description = "Stores a JPEG, PNG or WebP image sent as the `file` multipart field and returns its public URL. \
        The payload must be non-empty and carry a valid image header. The stored name is a fresh UUID with \
        a `jpg`, `png` or `webp` extension. Use the returned `image_url` when creating or updating an item.",
    request_body(content_type = "multipart/form-data", description = "Image file in the `file` field"),
    responses(
        (status = 200, description = "Image stored", body = UploadImageResponse),
        (status = 400, description = "Empty, invalid or unsupported file (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadImageResponse>, AppError> {
    let max_size = state.config.storage.max_image_size;
    let mut upload: Option<(Option<String>, Option<String>, Vec<u8>)> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue; // Ignore unknown fields.
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
        {
            if (bytes.len() + chunk.len()) as u64 > max_size {
                return Err(AppError::Validation(format!(
                    "File exceeds maximum size of {max_size} bytes"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        upload = Some((file_name, content_type, bytes));
    }

    let (file_name, content_type, bytes) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let prepared = prepare_upload(file_name.as_deref(), content_type.as_deref(), &bytes)
        .inspect_err(|e| {
            tracing::warn!(
                file_name = ?file_name,
                content_type = ?content_type,
                size = bytes.len(),
                "Rejected upload: {e}"
            );
        })?;

    state
        .images
        .put(&prepared.key, &bytes, prepared.content_type)
        .await?;

    let image_url = state.images.public_url(&prepared.key);
    tracing::info!(key = %prepared.key, size = prepared.size, "Stored uploaded image");

    Ok(Json(UploadImageResponse {
        image_url,
        filename: prepared.key,
        size: prepared.size,
    }))
}

#[utoipa::path(
    get,
    path = "/images/{key}",
    tag = "Images",
    operation_id = "getImage",
    summary = "Download a stored image",
    description = "Streams an image previously stored through `/upload-image`. Supports ETag-based caching via If-None-Match.",
    params(("key" = String, Path, description = "Stored file name, e.g. `0192...c1.png`")),
    responses(
        (status = 200, description = "Image content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Image not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn get_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    validate_key(&key).map_err(|_| AppError::NotFound("Image not found".into()))?;
    build_image_response(&key, &headers, &*state.images).await
}

/// Build a streaming image response. Keys are never reused, so the key
/// itself serves as the ETag.
async fn build_image_response(
    key: &str,
    headers: &HeaderMap,
    images: &dyn ObjectStore,
) -> Result<Response, AppError> {
    let etag_value = format!("\"{key}\"");
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = images.get_stream(key).await?;
    let body = Body::from_stream(ReaderStream::new(reader));
    let content_type = mime_guess::from_path(key).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
