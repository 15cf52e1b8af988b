use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use uuid::Uuid;

use crate::error::AppError;

/// Content types accepted on upload. Some clients send images as
/// `application/octet-stream`; a missing content type is also accepted and
/// resolved from the filename or the bytes.
const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "application/octet-stream",
];

/// Why an upload was refused. All variants are client errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("Empty file - no content received")]
    Empty,
    #[error("Uploaded file is not a valid image")]
    NotAnImage,
}

impl From<ImageRejection> for AppError {
    fn from(err: ImageRejection) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Stored image extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExt {
    Jpg,
    Png,
    Webp,
}

impl ImageExt {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" | "image/jpg" => Some(Self::Jpg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::WebP => Some(Self::Webp),
            _ => None,
        }
    }
}

/// A validated upload, ready for the object store.
#[derive(Debug)]
pub struct PreparedImage {
    /// Fresh storage key: `{uuid}.{ext}`.
    pub key: String,
    pub content_type: &'static str,
    pub size: usize,
}

/// Strip parameters and normalize case: `Image/PNG; q=1` -> `image/png`.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn check_content_type(content_type: Option<&str>) -> Result<(), ImageRejection> {
    match content_type {
        None => Ok(()),
        Some(ct) if ALLOWED_CONTENT_TYPES.contains(&essence(ct).as_str()) => Ok(()),
        Some(ct) => Err(ImageRejection::UnsupportedType(ct.to_string())),
    }
}

/// Header-level check that `bytes` is a JPEG, PNG or WebP image.
/// Nothing is decoded beyond the dimensions.
pub fn verify_image(bytes: &[u8]) -> Result<ImageFormat, ImageRejection> {
    if bytes.is_empty() {
        return Err(ImageRejection::Empty);
    }
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| ImageRejection::NotAnImage)?;
    let format = reader.format().ok_or(ImageRejection::NotAnImage)?;
    reader
        .into_dimensions()
        .map_err(|_| ImageRejection::NotAnImage)?;
    Ok(format)
}

/// Pick the stored extension: filename extension, then claimed content
/// type, then the sniffed format, then `jpg`.
pub fn normalized_extension(
    filename: Option<&str>,
    content_type: Option<&str>,
    detected: Option<ImageFormat>,
) -> ImageExt {
    filename
        .and_then(|name| name.rsplit_once('.'))
        .and_then(|(_, ext)| ImageExt::from_extension(ext))
        .or_else(|| content_type.and_then(|ct| ImageExt::from_content_type(&essence(ct))))
        .or_else(|| detected.and_then(ImageExt::from_format))
        .unwrap_or(ImageExt::Jpg)
}

/// Validate an upload and derive its storage key.
pub fn prepare_upload(
    filename: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<PreparedImage, ImageRejection> {
    check_content_type(content_type)?;
    let format = verify_image(bytes)?;
    let ext = normalized_extension(filename, content_type, Some(format));

    Ok(PreparedImage {
        key: format!("{}.{}", Uuid::new_v4(), ext.as_str()),
        content_type: ext.content_type(),
        size: bytes.len(),
    })
}
