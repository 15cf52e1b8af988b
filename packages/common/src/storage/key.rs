use super::error::StorageError;

/// Validates an object key. Keys are flat file names: no directories,
/// no traversal, no hidden files, no control characters.
pub fn validate_key(key: &str) -> Result<&str, StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".into()));
    }
    if key.chars().any(|c| c.is_control()) {
        return Err(StorageError::InvalidKey(
            "control characters are not allowed".into(),
        ));
    }
    if key.contains('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "path separators are not allowed".into(),
        ));
    }
    if key.starts_with('.') {
        // Also covers "." and "..".
        return Err(StorageError::InvalidKey(
            "keys must not start with '.'".into(),
        ));
    }
    Ok(key)
}
