//! Input validation for identifiers arriving from the front-ends.

/// Validation errors with messages fit for relaying to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("user id must be a non-empty string of digits")]
    BadUserId,

    #[error("catalog key must be 1-32 lowercase ascii letters, digits, or underscores")]
    BadCatalogKey,
}

/// Validate the string form of a chat-platform numeric id.
pub fn validate_user_id(id: &str) -> Result<&str, ValidationError> {
    if id.is_empty() || id.len() > 24 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::BadUserId);
    }
    Ok(id)
}

/// Validate a catalog key as typed by a user in `BUY <key>`.
pub fn validate_catalog_key(key: &str) -> Result<&str, ValidationError> {
    let ok = !key.is_empty()
        && key.len() <= 32
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if ok {
        Ok(key)
    } else {
        Err(ValidationError::BadCatalogKey)
    }
}

/// Trim and bound a platform display name before storing it. Control
/// characters are stripped; an unusable name collapses to the empty string,
/// which the registry treats the same as no name at all.
pub fn sanitize_username(name: &str) -> String {
    const MAX_LEN: usize = 64;
    name.trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_LEN)
        .collect()
}
