//! Input validation for untrusted data.
//!
//! Every name taken from a path, query or body is checked before it reaches
//! the engine.

use thiserror::Error;

/// Maximum length for visual-type keys.
pub const MAX_VISUAL_TYPE_LEN: usize = 64;
/// Maximum length for element names.
pub const MAX_ELEMENT_NAME_LEN: usize = 64;
/// Maximum length for variant names.
pub const MAX_VARIANT_NAME_LEN: usize = 64;
/// Maximum size of an imported transport document.
pub const MAX_IMPORT_SIZE: usize = 1_048_576; // 1MB

/// Validation error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Visual-type key exceeds maximum length.
    #[error("visual_type too long (max {MAX_VISUAL_TYPE_LEN} chars)")]
    VisualTypeTooLong,
    /// Visual-type key is empty or contains invalid characters.
    #[error("visual_type contains invalid characters")]
    VisualTypeInvalidChars,
    /// Element name exceeds maximum length.
    #[error("element too long (max {MAX_ELEMENT_NAME_LEN} chars)")]
    ElementNameTooLong,
    /// Element name is empty or contains invalid characters.
    #[error("element contains invalid characters")]
    ElementNameInvalidChars,
    /// Variant name exceeds maximum length.
    #[error("variant too long (max {MAX_VARIANT_NAME_LEN} chars)")]
    VariantNameTooLong,
    /// Variant name is empty or contains invalid characters.
    #[error("variant contains invalid characters")]
    VariantNameInvalidChars,
    /// Import body exceeds maximum size.
    #[error("import document too large (max {MAX_IMPORT_SIZE} bytes)")]
    ImportTooLarge,
}

impl ValidationError {
    /// Short label for metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VisualTypeTooLong | Self::VisualTypeInvalidChars => "visual_type",
            Self::ElementNameTooLong | Self::ElementNameInvalidChars => "element",
            Self::VariantNameTooLong | Self::VariantNameInvalidChars => "variant",
            Self::ImportTooLarge => "import",
        }
    }
}

/// Check if a character is valid for names (alphanumeric, hyphen, or underscore).
fn is_valid_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_valid_name_char)
}

/// Validate a visual-type key.
///
/// Unknown but well-formed keys are accepted; they resolve to empty layouts.
///
/// # Errors
///
/// Returns [`ValidationError::VisualTypeTooLong`] if the key exceeds 64 characters.
/// Returns [`ValidationError::VisualTypeInvalidChars`] if the key is empty or contains invalid characters.
pub fn validate_visual_type(key: &str) -> Result<(), ValidationError> {
    if key.len() > MAX_VISUAL_TYPE_LEN {
        return Err(ValidationError::VisualTypeTooLong);
    }
    if !is_valid_name(key) {
        return Err(ValidationError::VisualTypeInvalidChars);
    }
    Ok(())
}

/// Validate an element name.
///
/// Valid element names:
/// - 1-64 characters
/// - Alphanumeric, hyphen, underscore only
///
/// # Errors
///
/// Returns [`ValidationError::ElementNameTooLong`] if the name exceeds 64 characters.
/// Returns [`ValidationError::ElementNameInvalidChars`] if the name is empty or contains invalid characters.
pub fn validate_element_name(name: &str) -> Result<(), ValidationError> {
    if name.len() > MAX_ELEMENT_NAME_LEN {
        return Err(ValidationError::ElementNameTooLong);
    }
    if !is_valid_name(name) {
        return Err(ValidationError::ElementNameInvalidChars);
    }
    Ok(())
}

/// Validate an optional variant name.
///
/// # Errors
///
/// Returns [`ValidationError::VariantNameTooLong`] if the name exceeds 64 characters.
/// Returns [`ValidationError::VariantNameInvalidChars`] if the name is empty or contains invalid characters.
pub fn validate_variant(name: Option<&str>) -> Result<(), ValidationError> {
    let Some(name) = name else {
        return Ok(());
    };
    if name.len() > MAX_VARIANT_NAME_LEN {
        return Err(ValidationError::VariantNameTooLong);
    }
    if !is_valid_name(name) {
        return Err(ValidationError::VariantNameInvalidChars);
    }
    Ok(())
}

/// Validate the size of an import body.
///
/// # Errors
///
/// Returns [`ValidationError::ImportTooLarge`] if the body exceeds 1MB.
pub fn validate_import_size(body: &str) -> Result<(), ValidationError> {
    if body.len() > MAX_IMPORT_SIZE {
        return Err(ValidationError::ImportTooLarge);
    }
    Ok(())
}
