//! Inbound message validation.

use supportdesk_types::error::ValidationError;

/// Check a user message before it reaches the conversation service.
///
/// Blank text (after trimming) is rejected. Length is counted in
/// characters on the text as sent, so surrounding whitespace counts
/// against the limit.
pub fn validate_message(text: &str, max_chars: usize) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.chars().count() > max_chars {
        return Err(ValidationError::TooLong { max: max_chars });
    }
    Ok(())
}

/// Normalize an optional client-supplied session id. Blank means absent.
pub fn normalize_session_id(session_id: Option<&str>) -> Option<&str> {
    session_id.filter(|id| !id.trim().is_empty())
}
