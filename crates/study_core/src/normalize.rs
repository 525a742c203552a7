//! crates/study_core/src/normalize.rs
//!
//! Input validation policy for user-submitted text. The caller decides the
//! ceiling (it is configuration, not domain knowledge); the default below
//! matches the product policy.

/// Default maximum accepted input length, in characters.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 12_000;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("No text provided")]
    EmptyInput,
    /// Carries the ceiling so callers can render actionable feedback.
    #[error("Text is too long (maximum {max} characters)")]
    TooLong { max: usize },
}

/// Validates raw input text and returns it trimmed.
///
/// Rejects empty (after trimming) and over-long input. Performs no other
/// transformation: over-long text is refused, never truncated, so the user
/// resubmits corrected input.
pub fn normalize(raw: &str, max_len: usize) -> Result<String, NormalizeError> {
    if raw.chars().count() > max_len {
        return Err(NormalizeError::TooLong { max: max_len });
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_trimmed_text_unchanged() {
        let out = normalize("  some study text\n", DEFAULT_MAX_TEXT_LENGTH).unwrap();
        assert_eq!(out, "some study text");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(
            normalize("", DEFAULT_MAX_TEXT_LENGTH),
            Err(NormalizeError::EmptyInput)
        );
    }

    #[test]
    fn test_whitespace_only_rejected() {
        assert_eq!(
            normalize("   \n\t ", DEFAULT_MAX_TEXT_LENGTH),
            Err(NormalizeError::EmptyInput)
        );
    }

    #[test]
    fn test_too_long_carries_ceiling() {
        let long = "x".repeat(31);
        assert_eq!(normalize(&long, 30), Err(NormalizeError::TooLong { max: 30 }));
    }

    #[test]
    fn test_exactly_at_ceiling_accepted() {
        let text = "y".repeat(30);
        assert_eq!(normalize(&text, 30).unwrap(), text);
    }

    #[test]
    fn test_too_long_message_names_the_ceiling() {
        let err = normalize(&"z".repeat(50), 30).unwrap_err();
        assert!(err.to_string().contains("30"));
    }
}
