//! Common validation rules shared across request payloads.

use validator::ValidationError;

/// Validates a leave category code.
///
/// Requirements:
/// - lowercase ASCII letters, digits and underscores
/// - 1-32 characters in length
pub fn validate_category_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || code.len() > 32 {
        return Err(ValidationError::new("category_code_invalid_length"));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ValidationError::new("category_code_invalid_characters"));
    }

    Ok(())
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_code_rejects_empty() {
        assert!(validate_category_code("").is_err());
    }

    #[test]
    fn category_code_rejects_uppercase_and_spaces() {
        assert!(validate_category_code("Annual").is_err());
        assert!(validate_category_code("sick leave").is_err());
    }

    #[test]
    fn category_code_accepts_valid() {
        assert!(validate_category_code("annual_2025").is_ok());
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank(" ok ").is_ok());
    }
}
