//! Field validation helpers shared by configuration checks.

/// Validate that a string is not empty or whitespace.
pub fn validate_non_empty(s: &str, field: &str) -> crate::types::Result<()> {
    if s.trim().is_empty() {
        return Err(crate::types::Error::config(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("users.list", "action").is_ok());
        assert!(validate_non_empty("", "action").is_err());
        let err = validate_non_empty("   ", "tools[2].name").unwrap_err();
        assert_eq!(err.to_string(), "configuration error: tools[2].name cannot be empty");
    }
}
