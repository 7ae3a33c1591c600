//! Input validation helpers
//!
//! Every piece of client text goes through here before it reaches the
//! presence tracker or the message board.

use crate::shared::error::SharedError;

/// Trim `value` and reject it if nothing is left
pub fn require_non_empty(field: &str, value: &str) -> Result<String, SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Parse the `limit` query parameter
///
/// Only strictly positive integers are accepted.
pub fn parse_limit(raw: &str) -> Result<i64, SharedError> {
    let limit = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| SharedError::validation("limit", "must be a positive integer"))?;
    check_limit(limit)?;
    Ok(limit)
}

/// Reject limits that are zero or negative
pub fn check_limit(limit: i64) -> Result<usize, SharedError> {
    if limit <= 0 {
        return Err(SharedError::validation("limit", "must be a positive integer"));
    }
    usize::try_from(limit).map_err(|_| SharedError::validation("limit", "is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_trims() {
        assert_eq!(require_non_empty("name", "  Ana ").unwrap(), "Ana");
    }

    #[test]
    fn test_require_non_empty_rejects_blank() {
        let err = require_non_empty("text", "   ").unwrap_err();
        assert_eq!(err.field(), "text");
        assert!(require_non_empty("text", "").is_err());
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("10").unwrap(), 10);
        assert_eq!(parse_limit(" 3 ").unwrap(), 3);
        assert!(parse_limit("0").is_err());
        assert!(parse_limit("-4").is_err());
        assert!(parse_limit("ten").is_err());
        assert!(parse_limit("2.5").is_err());
        assert!(parse_limit("").is_err());
    }
}
