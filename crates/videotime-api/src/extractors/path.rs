//! Typed path parameter helpers.

use std::str::FromStr;

use videotime_core::error::AppError;

/// Parses an identifier from a path segment.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use videotime_core::types::id::ModuleId;

    #[test]
    fn test_parse_id() {
        let id = ModuleId::new();
        assert_eq!(parse_id::<ModuleId>(&id.to_string()).unwrap(), id);
        assert!(parse_id::<ModuleId>("abc").is_err());
    }
}
