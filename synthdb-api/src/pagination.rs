//! Pagination parameters for list endpoints
//!
//! `limit` / `offset` arrive as query-string values; invalid values are
//! rejected with the full list of violations before any query runs. The
//! `count` a list endpoint returns is always the total of matching rows,
//! never the page size.

use std::collections::HashMap;

/// Default page size when `limit` is omitted
pub const DEFAULT_LIMIT: i64 = 20;

/// Parsed and validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Rows per page, `>= 1`
    pub limit: i64,
    /// Rows to skip, `>= 0`
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// Parse `limit` / `offset` from query parameters
    ///
    /// Returns every violation on failure so the 400 body lists them all.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();
        let mut page = Self::default();

        if let Some(raw) = params.get("limit") {
            match raw.parse::<i64>() {
                Ok(limit) if limit >= 1 => page.limit = limit,
                _ => errors.push("limit must be a positive number".to_string()),
            }
        }

        if let Some(raw) = params.get("offset") {
            match raw.parse::<i64>() {
                Ok(offset) if offset >= 0 => page.offset = offset,
                _ => errors.push("offset must be a non-negative number".to_string()),
            }
        }

        if errors.is_empty() {
            Ok(page)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let page = Page::from_query(&HashMap::new()).unwrap();
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_explicit_values() {
        let page = Page::from_query(&params(&[("limit", "1"), ("offset", "5")])).unwrap();
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 5);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let errors = Page::from_query(&params(&[("limit", "0")])).unwrap_err();
        assert_eq!(errors, vec!["limit must be a positive number".to_string()]);
    }

    #[test]
    fn test_negative_offset_rejected() {
        let errors = Page::from_query(&params(&[("offset", "-1")])).unwrap_err();
        assert_eq!(errors, vec!["offset must be a non-negative number".to_string()]);
    }

    #[test]
    fn test_non_numeric_values_collect_both_errors() {
        let errors = Page::from_query(&params(&[("limit", "abc"), ("offset", "xyz")])).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
