//! Pagination Types

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation;

/// Window over a list endpoint, sent as `skip` and `limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of records to skip. Must be `>= 0`.
    pub skip: i64,
    /// Maximum number of records to return. Must be within `1..=100`.
    pub limit: i64,
}

impl Pagination {
    /// Largest page the service hands out.
    pub const MAX_LIMIT: i64 = 100;

    pub const fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    pub fn validate(&self) -> Result<()> {
        validation::min(self.skip, 0, "skip")?;
        validation::in_range(self.limit, 1, Self::MAX_LIMIT, "limit")
    }

    /// Query pairs in the order the service documents them.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("skip".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::MAX_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_full_page() {
        let page = Pagination::default();
        assert_eq!(page, Pagination::new(0, 100));
        assert!(page.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert_eq!(Pagination::new(-1, 10).validate().unwrap_err().field, "skip");
        assert_eq!(Pagination::new(0, 0).validate().unwrap_err().field, "limit");
        assert_eq!(Pagination::new(0, 101).validate().unwrap_err().field, "limit");
        assert!(Pagination::new(250, 1).validate().is_ok());
    }

    #[test]
    fn test_to_query() {
        let query = Pagination::new(20, 10).to_query();
        assert_eq!(
            query,
            vec![
                ("skip".to_string(), "20".to_string()),
                ("limit".to_string(), "10".to_string())
            ]
        );
    }
}
