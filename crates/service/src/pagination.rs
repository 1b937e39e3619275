//! Pagination utilities for service layer
//!
//! Provides a `Pagination` window validated from optional query inputs.

use crate::errors::ServiceError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    /// Apply defaults; `page` must be >= 1 and `limit` within 1..=100.
    pub fn from_params(page: Option<u64>, limit: Option<u64>) -> Result<Self, ServiceError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page == 0 {
            return Err(ServiceError::Validation("page must be >= 1".into()));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ServiceError::Validation(format!("limit must be within 1..={MAX_LIMIT}")));
        }
        Ok(Self { page, limit })
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn defaults_apply_when_absent() {
        let p = Pagination::from_params(None, None).unwrap();
        assert_eq!(p, Pagination::default());
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let p = Pagination::from_params(Some(3), Some(25)).unwrap();
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn rejects_zero_page_and_out_of_range_limit() {
        assert!(Pagination::from_params(Some(0), None).is_err());
        assert!(Pagination::from_params(None, Some(0)).is_err());
        assert!(Pagination::from_params(None, Some(101)).is_err());
        assert!(Pagination::from_params(None, Some(100)).is_ok());
    }
}
