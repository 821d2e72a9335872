use serde::Deserialize;

use crate::validation::{Validate, ValidationErrors};

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// `?offset=&limit=` for list endpoints. `skip` is accepted for `offset`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default, alias = "skip")]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

impl Pagination {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// LIMIT value, capped.
    pub fn capped_limit(&self) -> i64 {
        self.limit.min(MAX_LIMIT)
    }
}

impl Validate for Pagination {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.offset < 0 {
            errors.add("offset", "must not be negative");
        }
        if self.limit < 0 {
            errors.add("limit", "must not be negative");
        }
        errors.into_result()
    }
}
