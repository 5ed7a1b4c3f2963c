//! Response envelopes returned by paginated queries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One page of a filtered query.
///
/// `page` is 1-indexed. `total_pages` is zero when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PageResult<T> {
    pub data: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PageResult<T> {
    /// Build the envelope from a page slice and the unpaginated match count.
    #[must_use]
    pub fn new(data: Vec<T>, total_count: u64, page: u32, limit: u32) -> Self {
        let total_pages = total_count.div_ceil(u64::from(limit.max(1)));
        Self {
            data,
            total_count,
            page,
            limit,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Row offset of a 1-indexed page.
#[must_use]
pub fn page_offset(page: u32, limit: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(limit)
}
