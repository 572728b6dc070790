//! Pagination helpers for list endpoints.

use serde::{Deserialize, Serialize};

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    10
}

/// Query parameters for paginated list endpoints (1-based pages).
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

impl PaginationParams {
    /// Clamp page to >= 1 and size to 1..=100.
    pub fn normalized(&self) -> Self {
        Self {
            page: self.page.max(1),
            size: self.size.clamp(1, 100),
        }
    }

    /// Offset into the full result set for this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }
}

/// Generic paginated response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, params: &PaginationParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            size: params.size,
            pages: page_count(total, params.size),
        }
    }
}

/// Total number of pages: ceil(total / size), zero when there are no items.
pub fn page_count(total: u64, size: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((total + u64::from(size) - 1) / u64::from(size)) as u32
}
