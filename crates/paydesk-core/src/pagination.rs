//! Offset pagination shared by every list operation
//!
//! A list call returns a [`Page`]: the requested slice plus the total
//! number of rows matching the same filter. Only `data` and `total` go
//! over the wire; `skip`/`take` stay server-side for rendering pagers.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Largest `skip` or `take` the database accepts
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination request parameters for offset-based pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Number of items to skip
    pub skip: u64,
    /// Maximum number of items to return
    pub take: u64,
}

impl PageRequest {
    /// Create a new page request
    pub fn new(skip: u64, take: u64) -> Self {
        Self { skip, take }
    }

    /// Create a page request, rejecting an empty page and clamping `take`
    /// to `max_take`. Offsets past [`MAX_OFFSET`] are rejected since the
    /// database binds them as signed 64-bit integers.
    pub fn bounded(skip: u64, take: u64, max_take: u64) -> CoreResult<Self> {
        if take == 0 {
            return Err(CoreError::validation("take must be at least 1"));
        }
        if skip > MAX_OFFSET {
            return Err(CoreError::validation(format!(
                "skip must be at most {}",
                MAX_OFFSET
            )));
        }
        Ok(Self {
            skip,
            take: take.min(max_take.max(1)).min(MAX_OFFSET),
        })
    }

    /// Get the page number (1-based) for this request
    pub fn page_number(&self) -> u64 {
        if self.take == 0 {
            1
        } else {
            (self.skip / self.take) + 1
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { skip: 0, take: 10 }
    }
}

/// Paginated response: one slice of rows plus the filtered total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The items in this page
    pub data: Vec<T>,
    /// Total number of matching items across all pages
    pub total: u64,
    /// Number of items skipped before this page
    #[serde(skip)]
    pub skip: u64,
    /// Maximum number of items per page
    #[serde(skip)]
    pub take: u64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            data,
            total,
            skip: request.skip,
            take: request.take,
        }
    }

    /// Check if there are more pages after this one
    pub fn has_more(&self) -> bool {
        self.skip + (self.data.len() as u64) < self.total
    }

    /// Get the current page number (1-based)
    pub fn page_number(&self) -> u64 {
        PageRequest::new(self.skip, self.take).page_number()
    }

    /// Get the total number of pages (at least 1)
    pub fn total_pages(&self) -> u64 {
        if self.take == 0 {
            1
        } else {
            self.total.div_ceil(self.take).max(1)
        }
    }

    /// Check if this is the first page
    pub fn is_first_page(&self) -> bool {
        self.skip == 0
    }

    /// Check if this is the last page
    pub fn is_last_page(&self) -> bool {
        !self.has_more()
    }

    /// Transform the rows, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            skip: self.skip,
            take: self.take,
        }
    }
}
