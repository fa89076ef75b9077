//! Filter and page types for listing objectives.

use serde::{Deserialize, Serialize};

use super::{Objective, ObjectiveStatus};
use crate::error::{HierarchyError, Result};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page a single listing call returns.
pub const MAX_PAGE_SIZE: usize = 100;

/// Filter options for listing objectives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectiveFilter {
    /// Exact status match
    pub status: Option<ObjectiveStatus>,

    /// Requested page size; 0 or `None` means the default
    pub page_size: Option<usize>,

    /// Continuation token returned by a previous page
    pub page_token: Option<String>,
}

/// Offset window resolved from an [`ObjectiveFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

impl ObjectiveFilter {
    /// Resolves the page size and token into a concrete window.
    ///
    /// The token is the decimal offset into the filtered, sorted set.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::InvalidInput` when the token is not a
    /// non-negative integer no larger than `i64::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use summit_core::models::{ObjectiveFilter, PageWindow};
    ///
    /// let filter = ObjectiveFilter {
    ///     page_size: Some(2),
    ///     page_token: Some("4".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(filter.window()?, PageWindow { offset: 4, limit: 2 });
    /// # Ok::<(), summit_core::HierarchyError>(())
    /// ```
    pub fn window(&self) -> Result<PageWindow> {
        let limit = match self.page_size {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        };
        let offset = match self.page_token.as_deref() {
            None | Some("") => 0,
            Some(token) => token
                .parse::<i64>()
                .ok()
                .and_then(|offset| usize::try_from(offset).ok())
                .ok_or_else(|| {
                    HierarchyError::invalid_input("pageToken")
                        .with_reason(format!("Malformed page token: {token}"))
                })?,
        };
        Ok(PageWindow { offset, limit })
    }
}

impl PageWindow {
    /// Token for the page after this one, if any items remain.
    pub fn next_token(&self, returned: usize, total: usize) -> Option<String> {
        let end = self.offset + returned;
        (returned > 0 && end < total).then(|| end.to_string())
    }
}

/// One page of objectives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectivePage {
    pub objectives: Vec<Objective>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,

    /// Number of objectives matching the filter across all pages
    pub total_size: usize,
}

/// Record counts held by a store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreCounts {
    pub objectives: usize,
    pub plans: usize,
    pub tasks: usize,
}
