//! Query parameter extractors for list endpoints.

use serde::Deserialize;

/// `?page=` on listing endpoints.
///
/// Kept as raw text: anything that is not an integer falls back to the first
/// page, and any integer outside `1..=num_pages` lands on the last page. That
/// includes zero and integers too large for i64.
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }
}
