//! Fixed-size page slicing for post listings.
//!
//! The page number comes straight from the query string and is resolved
//! leniently: anything that is not an integer falls back to the first page,
//! and integers outside `1..=num_pages` fall back to the last page. A listing
//! with no rows still has exactly one (empty) page.

use std::num::IntErrorKind;

use serde::Serialize;

/// Default number of posts per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page arithmetic over a known row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: i64,
    per_page: i64,
    num_pages: i64,
}

impl Paginator {
    /// `per_page` of zero is treated as one.
    pub fn new(count: i64, per_page: u32) -> Self {
        let per_page = i64::from(per_page.max(1));
        let count = count.max(0);
        let num_pages = if count == 0 {
            1
        } else {
            (count + per_page - 1) / per_page
        };
        Self {
            count,
            per_page,
            num_pages,
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn num_pages(&self) -> i64 {
        self.num_pages
    }

    /// Resolve a raw `?page=` value to a valid 1-based page number.
    pub fn get_page(&self, raw: Option<&str>) -> i64 {
        let Some(raw) = raw else {
            return 1;
        };
        let number = match raw.trim().parse::<i64>() {
            Ok(number) => number,
            // Still an integer, just too large for i64.
            Err(e) if is_overflow(e.kind()) => return self.num_pages,
            Err(_) => return 1,
        };
        if number < 1 || number > self.num_pages {
            self.num_pages
        } else {
            number
        }
    }

    /// `(limit, offset)` for a page number previously returned by `get_page`.
    pub fn window(&self, number: i64) -> (i64, i64) {
        (self.per_page, (number - 1) * self.per_page)
    }
}

fn is_overflow(kind: &IntErrorKind) -> bool {
    matches!(kind, IntErrorKind::PosOverflow | IntErrorKind::NegOverflow)
}

/// One page of a listing, plus the navigation facts a client needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub per_page: i64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<i64>,
    pub previous_page_number: Option<i64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: i64, paginator: &Paginator) -> Self {
        let has_next = number < paginator.num_pages;
        let has_previous = number > 1;
        Self {
            items,
            number,
            num_pages: paginator.num_pages,
            count: paginator.count,
            per_page: paginator.per_page,
            has_next,
            has_previous,
            next_page_number: has_next.then_some(number + 1),
            previous_page_number: has_previous.then_some(number - 1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            per_page: self.per_page,
            has_next: self.has_next,
            has_previous: self.has_previous,
            next_page_number: self.next_page_number,
            previous_page_number: self.previous_page_number,
        }
    }
}
