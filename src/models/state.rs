//! Filter, sort and pagination state owned by the table store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Field;

/// A dropdown-style filter: either everything or one lowercase value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parse a filter control value. Blank input and `all` mean no filter.
    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_lowercase();
        if value.is_empty() || value == "all" {
            Selection::All
        } else {
            Selection::Only(value)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

/// Active search and filter predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Lowercase, trimmed search term (empty means no search)
    pub search_term: String,
    /// Category key equality filter
    pub category: Selection,
    /// Status substring filter
    pub status: Selection,
}

impl FilterState {
    pub fn new(search: &str, category: &str, status: &str) -> Self {
        Self {
            search_term: normalize_term(search),
            category: Selection::parse(category),
            status: Selection::parse(status),
        }
    }

    pub fn set_search(&mut self, search: &str) {
        self.search_term = normalize_term(search);
    }

    /// True when no predicate is active.
    pub fn is_default(&self) -> bool {
        self.search_term.is_empty() && self.category.is_all() && self.status.is_all()
    }
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<Field>,
    pub direction: SortDirection,
}

impl SortState {
    /// Apply a column header click: the active column flips direction,
    /// any other column starts ascending.
    pub fn select(&mut self, column: Field) {
        if self.column == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Asc;
        }
    }
}

/// Page size and position over the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_pages: 1,
        }
    }

    /// Recompute the page count for `len` rows and clamp the current page.
    pub fn recompute(&mut self, len: usize) {
        self.total_pages = len.div_ceil(self.page_size).max(1);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    /// Zero-based row range of the current page within `len` rows.
    pub fn bounds(&self, len: usize) -> std::ops::Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }
}
