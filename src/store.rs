// src/store.rs

//! Record store.
//!
//! Holds the full record collection, the filtered view derived from it and
//! the filter, sort and pagination state. Every mutation runs to completion
//! and leaves the derived state consistent:
//!
//! - the filtered view is recomputed from the full collection, never from
//!   the previous filtered view
//! - `current_page` is clamped into `[1, total_pages]` after every change
//! - filter and page-size changes reset to page 1, sorting does not
//!
//! Records are shared between the two collections, so deriving the filtered
//! view copies handles, not record data.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{
    Field, FilterState, PageView, PaginationState, Record, Selection, SortState, TableConfig,
};
use crate::pipeline::{apply_filters, paginate, result_summary, sort_records};

/// Table state shared by every engine.
#[derive(Debug, Clone)]
pub struct TableState {
    all_records: Vec<Arc<Record>>,
    filtered_records: Vec<Arc<Record>>,
    filter: FilterState,
    sort: SortState,
    pagination: PaginationState,
    max_page_buttons: usize,
    summary: String,
}

impl TableState {
    pub fn new(page_size: usize, max_page_buttons: usize) -> Self {
        Self {
            all_records: Vec::new(),
            filtered_records: Vec::new(),
            filter: FilterState::default(),
            sort: SortState::default(),
            pagination: PaginationState::new(page_size),
            max_page_buttons: max_page_buttons.max(1),
            summary: result_summary(0, &FilterState::default()),
        }
    }

    pub fn from_config(config: &TableConfig) -> Self {
        Self::new(config.page_size, config.max_page_buttons)
    }

    /// Replace the whole collection after a successful load. Active filters
    /// and sort order are re-applied.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.all_records = records.into_iter().map(Arc::new).collect();
        if let Some(column) = self.sort.column {
            sort_records(&mut self.all_records, column, self.sort.direction);
        }
        self.recompute_filters();
    }

    /// Apply a complete filter state.
    pub fn apply_filters(&mut self, filter: FilterState) {
        self.filter = filter;
        self.recompute_filters();
    }

    pub fn set_search(&mut self, term: &str) {
        self.filter.set_search(term);
        self.recompute_filters();
    }

    pub fn set_category(&mut self, category: &str) {
        self.filter.category = Selection::parse(category);
        self.recompute_filters();
    }

    pub fn set_status(&mut self, status: &str) {
        self.filter.status = Selection::parse(status);
        self.recompute_filters();
    }

    /// Reset every predicate.
    pub fn clear_filters(&mut self) {
        self.apply_filters(FilterState::default());
    }

    /// Column header click: sort both collections, keep the current page.
    pub fn sort_by(&mut self, column: Field) {
        self.sort.select(column);
        sort_records(&mut self.all_records, column, self.sort.direction);
        sort_records(&mut self.filtered_records, column, self.sort.direction);
        self.pagination.recompute(self.filtered_records.len());
    }

    /// Navigate to a page, clamped into range.
    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.current_page = page;
        self.pagination.recompute(self.filtered_records.len());
    }

    /// Change rows per page and return to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(AppError::validation("page size must be at least 1"));
        }
        self.pagination.page_size = page_size;
        self.pagination.current_page = 1;
        self.pagination.recompute(self.filtered_records.len());
        Ok(())
    }

    fn recompute_filters(&mut self) {
        self.filtered_records = apply_filters(&self.all_records, &self.filter);
        self.pagination.current_page = 1;
        self.pagination.recompute(self.filtered_records.len());
        self.summary = result_summary(self.filtered_records.len(), &self.filter);
        log::debug!("{}", self.summary);
    }

    /// Pagination metadata for the current page.
    pub fn page_view(&self) -> PageView {
        let mut pagination = self.pagination;
        paginate(
            self.filtered_records.len(),
            &mut pagination,
            self.max_page_buttons,
        )
    }

    /// Records shown on the current page.
    pub fn current_page_records(&self) -> &[Arc<Record>] {
        &self.filtered_records[self.pagination.bounds(self.filtered_records.len())]
    }

    pub fn all_records(&self) -> &[Arc<Record>] {
        &self.all_records
    }

    pub fn filtered_records(&self) -> &[Arc<Record>] {
        &self.filtered_records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Distinct categories for the category filter control.
    pub fn category_options(&self) -> Vec<String> {
        self.distinct(Field::Category)
    }

    /// Distinct statuses for the status filter control.
    pub fn status_options(&self) -> Vec<String> {
        self.distinct(Field::Status)
    }

    fn distinct(&self, field: Field) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut values: Vec<String> = self
            .all_records
            .iter()
            .map(|record| record.value(field))
            .filter(|value| !value.is_empty() && seen.insert(value.to_lowercase()))
            .map(str::to_string)
            .collect();
        values.sort_by_key(|value| value.to_lowercase());
        values
    }
}
