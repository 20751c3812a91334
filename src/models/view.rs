//! Data shapes emitted to the display surface.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::models::{Field, SortState};

/// Kind of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavKind {
    First,
    Prev,
    Page,
    Next,
    Last,
}

/// One pagination control and its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavButton {
    pub kind: NavKind,
    /// Page the control navigates to
    pub target: usize,
    pub disabled: bool,
    /// Set on the page-number button of the current page
    pub active: bool,
}

impl fmt::Display for NavButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NavKind::First => f.write_str("«"),
            NavKind::Prev => f.write_str("‹"),
            NavKind::Page => write!(f, "{}", self.target),
            NavKind::Next => f.write_str("›"),
            NavKind::Last => f.write_str("»"),
        }
    }
}

/// Derived pagination metadata for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    /// Zero-based slice of the filtered view shown on this page
    pub range: Range<usize>,
    /// `"{start}-{end} of {total}"`
    pub info: String,
    pub buttons: Vec<NavButton>,
    /// False when the filtered view is empty
    pub visible: bool,
    pub current_page: usize,
    pub total_pages: usize,
}

/// Visual category derived from a record's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Dispatched,
    Delivered,
    Ready,
    Processing,
    Pending,
    Returned,
    Cancelled,
    Unknown,
}

impl StatusCategory {
    /// Style class name for markup surfaces.
    pub fn class_name(self) -> &'static str {
        match self {
            StatusCategory::Dispatched => "status-dispatched",
            StatusCategory::Delivered => "status-delivered",
            StatusCategory::Ready => "status-ready",
            StatusCategory::Processing => "status-processing",
            StatusCategory::Pending => "status-pending",
            StatusCategory::Returned => "status-returned",
            StatusCategory::Cancelled => "status-cancelled",
            StatusCategory::Unknown => "status-unknown",
        }
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Display values in schema order
    pub cells: Vec<String>,
    pub status: StatusCategory,
}

impl DisplayRow {
    pub fn cell(&self, field: Field) -> &str {
        &self.cells[field.index()]
    }
}

/// Everything the display surface needs after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub rows: Vec<DisplayRow>,
    pub page_info: String,
    pub buttons: Vec<NavButton>,
    pub summary: String,
    /// Whether the pagination controls are shown
    pub pagination_visible: bool,
    pub sort: SortState,
    /// User-visible load error, if the last load failed
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_button_labels() {
        let page = NavButton {
            kind: NavKind::Page,
            target: 7,
            disabled: false,
            active: true,
        };
        assert_eq!(page.to_string(), "7");

        let next = NavButton {
            kind: NavKind::Next,
            ..page
        };
        assert_eq!(next.to_string(), "›");
    }

    #[test]
    fn test_status_category_serializes_lowercase() {
        let json = serde_json::to_string(&StatusCategory::Dispatched).unwrap();
        assert_eq!(json, "\"dispatched\"");
    }
}
