// src/models/mod.rs

//! Domain models for the cheque table.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod record;
mod schema;
mod state;
mod view;

// Re-export all public types
pub use config::{Config, SnapshotConfig, SourceConfig, StatusRule, TableConfig};
pub use record::Record;
pub use schema::{Field, FieldKind, FieldSpec};
pub use state::{FilterState, PaginationState, Selection, SortDirection, SortState};
pub use view::{DisplayRow, NavButton, NavKind, PageView, StatusCategory, TableView};
