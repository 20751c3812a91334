//! Pipeline stages from raw fragments to the paginated view.
//!
//! - `load`: fetch, merge and extract fragments, with snapshot fallback
//! - `filter`: derive the filtered view from the full collection
//! - `sort`: order a collection by one column
//! - `paginate`: page bounds, info string and navigation controls

pub mod filter;
pub mod load;
pub mod paginate;
pub mod sort;

pub use filter::{apply_filters, result_summary};
pub use load::{LoadOrigin, LoadOutcome, LoadPlan, load_records};
pub use paginate::paginate;
pub use sort::sort_records;
