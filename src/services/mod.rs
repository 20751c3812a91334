//! Services: record extraction, fragment sources and row rendering.

pub mod extractor;
pub mod render;
pub mod source;

pub use extractor::{Extraction, FieldExtractionWarning, RecordExtractor, WarningKind};
pub use render::Renderer;
pub use source::{DirSource, HttpSource, LoadSource};
