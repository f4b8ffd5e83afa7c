//! File I/O, validation, and serialization for the asterism pipeline.

mod builtin;
mod catalog_reader;
mod domain;
mod drawing_reader;
mod error;
mod writer;

pub use builtin::builtin_catalog;
pub use catalog_reader::{parse_catalog, CatalogReader};
pub use domain::{DrawingId, DrawingSet, ExperimentName};
pub use drawing_reader::DrawingReader;
pub use error::IoError;
pub use writer::ResultWriter;
