//! Constellation matching over a static catalog.
//!
//! Prepares every catalog entry once (normalize + resample), then classifies
//! drawings by aligning both chiralities of the drawing against each prepared
//! entry and keeping the lowest mean point distance.

mod catalog;
mod config;
mod error;
mod matcher;
mod result;
mod serialize;

pub use catalog::{prepare, Catalog, CatalogEntry, PreparedCatalog, PreparedEntry, MIN_POINTS};
pub use config::MatchConfig;
pub use error::MatchError;
pub use matcher::{match_shape, Matcher};
pub use result::MatchResult;
