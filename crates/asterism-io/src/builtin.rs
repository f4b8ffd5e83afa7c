//! The built-in reference catalog.

use std::path::Path;

use asterism_match::Catalog;

use crate::catalog_reader::parse_catalog;
use crate::IoError;

const CONSTELLATIONS_JSON: &str = include_str!("../data/constellations.json");

/// Load the seven reference constellations shipped with the crate.
///
/// Orion, Big Dipper, Cassiopeia, Cygnus, Scorpius, Ursa Minor and Lyra, in
/// that order, in screen coordinates (y grows downward).
///
/// # Errors
///
/// Only fails if the embedded catalog is malformed; see [`parse_catalog`].
pub fn builtin_catalog() -> Result<Catalog, IoError> {
    parse_catalog(CONSTELLATIONS_JSON, Path::new("<builtin>"))
}
