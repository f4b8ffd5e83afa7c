//! JSON catalog reader accepting several star encodings.

use std::path::{Path, PathBuf};

use asterism_match::{Catalog, CatalogEntry, MIN_POINTS};
use asterism_shape::{Point, PointSequence};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::IoError;

/// Reads a constellation catalog from a JSON file.
///
/// The top level is either an array of entries or an object with a
/// `constellations` array. Each entry has a `name` and its stars in one of
/// three encodings:
///
/// ```json
/// { "name": "Lyra", "stars": [[60, 20], [80, 40], [100, 20]] }
/// { "name": "Lyra", "stars": [{"x": 60, "y": 20}, {"x": 80, "y": 40}] }
/// { "name": "Lyra", "lines": [[[60, 20], [80, 40]], [[80, 40], [100, 20]]] }
/// ```
///
/// Line lists are concatenated into one polyline; the first point of a line
/// is dropped when it repeats the end of the previous line. If an entry has
/// both `stars` and `lines`, `stars` wins.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::JsonParse`] | Not JSON, or not in an accepted layout |
/// | [`IoError::MissingStars`] | Entry has neither `stars` nor `lines` |
/// | [`IoError::InvalidEntry`] | Entry name is empty |
/// | [`IoError::InvalidPoints`] | Entry has a non-finite coordinate |
pub struct CatalogReader {
    path: PathBuf,
}

impl CatalogReader {
    /// Create a new reader for the given JSON file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the catalog file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Catalog, IoError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        let catalog = parse_catalog(&text, &self.path)?;
        info!(n_entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}

/// Parse catalog JSON text; `origin` is only used in error messages.
///
/// # Errors
///
/// Same as [`CatalogReader::read`], minus [`IoError::FileNotFound`].
pub fn parse_catalog(text: &str, origin: &Path) -> Result<Catalog, IoError> {
    let file: CatalogFile = serde_json::from_str(text).map_err(|e| IoError::JsonParse {
        path: origin.to_path_buf(),
        source: e,
    })?;
    let raw = match file {
        CatalogFile::Entries(entries) | CatalogFile::Wrapped { constellations: entries } => entries,
    };

    let mut entries = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        entries.push(entry.into_entry(index, origin)?);
    }

    if entries.is_empty() {
        warn!(path = %origin.display(), "catalog has no entries");
    }
    Ok(Catalog::new(entries))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Entries(Vec<RawEntry>),
    Wrapped { constellations: Vec<RawEntry> },
}

#[derive(Deserialize)]
struct RawEntry {
    name: String,
    #[serde(default)]
    stars: Option<Vec<RawPoint>>,
    #[serde(default)]
    lines: Option<Vec<Vec<RawPoint>>>,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(untagged)]
enum RawPoint {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl From<RawPoint> for Point {
    fn from(raw: RawPoint) -> Self {
        match raw {
            RawPoint::Pair([x, y]) | RawPoint::Object { x, y } => Point::new(x, y),
        }
    }
}

impl RawEntry {
    fn into_entry(self, index: usize, origin: &Path) -> Result<CatalogEntry, IoError> {
        let points = match (self.stars, self.lines) {
            (Some(stars), _) => stars.into_iter().map(Point::from).collect(),
            (None, Some(lines)) => join_lines(lines),
            (None, None) => {
                return Err(IoError::MissingStars {
                    path: origin.to_path_buf(),
                    index,
                    name: self.name,
                });
            }
        };

        let stars = PointSequence::new(points).map_err(|e| IoError::InvalidPoints {
            path: origin.to_path_buf(),
            index,
            source: e,
        })?;
        if stars.len() < MIN_POINTS {
            debug!(index, name = %self.name, n_stars = stars.len(), "entry too short to match");
        }

        CatalogEntry::new(self.name, stars).map_err(|e| IoError::InvalidEntry {
            path: origin.to_path_buf(),
            index,
            source: e,
        })
    }
}

fn join_lines(lines: Vec<Vec<RawPoint>>) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::new();
    for line in lines {
        for (j, raw) in line.into_iter().enumerate() {
            let p = Point::from(raw);
            if j == 0 && points.last() == Some(&p) {
                continue;
            }
            points.push(p);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> Result<Catalog, IoError> {
        parse_catalog(text, Path::new("test.json"))
    }

    fn xy(entry: &CatalogEntry) -> Vec<(f64, f64)> {
        entry.stars().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn pair_encoding() {
        let catalog = parse(r#"[{"name": "A", "stars": [[1, 2], [3.5, 4]]}]"#).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].name(), "A");
        assert_eq!(xy(&catalog.entries()[0]), [(1.0, 2.0), (3.5, 4.0)]);
    }

    #[test]
    fn object_encoding_in_wrapper() {
        let text = r#"{"constellations": [
            {"name": "B", "stars": [{"x": 0, "y": 1}, {"x": 2, "y": 3}]},
            {"name": "C", "stars": [[5, 5], {"x": 6, "y": 7}]}
        ]}"#;
        let catalog = parse(text).unwrap();
        let names: Vec<_> = catalog.iter().map(CatalogEntry::name).collect();
        assert_eq!(names, ["B", "C"]);
        assert_eq!(xy(&catalog.entries()[1]), [(5.0, 5.0), (6.0, 7.0)]);
    }

    #[test]
    fn line_encoding_joins_shared_endpoints() {
        let text = r#"[{"name": "L", "lines": [[[0, 0], [1, 0]], [[1, 0], [1, 1]], [[5, 5], [6, 6]]]}]"#;
        let catalog = parse(text).unwrap();
        assert_eq!(
            xy(&catalog.entries()[0]),
            [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (5.0, 5.0), (6.0, 6.0)]
        );
    }

    #[test]
    fn stars_win_over_lines() {
        let text = r#"[{"name": "S", "stars": [[9, 9]], "lines": [[[0, 0], [1, 1]]]}]"#;
        let catalog = parse(text).unwrap();
        assert_eq!(xy(&catalog.entries()[0]), [(9.0, 9.0)]);
    }

    #[test]
    fn short_entries_are_kept() {
        let catalog = parse(r#"[{"name": "Dot", "stars": [[1, 1]]}, {"name": "None", "stars": []}]"#)
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn empty_catalog_is_allowed() {
        assert!(parse("[]").unwrap().is_empty());
        assert!(parse(r#"{"constellations": []}"#).unwrap().is_empty());
    }

    #[test]
    fn error_missing_stars() {
        let result = parse(r#"[{"name": "A", "stars": [[0, 0], [1, 1]]}, {"name": "Nope"}]"#);
        assert!(matches!(result, Err(IoError::MissingStars { index: 1, .. })));
    }

    #[test]
    fn error_empty_name() {
        let result = parse(r#"[{"name": "", "stars": [[0, 0], [1, 1]]}]"#);
        assert!(matches!(result, Err(IoError::InvalidEntry { index: 0, .. })));
    }

    #[test]
    fn error_bad_json() {
        assert!(matches!(parse("not json"), Err(IoError::JsonParse { .. })));
        assert!(matches!(
            parse(r#"[{"name": "A", "stars": [[1, 2, 3]]}]"#),
            Err(IoError::JsonParse { .. })
        ));
        assert!(matches!(parse(r#"{"entries": []}"#), Err(IoError::JsonParse { .. })));
    }

    #[test]
    fn read_from_file() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(br#"[{"name": "F", "stars": [[0, 0], [3, 4]]}]"#).unwrap();
        f.flush().unwrap();
        let catalog = CatalogReader::new(f.path()).read().unwrap();
        assert_eq!(catalog.entries()[0].name(), "F");
    }

    #[test]
    fn error_file_not_found() {
        let result = CatalogReader::new(Path::new("/nonexistent/catalog.json")).read();
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}
