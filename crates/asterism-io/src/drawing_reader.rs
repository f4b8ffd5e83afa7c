//! CSV drawing reader with full input validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use asterism_shape::{Point, PointSequence};
use tracing::{debug, info, instrument};

use crate::domain::{DrawingId, DrawingSet};
use crate::IoError;

/// Reads one or more drawings from a CSV file.
///
/// Expected CSV format:
/// - Header row required, with `x` and `y` columns in any position
/// - Optional `id` column; rows sharing an id form one drawing, in row order
/// - Without an `id` column the whole file is a single drawing named after
///   the file stem
///
/// ```csv
/// id,x,y
/// g1,10,20
/// g1,60,80
/// g2,0,0
/// ```
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::MissingColumn`] | Header has no `x` or no `y` column |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonFiniteValue`] | Coordinate is NaN, Inf, or unparseable float |
pub struct DrawingReader {
    path: PathBuf,
}

impl DrawingReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`DrawingSet`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<DrawingSet, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so that our own InconsistentRowLength check fires
        // instead of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?.clone();
        let expected_cols = header.len();
        let column = |name: &'static str| header.iter().position(|h| h == name);
        let x_col = column("x").ok_or_else(|| self.missing("x"))?;
        let y_col = column("y").ok_or_else(|| self.missing("y"))?;
        let id_col = column("id");
        debug!(expected_cols, has_ids = id_col.is_some(), "read CSV header");

        let mut ids: Vec<DrawingId> = Vec::new();
        let mut points: Vec<Vec<Point>> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut n_rows = 0;

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;
            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let x = self.coordinate(&record, row_index, x_col, "x")?;
            let y = self.coordinate(&record, row_index, y_col, "y")?;

            let key = match id_col {
                Some(col) => record.get(col).unwrap_or("").to_string(),
                None => self.default_id(),
            };
            let slot = *slots.entry(key.clone()).or_insert_with(|| {
                ids.push(DrawingId::new(key));
                points.push(Vec::new());
                points.len() - 1
            });
            points[slot].push(Point::new(x, y));
            n_rows += 1;
        }

        if n_rows == 0 {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let drawings = points
            .into_iter()
            .enumerate()
            .map(|(index, pts)| {
                PointSequence::new(pts).map_err(|e| IoError::InvalidPoints {
                    path: self.path.clone(),
                    index,
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(n_drawings = drawings.len(), n_points = n_rows, "drawings loaded");
        Ok(DrawingSet { ids, drawings })
    }

    fn coordinate(
        &self,
        record: &csv::StringRecord,
        row_index: usize,
        col: usize,
        column: &'static str,
    ) -> Result<f64, IoError> {
        let raw = record.get(col).unwrap_or("");
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(IoError::NonFiniteValue {
                path: self.path.clone(),
                row_index,
                column,
                raw: raw.to_string(),
            }),
        }
    }

    fn default_id(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(|| "drawing".to_string(), |s| s.to_string_lossy().into_owned())
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    fn missing(&self, column: &'static str) -> IoError {
        IoError::MissingColumn {
            path: self.path.clone(),
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn xy(seq: &PointSequence) -> Vec<(f64, f64)> {
        seq.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn read_single_drawing() {
        let f = write_csv("x,y\n10,20\n60,80\n110,60\n");
        let set = DrawingReader::new(f.path()).read().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(xy(&set.drawings[0]), [(10.0, 20.0), (60.0, 80.0), (110.0, 60.0)]);
        let stem = f.path().file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(set.ids[0].as_str(), stem);
    }

    #[test]
    fn columns_in_any_order_with_whitespace() {
        let f = write_csv("y, x\n 2.5 , 1\n4,3\n");
        let set = DrawingReader::new(f.path()).read().unwrap();
        assert_eq!(xy(&set.drawings[0]), [(1.0, 2.5), (3.0, 4.0)]);
    }

    #[test]
    fn ids_group_rows_in_first_appearance_order() {
        let f = write_csv("id,x,y\nb,0,0\na,5,5\nb,1,1\na,6,6\nc,9,9\n");
        let set = DrawingReader::new(f.path()).read().unwrap();
        let ids: Vec<_> = set.ids.iter().map(DrawingId::as_str).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(xy(&set.drawings[0]), [(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(xy(&set.drawings[1]), [(5.0, 5.0), (6.0, 6.0)]);
        assert_eq!(set.drawings[2].len(), 1);
    }

    #[test]
    fn value_round_trip() {
        let f = write_csv("x,y\n1.23456789,9.87654321\n");
        let set = DrawingReader::new(f.path()).read().unwrap();
        let p = set.drawings[0][0];
        assert!((p.x - 1.23456789).abs() < 1e-12);
        assert!((p.y - 9.87654321).abs() < 1e-12);
    }

    #[test]
    fn error_file_not_found() {
        let result = DrawingReader::new(Path::new("/nonexistent/drawing.csv")).read();
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn error_missing_column() {
        let f = write_csv("x,z\n1,2\n");
        let result = DrawingReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::MissingColumn { column: "y", .. })));
    }

    #[test]
    fn error_empty_dataset() {
        let f = write_csv("x,y\n");
        let result = DrawingReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::EmptyDataset { .. })));
    }

    #[test]
    fn error_inconsistent_row_length() {
        let f = write_csv("x,y\n1,2\n3\n");
        let result = DrawingReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::InconsistentRowLength { row_index: 1, got: 1, .. })
        ));
    }

    #[test]
    fn error_non_finite_values() {
        for bad in ["NaN", "inf", "abc", ""] {
            let f = write_csv(&format!("x,y\n1,2\n3,{bad}\n"));
            let result = DrawingReader::new(f.path()).read();
            assert!(
                matches!(result, Err(IoError::NonFiniteValue { row_index: 1, column: "y", .. })),
                "value {bad:?} should be rejected"
            );
        }
    }
}
