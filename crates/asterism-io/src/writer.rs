//! JSON result writer for single and batch match outputs.

use std::fs;
use std::path::{Path, PathBuf};

use asterism_match::{MatchConfig, MatchResult};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::{DrawingId, ExperimentName};
use crate::IoError;

/// Writes match results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_match.json` and
/// `{experiment}_batch.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Write the ranked matches of one drawing to `{experiment}_match.json`.
    ///
    /// `ranking` is best first; its head is reported as `best`, or `null`
    /// when the drawing matched nothing.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::EncodeJson`] | artifact could not be encoded |
    /// | [`IoError::WriteFile`] | file could not be written |
    #[instrument(skip_all, fields(drawing = %drawing, n_ranked = ranking.len()))]
    pub fn write_match(
        &self,
        drawing: &DrawingId,
        config: &MatchConfig,
        ranking: &[MatchResult],
    ) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("match");

        let artifact = MatchArtifact {
            experiment: self.experiment.as_str(),
            drawing: drawing.as_str(),
            sample_count: config.sample_count(),
            normalize_size: config.normalize_size(),
            best: ranking.first(),
            ranking,
        };

        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), "match result written");
        Ok(path)
    }

    /// Write one result per drawing to `{experiment}_batch.json`.
    ///
    /// `ids[i]` names `results[i]`; unmatched drawings are written with a
    /// `null` match.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::EncodeJson`] | artifact could not be encoded |
    /// | [`IoError::WriteFile`] | file could not be written |
    #[instrument(skip_all, fields(n_drawings = ids.len()))]
    pub fn write_batch(
        &self,
        ids: &[DrawingId],
        config: &MatchConfig,
        results: &[Option<MatchResult>],
    ) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("batch");

        let entries: Vec<BatchEntry> = ids
            .iter()
            .zip(results)
            .map(|(id, result)| BatchEntry {
                drawing: id.as_str(),
                result: result.as_ref(),
            })
            .collect();

        let artifact = BatchArtifact {
            experiment: self.experiment.as_str(),
            sample_count: config.sample_count(),
            normalize_size: config.normalize_size(),
            n_drawings: entries.len(),
            n_matched: results.iter().filter(|r| r.is_some()).count(),
            results: entries,
        };

        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), "batch result written");
        Ok(path)
    }

    /// Return the path where a prepared catalog cache should be saved.
    ///
    /// Computes `{output_dir}/{experiment}_catalog.bin` without writing anything.
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_catalog.bin", self.experiment.as_str()))
    }

    fn artifact_path(&self, kind: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{kind}.json", self.experiment.as_str()))
    }

    fn write_json(&self, path: &Path, artifact: &impl Serialize) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(artifact).map_err(|e| IoError::EncodeJson {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, &json).map_err(|e| IoError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct MatchArtifact<'a> {
    experiment: &'a str,
    drawing: &'a str,
    sample_count: usize,
    normalize_size: f64,
    best: Option<&'a MatchResult>,
    ranking: &'a [MatchResult],
}

#[derive(Serialize)]
struct BatchArtifact<'a> {
    experiment: &'a str,
    sample_count: usize,
    normalize_size: f64,
    n_drawings: usize,
    n_matched: usize,
    results: Vec<BatchEntry<'a>>,
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    drawing: &'a str,
    #[serde(rename = "match")]
    result: Option<&'a MatchResult>,
}
