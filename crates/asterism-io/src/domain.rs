//! Domain types for asterism-io.

use asterism_shape::PointSequence;

use crate::IoError;

/// Identifier of one drawing within a drawing file.
///
/// Taken from the `id` column of the drawing CSV, or from the file stem when
/// the file holds a single drawing without ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawingId(String);

impl DrawingId {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    /// Return the drawing ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DrawingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drawings read from one file, with their identifiers.
///
/// Produced by [`DrawingReader`](crate::DrawingReader). IDs and drawings are
/// stored in parallel vectors in first-appearance order: `ids[i]` names
/// `drawings[i]`.
#[derive(Debug)]
pub struct DrawingSet {
    /// Drawing identifiers.
    pub ids: Vec<DrawingId>,
    /// Validated drawings in the same order as `ids`.
    pub drawings: Vec<PointSequence>,
}

impl DrawingSet {
    /// Return the number of drawings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    /// Return true if the set holds no drawings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }
}
