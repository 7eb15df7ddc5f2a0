//! The batch: results of the current submission.

use crate::types::{ProcessedResult, ResultId};

/// Insertion-ordered results of the current submission.
///
/// Every submission bumps the generation; appends carrying an older
/// generation are rejected, so a slow file from an abandoned batch can never
/// show up in a fresh one.
#[derive(Debug, Default)]
pub struct Batch {
    generation: u64,
    processing: bool,
    entries: Vec<ProcessedResult>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new submission: clear results, mark processing, return the
    /// new generation.
    pub fn begin(&mut self) -> u64 {
        self.entries.clear();
        self.generation += 1;
        self.processing = true;
        self.generation
    }

    /// Append a result if it belongs to the current generation.
    pub fn append(&mut self, generation: u64, result: ProcessedResult) -> bool {
        if generation != self.generation {
            return false;
        }
        self.entries.push(result);
        true
    }

    /// Mark a generation as settled. Returns false if it was superseded.
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.processing = false;
        true
    }

    /// Remove the entry with the given id.
    pub fn remove(&mut self, id: ResultId) -> Option<ProcessedResult> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Remove the first entry with the given output filename.
    pub fn remove_by_name(&mut self, file_name: &str) -> Option<ProcessedResult> {
        let index = self.entries.iter().position(|e| e.file_name == file_name)?;
        Some(self.entries.remove(index))
    }

    /// Drop every result. The generation is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: ResultId) -> Option<&ProcessedResult> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[ProcessedResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Bulk download is offered once processing settled and something is left.
    pub fn archive_ready(&self) -> bool {
        !self.processing && !self.entries.is_empty()
    }
}
