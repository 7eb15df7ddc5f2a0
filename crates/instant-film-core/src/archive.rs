//! Bundles finished results into a single ZIP archive.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ArchiveError;
use crate::types::ProcessedResult;

/// Builds ZIP archives from processed results.
pub struct ArchivePackager;

impl ArchivePackager {
    /// Pack results into an in-memory ZIP, one entry per result.
    ///
    /// PNG payloads are already compressed, so entries are stored as-is.
    /// Colliding output names get a ` (n)` suffix so no entry is lost.
    /// An empty slice yields an empty byte stream.
    pub fn pack(entries: &[ProcessedResult]) -> Result<Vec<u8>, ArchiveError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for (entry, name) in entries.iter().zip(Self::entry_names(entries)) {
            writer.start_file(name.as_str(), Self::entry_options())?;
            writer
                .write_all(&entry.bytes)
                .map_err(|source| ArchiveError::Entry {
                    name: name.clone(),
                    source,
                })?;
        }

        let archive = writer.finish()?.into_inner();
        tracing::info!(
            "Packed {} image(s) into {} byte archive",
            entries.len(),
            archive.len()
        );
        Ok(archive)
    }

    fn entry_options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    }

    /// Archive entry names, in order, with collisions disambiguated.
    pub fn entry_names(entries: &[ProcessedResult]) -> Vec<String> {
        let mut taken = HashSet::new();
        entries
            .iter()
            .map(|entry| {
                let mut candidate = entry.file_name.clone();
                let mut n = 2;
                while !taken.insert(candidate.clone()) {
                    candidate = with_suffix(&entry.file_name, n);
                    n += 1;
                }
                candidate
            })
            .collect()
    }
}

fn with_suffix(name: &str, n: usize) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem} ({n}).{ext}"),
        None => format!("{name} ({n})"),
    }
}
