//! Zip packaging of the split pages.

use std::io::{Cursor, Write};

use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::OutputEntry;
use crate::error::Result;

/// Collects named entries and writes them into a zip archive.
///
/// Adding a name that is already present replaces the earlier entry in
/// place, so the archive never holds duplicate names.
pub struct ArchiveBuilder {
    entries: Vec<OutputEntry>,
    compress: bool,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            compress: false,
        }
    }

    /// Deflate entries instead of storing them.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Add an entry. Returns `true` if it replaced one with the same name.
    pub fn add(&mut self, entry: OutputEntry) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.filename == entry.filename) {
            warn!("Archive entry {} already exists, overwriting", entry.filename);
            *existing = entry;
            true
        } else {
            self.entries.push(entry);
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write all entries and return the zip bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let method = if self.compress {
            CompressionMethod::Deflated
        } else {
            CompressionMethod::Stored
        };

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            let options = SimpleFileOptions::default().compression_method(method);
            writer.start_file(entry.filename.as_str(), options)?;
            writer.write_all(&entry.data)?;
        }

        let cursor = writer.finish()?;
        let bytes = cursor.into_inner();
        debug!("Wrote archive with {} entries ({} bytes)", self.entries.len(), bytes.len());
        Ok(bytes)
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn entry(name: &str, data: &[u8]) -> OutputEntry {
        OutputEntry {
            filename: name.to_string(),
            data: data.to_vec(),
        }
    }

    fn read_back(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_archive_contains_entries() {
        let mut builder = ArchiveBuilder::new();
        builder.add(entry("a.pdf", b"first"));
        builder.add(entry("b.pdf", b"second"));

        let mut archive = read_back(builder.finish().unwrap());
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive.by_name("b.pdf").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_duplicate_name_overwrites() {
        let mut builder = ArchiveBuilder::new();
        assert!(!builder.add(entry("same.pdf", b"page 1")));
        assert!(builder.add(entry("same.pdf", b"page 2")));
        assert_eq!(builder.len(), 1);

        let mut archive = read_back(builder.finish().unwrap());
        let mut content = String::new();
        archive.by_name("same.pdf").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "page 2");
    }

    #[test]
    fn test_compressed_archive_round_trips() {
        let mut builder = ArchiveBuilder::new().with_compression(true);
        builder.add(entry("x.pdf", &[b'x'; 4096]));

        let mut archive = read_back(builder.finish().unwrap());
        let mut data = Vec::new();
        archive.by_index(0).unwrap().read_to_end(&mut data).unwrap();
        assert_eq!(data.len(), 4096);
    }

    #[test]
    fn test_empty_archive_is_valid() {
        let archive = read_back(ArchiveBuilder::new().finish().unwrap());
        assert_eq!(archive.len(), 0);
    }
}
