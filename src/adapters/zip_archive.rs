use crate::domain::ports::ArchiveBuilder;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// Buffers text entries and writes them into an in-memory ZIP on `finish`.
///
/// Adding a name twice replaces the earlier content but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct ZipArchiveBuilder {
    entries: Vec<(String, String)>,
}

impl ZipArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl ArchiveBuilder for ZipArchiveBuilder {
    fn add_entry(&mut self, name: &str, content: &str) -> Result<()> {
        if let Some(existing) = self.entries.iter_mut().find(|(n, _)| n == name) {
            tracing::warn!("Duplicate archive entry '{}', keeping the latest content", name);
            existing.1 = content.to_string();
        } else {
            self.entries.push((name.to_string(), content.to_string()));
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn finish(self) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for (name, content) in &self.entries {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(content.as_bytes())?;
        }

        // 完成並取回底層 Vec<u8>
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}
