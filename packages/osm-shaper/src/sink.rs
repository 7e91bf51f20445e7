//! Destinations for shaped documents.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::NormalizedDocument;

/// Receives accepted documents one at a time, in input order.
pub trait DocumentSink {
    /// Take ownership of one document.
    fn accept(&mut self, document: NormalizedDocument) -> Result<()>;

    /// Flush anything buffered. Called once after the last document.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of documents written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create (or truncate) a JSON Lines file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DocumentSink for JsonLinesSink<W> {
    fn accept(&mut self, document: NormalizedDocument) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &document)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every document in memory, e.g. for a later bulk insert.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Vec<NormalizedDocument>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn documents(&self) -> &[NormalizedDocument] {
        &self.documents
    }

    #[must_use]
    pub fn into_documents(self) -> Vec<NormalizedDocument> {
        self.documents
    }
}

impl DocumentSink for MemorySink {
    fn accept(&mut self, document: NormalizedDocument) -> Result<()> {
        self.documents.push(document);
        Ok(())
    }
}
