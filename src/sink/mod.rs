pub mod auth;
pub mod sheets;

use crate::error::SinkError;
use crate::results::Record;
use async_trait::async_trait;
use std::io::Write;

pub use sheets::SheetsSink;

/// Column titles written once before any rows
pub const HEADER: [&str; 3] = ["Book Name", "Price", "Link"];

/// Destination for scraped rows
#[async_trait]
pub trait RowSink: Send {
    /// Write the header row
    async fn write_header(&mut self, header: &[&str]) -> Result<(), SinkError>;

    /// Append all records in one batch, returning how many were written
    async fn append_rows(&mut self, records: &[Record]) -> Result<usize, SinkError>;
}

/// Writes the header and each record as one JSON array per line, in header column order
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> RowSink for JsonLinesSink<W> {
    async fn write_header(&mut self, header: &[&str]) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, header)?;
        writeln!(self.writer)?;
        Ok(())
    }

    async fn append_rows(&mut self, records: &[Record]) -> Result<usize, SinkError> {
        for record in records {
            serde_json::to_writer(&mut self.writer, &record.to_row())?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(records.len())
    }
}
