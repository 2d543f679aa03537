//! CSV sink backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::sink::LogSink;
use crate::{LogRecord, OutputResult};

/// Writes one stream to a comma-separated file.
pub struct CsvSink {
    writer: Writer<File>,
}

impl CsvSink {
    /// Create (truncating) the file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self { writer: Writer::from_path(path)? })
    }
}

impl LogSink for CsvSink {
    fn write_header(&mut self, header: &[String]) -> OutputResult<()> {
        self.writer.write_record(header)?;
        Ok(())
    }

    fn write_batch(&mut self, records: &[LogRecord]) -> OutputResult<()> {
        for record in records {
            self.writer.write_record(record.fields())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
