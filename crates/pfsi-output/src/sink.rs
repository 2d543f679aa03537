//! The `LogSink` trait implemented by stream backends.

use crate::{LogRecord, OutputResult};

/// Append-only destination for one log stream.
pub trait LogSink {
    /// Write the header line.  Called once, before any records.
    fn write_header(&mut self, header: &[String]) -> OutputResult<()>;

    /// Append a batch of records in order.
    fn write_batch(&mut self, records: &[LogRecord]) -> OutputResult<()>;

    /// Flush everything written so far to the underlying medium.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
