use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::snapshot::record::Record;

/// Writes snapshot records one line at a time.
///
/// Output is buffered; nothing is guaranteed on disk until [`finish`]
/// runs, which flushes the buffer and fsyncs the file.
///
/// [`finish`]: SnapshotWriter::finish
pub struct SnapshotWriter<W: Write> {
    writer: W,
}

impl SnapshotWriter<BufWriter<File>> {
    /// Create (or truncate) a snapshot file at the given path.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(SnapshotWriter {
            writer: BufWriter::new(file),
        })
    }

    /// Flush buffered records and fsync the file.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }
}

impl<W: Write> SnapshotWriter<W> {
    /// Wrap an arbitrary stream.
    pub fn new(writer: W) -> Self {
        SnapshotWriter { writer }
    }

    /// Append one record as a `key|value` line.
    pub fn append(&mut self, record: &Record) -> Result<()> {
        writeln!(self.writer, "{}", record.encode())?;
        Ok(())
    }

    /// Flush buffered output to the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
