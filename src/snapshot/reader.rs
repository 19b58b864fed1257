use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::snapshot::record::Record;

/// Reads snapshot records from a file or stream.
///
/// Loads the whole snapshot up front, then iterates line by line. Empty
/// lines are skipped; each malformed line is reported individually so the
/// caller's `MalformedPolicy` can decide between aborting and continuing.
pub struct SnapshotReader {
    data: String,
}

impl SnapshotReader {
    /// Open a snapshot file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(SnapshotReader { data })
    }

    /// Read a snapshot from an arbitrary stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        Ok(SnapshotReader { data })
    }

    /// Iterate over the records in this snapshot.
    pub fn records(&self) -> Records<'_> {
        Records {
            lines: self.data.lines(),
            line_number: 0,
        }
    }
}

/// Iterator over snapshot records, yielding `Err` for malformed lines.
///
/// Keeps going after an error — unlike a torn binary log, a bad text line
/// says nothing about the validity of the lines after it.
pub struct Records<'a> {
    lines: std::str::Lines<'a>,
    line_number: usize,
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return Some(Record::decode(line, self.line_number));
        }
    }
}
