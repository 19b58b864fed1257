use crate::error::{Error, Result};
use crate::types::{Key, Value};

/// Separator between the key and value fields on a snapshot line.
/// Keys must not contain it.
pub const FIELD_SEPARATOR: char = '|';

/// One snapshot record: a single `key|value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Key,
    pub value: Value,
}

impl Record {
    pub fn new(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Record {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Serialize as one snapshot line, without the trailing newline.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.key, FIELD_SEPARATOR, self.value)
    }

    /// Parse one snapshot line.
    ///
    /// The line must split into exactly two fields: no separator at all, or
    /// a second separator inside the value, means the line was not produced
    /// by [`encode`]. `line_number` is 1-based and used only for the error.
    ///
    /// [`encode`]: Record::encode
    pub fn decode(line: &str, line_number: usize) -> Result<Self> {
        let malformed = || Error::MalformedRecord {
            line: line_number,
            content: line.to_owned(),
        };

        let Some((key, value)) = line.split_once(FIELD_SEPARATOR) else {
            return Err(malformed());
        };
        if value.contains(FIELD_SEPARATOR) {
            return Err(malformed());
        }

        Ok(Record {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}
