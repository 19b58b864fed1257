//! Line-oriented text snapshots of the index.
//!
//! One `key|value` line per record, UTF-8, written in pre-order. Reloading
//! re-inserts line by line, so load order never matters to final contents.

pub mod reader;
pub mod record;
pub mod writer;

pub use reader::SnapshotReader;
pub use record::{FIELD_SEPARATOR, Record};
pub use writer::SnapshotWriter;

/// What to do with a snapshot line that cannot be parsed.
///
/// Trade-off: strictness vs salvage.
///   - Fail: first bad line aborts the load with its line number. Records
///     on earlier lines have already been applied.
///   - Skip: bad lines are dropped, well-formed lines still load. For
///     pulling what remains out of a damaged snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the whole load at the first malformed line.
    #[default]
    Fail,
    /// Skip malformed lines and keep loading.
    Skip,
}
