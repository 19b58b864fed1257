/// Record key: case-sensitive text, ordered lexicographically.
pub type Key = String;

/// Record payload, e.g. a phone number.
pub type Value = String;
