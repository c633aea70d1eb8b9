//! Hadoop-streaming mapper/reducer executables and the grouped
//! aggregation engine behind them.
//!
//! Each binary is a pipe transform: it reads text lines from standard
//! input, transforms or aggregates them, and writes text lines to
//! standard output. The surrounding streaming framework sorts mapper
//! output by key before handing it to a reducer, so the reduce side
//! only ever has to group contiguous same-key runs.

use bytes::Bytes;

pub mod cmd;
pub mod record;
pub mod reduce;
pub mod utils;
pub mod workload;

/////////////////////////////////////////////////////////////////////////////
// Mapper application types
/////////////////////////////////////////////////////////////////////////////

/// The output of an application map function.
///
/// There are 2 layers of [`anyhow::Result`]s here. The outer layer
/// accounts for errors that arise while creating the iterator.
/// The inner layer accounts for errors that occur during iteration.
///
/// This accomodates both batch (all pairs emitted at once) and lazy
/// (pairs only emitted when the iterator is consumed) map operations.
pub type MapOutput = anyhow::Result<Box<dyn Iterator<Item = anyhow::Result<KeyValue>>>>;

/// A map function takes one input line and auxiliary arguments.
///
/// It returns an iterator that yields key-value pairs for that line.
/// Mappers carry no state across lines, so the framework may split
/// input between mapper processes at any line boundary.
pub type MapFn = fn(line: Bytes, aux: Bytes) -> MapOutput;

/////////////////////////////////////////////////////////////////////////////
// Key-value pairs
/////////////////////////////////////////////////////////////////////////////

/// A single key-value pair.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct KeyValue {
    /// The key.
    pub key: Bytes,
    /// The value.
    pub value: Bytes,
}

impl KeyValue {
    /// Construct a new key-value pair from the given key and value.
    pub fn new(key: Bytes, value: Bytes) -> Self {
        Self { key, value }
    }

    /// Get the key of this key-value pair.
    ///
    /// This method is cheap, since [`Bytes`] are cheaply cloneable.
    #[inline]
    pub fn key(&self) -> Bytes {
        self.key.clone()
    }

    /// Get the value of this key-value pair.
    ///
    /// This method is cheap, since [`Bytes`] are cheaply cloneable.
    #[inline]
    pub fn value(&self) -> Bytes {
        self.value.clone()
    }

    /// Consumes the key-value pair and returns the key.
    #[inline]
    pub fn into_key(self) -> Bytes {
        self.key
    }

    /// Consumes the key-value pair and returns the value.
    #[inline]
    pub fn into_value(self) -> Bytes {
        self.value
    }
}
