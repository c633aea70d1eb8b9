//! Streaming grouped aggregation over key-sorted records.
//!
//! The reduce side of a streaming job receives `(key, value)` records
//! already sorted by key, so every group is a contiguous run and can be
//! folded in one pass with memory bounded by a single group's
//! accumulator. [`engine::GroupedAggregator`] owns the grouping state
//! machine; implementations of [`Aggregation`] supply what happens
//! inside one group.

use anyhow::Result;
use bytes::Bytes;
use thiserror::Error;

pub mod engine;

pub use engine::{run_reduce, GroupedAggregator, ReduceOptions};

/// A pluggable per-group aggregation.
///
/// The engine drives each group through `init`, one `update` per
/// record, and exactly one `finalize`. Every group sees at least one
/// `update` before `finalize`, so accumulators never finalize empty.
pub trait Aggregation {
    /// Per-group accumulator state.
    type Acc;

    /// A fresh, empty accumulator for a new group.
    fn init(&self) -> Self::Acc;

    /// Fold one record value into the accumulator.
    fn update(&self, acc: &mut Self::Acc, value: Bytes) -> Result<()>;

    /// Compute the emitted result from a finished group's accumulator.
    fn finalize(&self, acc: Self::Acc) -> Result<Bytes>;
}

/// How the engine treats input that violates the sorted-order
/// precondition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OrderPolicy {
    /// Trust the upstream sort. A key that reappears after its group
    /// closed silently starts a new group, so each contiguous run
    /// produces its own output row.
    #[default]
    Permissive,
    /// Remember every closed key and fail with [`DataOrderError`] when
    /// one reappears. Memory grows with the number of distinct keys,
    /// so this is opt-in.
    Strict,
}

/// A sorted-order violation detected under [`OrderPolicy::Strict`].
#[derive(Error, Debug)]
#[error("input is not sorted: key `{key}` reappeared after its group closed")]
pub struct DataOrderError {
    /// The key that reappeared, lossily decoded for display.
    pub key: String,
}
