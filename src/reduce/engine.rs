use anyhow::{Context, Result};
use bytes::Bytes;
use log::{debug, trace};
use std::collections::HashSet;
use std::io::{BufRead, Write};

use crate::record::parse_line;
use crate::reduce::{Aggregation, DataOrderError, OrderPolicy};
use crate::KeyValue;

/// Grouping state for the aggregator.
///
/// `Done` is entered after the final flush or the first error; the
/// iterator yields nothing more once there.
enum GroupState<Acc> {
    NoGroupOpen,
    GroupOpen { key: Bytes, acc: Acc },
    Done,
}

/// Streaming grouped aggregation over a key-sorted record sequence.
///
/// Wraps a fallible record iterator and yields one finalized
/// `(key, result)` pair per contiguous same-key run, in first-seen key
/// order, including the final group when the input ends. Nothing is
/// buffered beyond the open group's accumulator.
///
/// Sortedness is a precondition, not validated by default: repeated
/// non-contiguous keys come out as separate rows. See
/// [`OrderPolicy::Strict`] for the checked mode.
pub struct GroupedAggregator<I, S: Aggregation> {
    records: I,
    strategy: S,
    state: GroupState<S::Acc>,
    /// Keys whose groups already closed. `Some` only under
    /// [`OrderPolicy::Strict`].
    closed: Option<HashSet<Bytes>>,
}

impl<I, S> GroupedAggregator<I, S>
where
    I: Iterator<Item = Result<KeyValue>>,
    S: Aggregation,
{
    /// Aggregator with the default [`OrderPolicy::Permissive`].
    pub fn new(records: I, strategy: S) -> Self {
        Self::with_order_policy(records, strategy, OrderPolicy::default())
    }

    pub fn with_order_policy(records: I, strategy: S, policy: OrderPolicy) -> Self {
        Self {
            records,
            strategy,
            state: GroupState::NoGroupOpen,
            closed: match policy {
                OrderPolicy::Permissive => None,
                OrderPolicy::Strict => Some(HashSet::new()),
            },
        }
    }

    /// Open a fresh group for `kv` and fold its value in.
    ///
    /// The accumulator always comes from `strategy.init()`, never from
    /// leftover state of the previous group.
    fn open_group(&mut self, kv: KeyValue) -> Result<()> {
        if let Some(closed) = &self.closed {
            if closed.contains(&kv.key) {
                return Err(DataOrderError {
                    key: String::from_utf8_lossy(&kv.key).into_owned(),
                }
                .into());
            }
        }
        let mut acc = self.strategy.init();
        self.strategy.update(&mut acc, kv.value)?;
        self.state = GroupState::GroupOpen { key: kv.key, acc };
        Ok(())
    }

    /// Finalize a closed group into its output pair.
    fn flush_group(&mut self, key: Bytes, acc: S::Acc) -> Result<KeyValue> {
        if let Some(closed) = &mut self.closed {
            closed.insert(key.clone());
        }
        let result = self.strategy.finalize(acc)?;
        trace!("flushed group `{}`", String::from_utf8_lossy(&key));
        Ok(KeyValue::new(key, result))
    }
}

impl<I, S> Iterator for GroupedAggregator<I, S>
where
    I: Iterator<Item = Result<KeyValue>>,
    S: Aggregation,
{
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if matches!(self.state, GroupState::Done) {
                return None;
            }
            match self.records.next() {
                None => {
                    // Input exhausted: the mandatory final flush.
                    match std::mem::replace(&mut self.state, GroupState::Done) {
                        GroupState::GroupOpen { key, acc } => {
                            return Some(self.flush_group(key, acc));
                        }
                        _ => return None,
                    }
                }
                Some(Err(err)) => {
                    self.state = GroupState::Done;
                    return Some(Err(err));
                }
                Some(Ok(kv)) => match &mut self.state {
                    GroupState::NoGroupOpen => {
                        if let Err(err) = self.open_group(kv) {
                            self.state = GroupState::Done;
                            return Some(Err(err));
                        }
                    }
                    GroupState::GroupOpen { key, acc } if *key == kv.key => {
                        if let Err(err) = self.strategy.update(acc, kv.value) {
                            self.state = GroupState::Done;
                            return Some(Err(err));
                        }
                    }
                    GroupState::GroupOpen { .. } => {
                        // Key changed: emit the finished group, open the next.
                        let (key, acc) =
                            match std::mem::replace(&mut self.state, GroupState::NoGroupOpen) {
                                GroupState::GroupOpen { key, acc } => (key, acc),
                                _ => unreachable!("state checked above"),
                            };
                        let flushed = self.flush_group(key, acc);
                        if flushed.is_err() {
                            self.state = GroupState::Done;
                        } else if let Err(err) = self.open_group(kv) {
                            self.state = GroupState::Done;
                            return Some(Err(err));
                        }
                        return Some(flushed);
                    }
                    GroupState::Done => unreachable!("checked at top of loop"),
                },
            }
        }
    }
}

/// Options for [`run_reduce`].
#[derive(Copy, Clone, Debug)]
pub struct ReduceOptions {
    /// Field delimiter between the key and the value of an input line.
    pub delimiter: char,
    pub order: OrderPolicy,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            // the Hadoop-streaming default
            delimiter: '\t',
            order: OrderPolicy::default(),
        }
    }
}

/// Run one reduce pass: parse `key<DELIM>value` lines from `input`,
/// aggregate contiguous same-key runs with `strategy`, and write one
/// `key<TAB>result` line per group to `output`.
///
/// Returns the number of groups emitted. Empty input is not an error
/// and writes nothing. The first malformed line or strategy failure
/// aborts the pass.
pub fn run_reduce<R, W, S>(
    input: R,
    output: &mut W,
    strategy: S,
    opts: ReduceOptions,
) -> Result<u64>
where
    R: BufRead,
    W: Write,
    S: Aggregation,
{
    let records = input.lines().map(|line| {
        let line = line.context("failed to read input line")?;
        parse_line(&line, opts.delimiter).map_err(Into::into)
    });

    let mut groups: u64 = 0;
    for flushed in GroupedAggregator::with_order_policy(records, strategy, opts.order) {
        let kv = flushed?;
        output.write_all(&kv.key)?;
        output.write_all(b"\t")?;
        output.write_all(&kv.value)?;
        output.write_all(b"\n")?;
        groups += 1;
    }
    output.flush()?;
    debug!("reduce pass emitted {} groups", groups);
    Ok(groups)
}
