//! Converts streaming application names to actual application code.
//!
//! # Example
//!
//! To get the posts mapper:
//! ```
//! # use anyhow::Result;
//! // This is the correct import to use if you are outside the crate:
//! use mrpipe::workload;
//! // Since you will be working within the `mrpipe` crate,
//! // you should write `use crate::workload;` instead.
//! # fn main() -> Result<()> {
//! let posts = workload::named_mapper("posts")?;
//! # Ok(())
//! # }
//! ```

use crate::reduce::{run_reduce, ReduceOptions};
use crate::MapFn;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

pub mod birds;
pub mod distinct_count;
pub mod posts;
pub mod running_count;
pub mod running_mean;

/// Gets the mapper named `name`.
///
/// Returns [`None`] if no mapper with the given name was found.
pub fn try_named_mapper(name: &str) -> Option<MapFn> {
    match name {
        "posts" => Some(posts::map),
        "birds" => Some(birds::map),
        _ => None,
    }
}

/// Gets the mapper named `name`.
///
/// Returns an [`anyhow::Error`] if no mapper with the given name was found.
pub fn named_mapper(name: &str) -> Result<MapFn> {
    match try_named_mapper(name) {
        Some(map_fn) => Ok(map_fn),
        None => bail!("No mapper named `{}` found.", name),
    }
}

/// Runs the reducer strategy named `name` over `input`, writing one
/// result line per group to `output`.
///
/// The strategies have different accumulator types, so dispatch by
/// name happens here rather than through a returned trait object.
/// Returns an [`anyhow::Error`] if no strategy with the given name was
/// found.
pub fn run_named_reducer<R, W>(
    name: &str,
    input: R,
    output: &mut W,
    opts: ReduceOptions,
) -> Result<u64>
where
    R: BufRead,
    W: Write,
{
    match name {
        "distinct-count" => run_reduce(input, output, distinct_count::DistinctCount, opts),
        "running-count" => run_reduce(input, output, running_count::RunningCount, opts),
        "running-mean" => run_reduce(input, output, running_mean::RunningMean, opts),
        _ => bail!("No reducer strategy named `{}` found.", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mapper_name_is_an_error() {
        assert!(try_named_mapper("no-such-mapper").is_none());
        assert!(named_mapper("no-such-mapper").is_err());
    }

    #[test]
    fn unknown_reducer_name_is_an_error() {
        let mut output = Vec::new();
        let err = run_named_reducer(
            "no-such-strategy",
            "a\t1\n".as_bytes(),
            &mut output,
            ReduceOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no-such-strategy"));
    }
}
