//! A reducer strategy that sums numeric counts per key.
//!

use crate::record::parse_u64;
use crate::reduce::Aggregation;
use crate::utils::string_to_bytes;
use anyhow::Result;
use bytes::Bytes;

/// Sums the numeric values of one group.
///
/// Mappers emit `key\t1` per occurrence and this strategy totals them.
/// Because the output is itself `key<TAB>count`, partial counts from
/// several mapper passes can be fed through it again and re-aggregate
/// to the same totals.
pub struct RunningCount;

impl Aggregation for RunningCount {
    type Acc = u64;

    fn init(&self) -> Self::Acc {
        0
    }

    fn update(&self, acc: &mut Self::Acc, value: Bytes) -> Result<()> {
        *acc += parse_u64(&value)?;
        Ok(())
    }

    fn finalize(&self, acc: Self::Acc) -> Result<Bytes> {
        Ok(string_to_bytes(acc.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::{run_reduce, ReduceOptions};

    #[test]
    fn sums_counts_per_group() {
        let input = "alice\t1\nalice\t1\nbob\t1\n".as_bytes();
        let mut output = Vec::new();
        run_reduce(input, &mut output, RunningCount, ReduceOptions::default()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "alice\t2\nbob\t1\n");
    }

    #[test]
    fn sums_partial_counts() {
        let input = "alice\t3\nalice\t4\nbob\t2\n".as_bytes();
        let mut output = Vec::new();
        run_reduce(input, &mut output, RunningCount, ReduceOptions::default()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "alice\t7\nbob\t2\n");
    }

    #[test]
    fn non_numeric_count_fails_the_pass() {
        let input = "alice\tone\n".as_bytes();
        let mut output = Vec::new();
        let err =
            run_reduce(input, &mut output, RunningCount, ReduceOptions::default()).unwrap_err();
        assert!(err.downcast_ref::<crate::record::ParseError>().is_some());
    }
}
