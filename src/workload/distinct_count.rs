//! A reducer strategy that counts distinct values per key.
//!

use crate::reduce::Aggregation;
use crate::utils::string_to_bytes;
use anyhow::Result;
use bytes::Bytes;
use std::collections::HashSet;

/// Counts the unique values seen within one group.
///
/// With country-keyed bird observations, `US\tCrow`, `US\tDove`,
/// `US\tCrow` reduces to `US\t2`.
pub struct DistinctCount;

impl Aggregation for DistinctCount {
    type Acc = HashSet<Bytes>;

    fn init(&self) -> Self::Acc {
        HashSet::new()
    }

    fn update(&self, acc: &mut Self::Acc, value: Bytes) -> Result<()> {
        acc.insert(value);
        Ok(())
    }

    fn finalize(&self, acc: Self::Acc) -> Result<Bytes> {
        Ok(string_to_bytes(acc.len().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::{run_reduce, ReduceOptions};

    #[test]
    fn counts_unique_values_per_group() {
        let input = "US\tCrow\nUS\tDove\nUS\tCrow\nFR\tOwl\n".as_bytes();
        let mut output = Vec::new();
        run_reduce(input, &mut output, DistinctCount, ReduceOptions::default()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "US\t2\nFR\t1\n");
    }

    #[test]
    fn duplicate_only_group_counts_one() {
        let input = "BD\tSwan\nBD\tSwan\nBD\tSwan\n".as_bytes();
        let mut output = Vec::new();
        run_reduce(input, &mut output, DistinctCount, ReduceOptions::default()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "BD\t1\n");
    }
}
