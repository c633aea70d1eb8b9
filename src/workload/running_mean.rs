//! A reducer strategy that averages numeric values per key.
//!

use crate::record::parse_f64;
use crate::reduce::Aggregation;
use crate::utils::string_to_bytes;
use anyhow::{bail, Result};
use bytes::Bytes;

/// Running sum and item count for one group's mean.
#[derive(Default)]
pub struct MeanAcc {
    sum: f64,
    count: u64,
}

/// Averages the numeric values of one group.
pub struct RunningMean;

impl Aggregation for RunningMean {
    type Acc = MeanAcc;

    fn init(&self) -> Self::Acc {
        MeanAcc::default()
    }

    fn update(&self, acc: &mut Self::Acc, value: Bytes) -> Result<()> {
        acc.sum += parse_f64(&value)?;
        acc.count += 1;
        Ok(())
    }

    fn finalize(&self, acc: Self::Acc) -> Result<Bytes> {
        // The engine updates every group at least once before
        // finalizing, so an empty accumulator is a caller bug.
        if acc.count == 0 {
            bail!("cannot take the mean of an empty group");
        }
        let mean = acc.sum / acc.count as f64;
        Ok(string_to_bytes(mean.to_string()))
    }
}
