//! A mapper over bird observation lines.
//!
//! Each observation is `species,country`. The map stage swaps the
//! fields to key observations by country, `country\tspecies`, so that
//! [`DistinctCount`](super::distinct_count::DistinctCount) can count
//! distinct species per country after the framework sort.

use crate::record::parse_line;
use crate::utils::string_from_bytes;
use crate::*;
use bytes::Bytes;

pub fn map(line: Bytes, _aux: Bytes) -> MapOutput {
    let s = string_from_bytes(line)?;
    let kv = parse_line(s.trim_end(), ',')?;

    let KeyValue {
        key: species,
        value: country,
    } = kv;
    let pair = KeyValue::new(country, species);
    Ok(Box::new(std::iter::once(Ok(pair))))
}
