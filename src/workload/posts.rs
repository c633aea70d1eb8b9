//! A mapper over user post lines.
//!
//! Input lines look like `name,"some post text"`. Each line maps to
//! `name\t1`, ready for [`RunningCount`](super::running_count::RunningCount)
//! after the framework sort.

use crate::record::parse_line;
use crate::utils::string_from_bytes;
use crate::*;
use bytes::Bytes;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(no_binary_name = true)]
struct Args {
    /// Field delimiter between the user name and the post text.
    #[clap(short, long, value_parser, default_value_t = ',')]
    delimiter: char,
}

pub fn map(line: Bytes, aux: Bytes) -> MapOutput {
    let args = Args::try_parse_from(serde_json::from_slice::<Vec<String>>(&aux)?)?;

    let s = string_from_bytes(line)?;
    let kv = parse_line(s.trim_end(), args.delimiter)?;

    // One post per line; the count value is always 1.
    let pair = KeyValue::new(kv.into_key(), Bytes::from_static(b"1"));
    Ok(Box::new(std::iter::once(Ok(pair))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aux(args: &[&str]) -> Bytes {
        Bytes::from(serde_json::to_string(args).unwrap())
    }

    #[test]
    fn emits_user_and_unit_count() {
        let line = Bytes::from("Alice,\"hello world\"");
        let pairs: Vec<KeyValue> = map(line, aux(&[]))
            .unwrap()
            .collect::<anyhow::Result<_>>()
            .unwrap();
        assert_eq!(pairs, vec![KeyValue::new(Bytes::from("Alice"), Bytes::from("1"))]);
    }

    #[test]
    fn post_text_may_contain_the_delimiter() {
        let line = Bytes::from("Bob,\"one, two, three\"");
        let pairs: Vec<KeyValue> = map(line, aux(&[]))
            .unwrap()
            .collect::<anyhow::Result<_>>()
            .unwrap();
        assert_eq!(pairs[0].key, Bytes::from("Bob"));
    }

    #[test]
    fn delimiter_is_configurable_through_aux_args() {
        let line = Bytes::from("Carol|\"text\"");
        let pairs: Vec<KeyValue> = map(line, aux(&["--delimiter", "|"]))
            .unwrap()
            .collect::<anyhow::Result<_>>()
            .unwrap();
        assert_eq!(pairs[0].key, Bytes::from("Carol"));
    }

    #[test]
    fn line_without_delimiter_is_an_error() {
        let line = Bytes::from("no delimiter");
        let err = map(line, aux(&[])).err().unwrap();
        assert!(err.downcast_ref::<crate::record::ParseError>().is_some());
    }
}
