use anyhow::Result;
use clap::Parser;
use cmd::reducer::Args;
use log::info;
use mrpipe::reduce::{OrderPolicy, ReduceOptions};
use mrpipe::*;
use std::io::{self, BufWriter};

/// Aggregate key-sorted `key<DELIM>value` lines from stdin and write
/// one `key\tresult` line per group to stdout.
fn run_reducer(args: Args) -> Result<()> {
    let opts = ReduceOptions {
        delimiter: args.delimiter,
        order: if args.strict {
            OrderPolicy::Strict
        } else {
            OrderPolicy::Permissive
        },
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());

    let groups = workload::run_named_reducer(&args.strategy, stdin.lock(), &mut output, opts)?;
    info!("reducer `{}` emitted {} groups", args.strategy, groups);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run_reducer(Args::parse())
}
