use anyhow::Result;
use bytes::Bytes;
use clap::Parser;
use cmd::mapper::Args;
use log::info;
use mrpipe::*;
use std::io::{self, BufRead, BufWriter, Write};

/// Map every stdin line through the named workload and write the
/// resulting `key\tvalue` pairs to stdout. Sorting the pairs by key is
/// the surrounding framework's job.
fn run_mapper(args: Args) -> Result<()> {
    let map_fn = workload::named_mapper(&args.workload)?;
    let serialized_args = Bytes::from(serde_json::to_string(&args.args)?);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());

    let mut pairs: u64 = 0;
    for line in stdin.lock().lines() {
        let line = line?;
        for item in map_fn(Bytes::from(line), serialized_args.clone())? {
            let KeyValue { key, value } = item?;
            output.write_all(&key)?;
            output.write_all(b"\t")?;
            output.write_all(&value)?;
            output.write_all(b"\n")?;
            pairs += 1;
        }
    }
    output.flush()?;
    info!("mapper `{}` emitted {} pairs", args.workload, pairs);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run_mapper(Args::parse())
}
