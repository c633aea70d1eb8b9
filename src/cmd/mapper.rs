use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Name of the mapper workload
    #[arg(short, long)]
    pub workload: String,

    /// Auxiliary arguments to pass to the mapper workload.
    #[clap(value_parser, last = true)]
    pub args: Vec<String>,
}
