use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Name of the reducer strategy
    #[arg(short, long)]
    pub strategy: String,

    /// Field delimiter between the key and the value of an input line
    #[arg(short, long, default_value_t = '\t')]
    pub delimiter: char,

    /// Fail instead of emitting duplicate rows when a key reappears
    /// after its group closed (costs memory per distinct key)
    #[arg(long)]
    pub strict: bool,
}
