use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Opening Tree Crawler")]
#[clap(about = "Builds a probability weighted tree of opening lines from explorer statistics", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Crawl(CrawlCommand),
    Show(ShowCommand),
}

#[derive(Args)]
#[clap(about = "Crawls the explorer ply by ply, reusing every snapshot already on disk", long_about = None)]
pub struct CrawlCommand {
    #[clap(short, long, default_value_t = String::from("opening_tree.conf"))]
    pub config: String,

    /// Session credential forwarded to the explorer. Raises the default depth to 15.
    #[clap(short, long)]
    pub session: Option<String>,

    #[clap(short, long)]
    pub max_ply: Option<usize>,

    #[clap(long)]
    pub snapshot_dir: Option<String>,

    /// Replay statistics from a recording instead of querying the explorer.
    #[clap(long)]
    pub recording: Option<String>,
}

#[derive(Args)]
#[clap(about = "Prints the continuations stored for a ply", long_about = None)]
pub struct ShowCommand {
    #[clap(short, long, default_value_t = String::from("opening_tree.conf"))]
    pub config: String,

    pub ply: usize,

    /// Moves joined with '+', e.g. e4+c5. Every line of the ply when omitted.
    #[clap(short, long)]
    pub line: Option<String>,

    #[clap(long)]
    pub snapshot_dir: Option<String>,
}
