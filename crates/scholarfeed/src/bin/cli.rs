use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Build one RSS feed per author from Semantic Scholar", long_about = None)]
pub struct Cli {
    /// TOML config file. Defaults to `scholarfeed.toml` when it exists.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overrides `output_dir` from the config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Do not wait between authors.
    #[arg(long, default_value_t = false)]
    pub no_delay: bool,

    /// Exit with a failure status when any author could not be written.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}
