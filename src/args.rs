use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wordfreq-page")]
#[command(about = "Word frequency statistics and charts for web articles")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the interactive page
    Serve {
        /// Address to bind (overrides the configuration)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Analyse one URL and print the ranked words
    Analyze {
        /// Article URL
        url: String,

        /// Minimum count for a word to be listed (1-100)
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Number of ranked words to print (1-20)
        #[arg(long)]
        top: Option<usize>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}
