use std::path::PathBuf;

pub use clap::Parser;
use clap::{Args, Subcommand};
use stoppuhr::DEFAULT_TIMER_NAME;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the timer files.
    #[arg(short, long, global = true)]
    pub storage: Option<PathBuf>,
    /// Show verbose logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a timer.
    Start(Name),
    /// Stop a timer and print its elapsed time.
    Stop(Name),
    /// Start a stopped timer or stop a running one.
    Toggle(Name),
    /// Set a timer back to zero.
    Reset(Name),
    /// Show the elapsed time of a timer.
    Show {
        #[command(flatten)]
        name: Name,
        /// Show start and end of the last run as well.
        #[arg(short, long)]
        full: bool,
    },
    /// List all timers.
    List {
        /// Show start and end of the last run as well.
        #[arg(short, long)]
        full: bool,
    },
    /// Remove a timer.
    Clear {
        /// Name of the timer, ignored with `--all`.
        name: Option<String>,
        /// Remove all timers.
        #[arg(short = 'A', long)]
        all: bool,
    },
    /// Show the version.
    Version {
        /// Show the package name as well.
        #[arg(short, long)]
        full: bool,
    },
    /// Print shell completions.
    Completions {
        #[clap(long)]
        /// Provide the `shell` for which to generate the completion script.
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Args, Clone)]
pub struct Name {
    /// Name of the timer.
    #[arg(default_value = DEFAULT_TIMER_NAME)]
    pub name: String,
}
