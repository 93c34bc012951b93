mod dataset;
mod labels;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tsprep::NumberFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and convert time series text datasets")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the shape of a text dataset
    Info {
        file: PathBuf,

        /// Also print the effective length of every series
        #[arg(long)]
        lengths: bool,
    },
    /// Re-write a text dataset with another numeric format
    Reformat {
        input: PathBuf,
        output: PathBuf,

        /// printf-style conversion spec, e.g. "%.6e" or "%g"
        #[arg(long, default_value_t = NumberFormat::default())]
        fmt: NumberFormat,
    },
    /// Encode or decode class labels
    #[command(subcommand)]
    Labels(LabelsCommand),
}

#[derive(Subcommand, Debug)]
enum LabelsCommand {
    /// Read one label per line and print one-hot rows
    Encode {
        file: PathBuf,

        /// Emit a single decision column when there are exactly two classes
        #[arg(long)]
        binary: bool,

        /// Save the fitted categorizer as JSON
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Read indicator rows and print one label per line
    Decode {
        file: PathBuf,

        /// Categorizer saved by `labels encode --state`
        #[arg(long)]
        state: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Info { file, lengths } => dataset::info(&file, lengths),
        Command::Reformat { input, output, fmt } => dataset::reformat(&input, &output, &fmt),
        Command::Labels(LabelsCommand::Encode {
            file,
            binary,
            state,
        }) => labels::encode(&file, binary, state.as_deref()),
        Command::Labels(LabelsCommand::Decode { file, state }) => labels::decode(&file, &state),
    }
}
