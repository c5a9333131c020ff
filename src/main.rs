//! `spaces`: the four fundamental subspaces of a matrix, from the terminal.
//!
//! **Usage:**
//! ```text
//! spaces compute --json '[[1, 2], [2, 4]]'
//! spaces compute --csv matrix.csv --format json
//! spaces examples
//! spaces health
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use spaces::{telemetry, MatrixInput, Settings, Spaces};

/// Compute the column, row, null and left null spaces of a small matrix.
#[derive(Parser)]
#[command(name = "spaces", version, about)]
struct Args {
    /// TOML settings file; `SPACES_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reduce a matrix and print its four subspaces.
    Compute {
        /// Read the matrix from a CSV file, one row per line.
        #[arg(long, conflicts_with = "json", required_unless_present = "json")]
        csv: Option<PathBuf>,

        /// Matrix as JSON, either `[[...]]` or `{"matrix": [[...]]}`.
        #[arg(long)]
        json: Option<String>,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// List the built-in example matrices.
    Examples,
    /// Print service health as JSON.
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    telemetry::init(&settings);
    let spaces = Spaces::new(settings);

    match args.command {
        Command::Compute { csv, json, format } => {
            let input = match (csv, json) {
                (Some(path), _) => MatrixInput::read(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, Some(text)) => MatrixInput::from_json(&text).context("parsing JSON matrix")?,
                (None, None) => anyhow::bail!("one of --csv or --json is required"),
            };

            match spaces.compute(&input.matrix) {
                Ok(served) => match format {
                    Format::Table => println!("{}", served.result),
                    Format::Json => println!("{}", serde_json::to_string_pretty(&served)?),
                },
                Err(e) => {
                    eprintln!("{}", serde_json::to_string_pretty(&e.body())?);
                    process::exit(if e.is_validation() { 2 } else { 1 });
                }
            }
        }
        Command::Examples => {
            for example in spaces.examples() {
                println!("{}: {}", example.name, example.description);
                println!("    {}", serde_json::to_string(&example.matrix)?);
            }
        }
        Command::Health => println!("{}", serde_json::to_string_pretty(&spaces.health())?),
    }

    Ok(())
}
