use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use medproto_cli::commands;
use medproto_cli::config::{self, LogFormat};
use medproto_storage::NormTableStore;
use medproto_storage::file::FileStore;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "medproto", version, about = "Diagnostic protocol norm evaluation")]
struct Cli {
    /// Override the data directory from the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Age between a birth date and a reference date (today by default).
    Age {
        birth_date: String,
        #[arg(long)]
        on: Option<String>,
    },
    /// Body surface area in m².
    Bsa { weight_kg: f64, height_cm: f64 },
    /// List built-in study types and their default ranges.
    Studies,
    /// Manage norm tables.
    Tables {
        #[command(subcommand)]
        command: TablesCommand,
    },
    /// Evaluate a protocol JSON file and print its conclusion.
    Evaluate {
        file: PathBuf,
        /// Store the protocol with its conclusion in the archive.
        #[arg(long)]
        save: bool,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum TablesCommand {
    List {
        #[arg(long)]
        study: Option<String>,
    },
    Import { file: PathBuf },
    Delete { id: String },
    Lint,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let loaded = config::load_config(&config_path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match loaded.config.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init(),
    }
    loaded.log_origin(&config_path);

    let mut cfg = loaded.config;
    if let Some(dir) = cli.data_dir {
        cfg.data_dir = Some(dir);
    }

    match cli.command {
        Command::Age { birth_date, on } => {
            let age = commands::age(&birth_date, on.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&age)?);
        }
        Command::Bsa {
            weight_kg,
            height_cm,
        } => match commands::bsa(weight_kg, height_cm) {
            Some(bsa) => println!("{bsa:.4}"),
            None => eyre::bail!("weight and height must both be positive"),
        },
        Command::Studies => print!("{}", commands::list_studies()),
        Command::Tables { command } => {
            let mut store = FileStore::open(cfg.resolve_data_dir()?)?;
            match command {
                TablesCommand::List { study } => {
                    let study = study.unwrap_or(cfg.default_study.clone());
                    println!("{}", commands::list_tables(&store, Some(&study))?);
                }
                TablesCommand::Import { file } => {
                    let json = std::fs::read_to_string(&file)?;
                    let count = commands::import_tables(&mut store, &json)?;
                    println!("imported {count} table(s)");
                }
                TablesCommand::Delete { id } => {
                    store.delete_table(&id)?;
                    println!("deleted {id}");
                }
                TablesCommand::Lint => {
                    for line in commands::lint_tables(&store)? {
                        println!("{line}");
                    }
                }
            }
        }
        Command::Evaluate { file, save, json } => {
            let mut store = FileStore::open(cfg.resolve_data_dir()?)?;
            let contents = std::fs::read_to_string(&file)?;
            let report = commands::evaluate(&mut store, &contents, save)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}\n\n{}", report.summary, report.conclusion);
            }
        }
    }

    Ok(())
}
