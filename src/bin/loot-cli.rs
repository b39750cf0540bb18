use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use custom_loot_tables::config::{self, ObservabilityConfig};
use custom_loot_tables::loot::{DefinitionLoader, ResourceKey};
use custom_loot_tables::observability::logging;
use custom_loot_tables::overrides::{EntryStatus, OverrideSet};

#[derive(Parser)]
#[command(name = "loot-cli")]
#[command(about = "Check custom loot table data directories", long_about = None)]
struct Cli {
    /// Plugin data directory holding config.toml and the table files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every configured table and report failures
    Check,
    /// Print the table that would be applied for an identifier
    Show {
        identifier: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load_from_dir(&cli.data_dir) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&ObservabilityConfig::default());
            eprintln!("Error: cannot load {}: {}", cli.data_dir.join(config::CONFIG_FILE_NAME).display(), e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.observability);

    let loader = DefinitionLoader::new(&cli.data_dir);
    let (overrides, report) = OverrideSet::build(&config, &loader);

    match cli.command {
        Commands::Check => {
            for entry in overrides.iter() {
                match &entry.status {
                    EntryStatus::Loaded => println!(
                        "ok       {} <- {} ({} pools)",
                        entry.key,
                        entry.file_name,
                        entry.table.pools.len()
                    ),
                    EntryStatus::Fallback { reason } => {
                        println!("fallback {} <- {}: {}", entry.key, entry.file_name, reason)
                    }
                }
            }
            println!(
                "{} configured, {} loaded, {} falling back to the empty table",
                overrides.len(),
                report.loaded,
                report.failures.len()
            );
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Show { identifier } => {
            let key = match ResourceKey::parse(&identifier) {
                Ok(key) => key,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let Some(entry) = overrides.get(&key) else {
                eprintln!("Error: {} is not overridden", key);
                return ExitCode::FAILURE;
            };
            match serde_json::to_string_pretty(entry.table.as_ref()) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
