//! padtab CLI - pad document table import/export tool

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;

use padtab::{AttributePool, ImportOptions, ImportOutcome, ImporterRegistry, RowDescriptor};

#[derive(Parser)]
#[command(name = "padtab")]
#[command(version)]
#[command(about = "Import HTML tables into pad lines and render them back", long_about = None)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert HTML tables in a file into token-bearing table lines
    Import {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Destination file (defaults to the input, in place)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Length of generated table ids
        #[arg(long, default_value = "8")]
        id_length: usize,
    },

    /// Render table lines to HTML against an attribute pool dump
    ///
    /// The input holds one JSON object per line: {"text": ..., "aline": ...}
    Export {
        /// Input line dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Attribute pool dump (JSON with a numToAttrib map)
        #[arg(long, value_name = "FILE")]
        pool: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Decode a marker token (or a whole class list) and print its metadata
    Decode {
        /// Token or class string, e.g. "tbljson-eyJ0YmxJZCI6..."
        token: String,
    },

    /// Encode row metadata into a marker token
    Encode {
        /// Table id
        #[arg(long)]
        table_id: String,

        /// Row index
        #[arg(long)]
        row: u32,

        /// Column count
        #[arg(long)]
        cols: u32,
    },
}

/// One line of an export dump.
#[derive(Deserialize)]
struct LineRecord {
    text: String,
    #[serde(default)]
    aline: String,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(cli.command) {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn run(command: Commands) -> padtab::Result<()> {
    match command {
        Commands::Import {
            input,
            output,
            id_length,
        } => {
            let extension = input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string();
            let destination = output.unwrap_or_else(|| input.clone());

            let registry = ImporterRegistry::with_defaults();
            let options = ImportOptions::new().with_id_length(id_length);
            let outcome = registry.import(&input, &extension, &destination, &options)?;

            match outcome {
                ImportOutcome::Handled { modified: true } => {
                    println!("{} {}", "converted".green().bold(), destination.display());
                }
                ImportOutcome::Handled { modified: false } => {
                    println!("{} {}", "unchanged".yellow(), destination.display());
                }
                ImportOutcome::Declined => {
                    println!("{} .{} is not handled", "declined".yellow(), extension);
                }
            }
            Ok(())
        }

        Commands::Export {
            input,
            pool,
            output,
        } => {
            let pool = AttributePool::from_json(&fs::read_to_string(pool)?)?;

            let mut rendered = String::new();
            let mut tables = 0usize;
            for (number, line) in fs::read_to_string(&input)?.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let record: LineRecord = serde_json::from_str(line).map_err(|e| {
                    padtab::Error::Other(format!("line {}: invalid record: {}", number + 1, e))
                })?;

                match padtab::export_line(&record.text, &record.aline, &pool) {
                    Some(markup) => {
                        tables += 1;
                        rendered.push_str(&markup);
                    }
                    None => rendered.push_str(&record.text),
                }
                rendered.push('\n');
            }

            match output {
                Some(path) => {
                    fs::write(&path, rendered)?;
                    println!(
                        "{} {} ({} table lines)",
                        "exported".green().bold(),
                        path.display(),
                        tables
                    );
                }
                None => print!("{}", rendered),
            }
            Ok(())
        }

        Commands::Decode { token } => {
            // Accept a full class list, a marker class, or a bare token
            let payload = padtab::extract_from_classes(&token).unwrap_or(token);

            match padtab::decode_token(&payload) {
                Some(decoded) => {
                    let status = if decoded.well_formed {
                        "well-formed".green()
                    } else {
                        "malformed".yellow()
                    };
                    println!("{} {}", status.bold(), decoded.json);
                    Ok(())
                }
                None => Err(padtab::Error::Other(
                    "token is not decodable".to_string(),
                )),
            }
        }

        Commands::Encode {
            table_id,
            row,
            cols,
        } => {
            let token = padtab::encode_row(&RowDescriptor::new(table_id, row, cols))?;
            println!("{}", padtab::marker_class(&token));
            Ok(())
        }
    }
}
