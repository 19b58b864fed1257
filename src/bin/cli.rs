//! Command-line front end for the AVL index.
//!
//! Each subcommand loads the snapshot file, runs one index operation, and
//! (for mutations) saves the snapshot back. All user-facing messages and
//! exit codes live here; the core only returns success/failure values.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use avl_index::{AvlIndex, MalformedPolicy, Result};

#[derive(Parser, Debug)]
#[command(
    name = "avl-index",
    version,
    about = "Keyed record store on a self-balancing AVL tree"
)]
struct Cli {
    /// Snapshot file backing the index.
    #[arg(long, global = true, default_value = "records.txt")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a record, or overwrite the value of an existing key
    Add { key: String, value: String },
    /// Remove a record by key
    Remove { key: String },
    /// Look up a record by key
    Find { key: String },
    /// List every record in ascending key order
    List,
    /// Show record count, tree height and rotations performed
    Stats,
    /// Write a plain in-order listing (for reading, not reloading)
    Export { output: PathBuf },
    /// Delete every record
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut index = AvlIndex::new();
    load_if_present(&mut index, &cli.file)?;

    match cli.command {
        Command::Add { key, value } => {
            index.insert(key.clone(), value);
            index.save_to_path(&cli.file)?;
            println!("added {key:?} ({} records)", index.len());
        }
        Command::Remove { key } => {
            if !index.delete(&key) {
                eprintln!("no record for {key:?}");
                return Ok(ExitCode::FAILURE);
            }
            index.save_to_path(&cli.file)?;
            println!("removed {key:?} ({} records)", index.len());
        }
        Command::Find { key } => match index.get(&key) {
            Some(value) => println!("{key} | {value}"),
            None => {
                eprintln!("no record for {key:?}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::List => {
            for (key, value) in index.iter() {
                println!("{key} | {value}");
            }
        }
        Command::Stats => {
            println!("records:   {}", index.len());
            println!("height:    {}", index.height());
            // Rotations triggered while replaying the snapshot this run.
            println!("rotations: {}", index.rotation_count());
        }
        Command::Export { output } => {
            export_listing(&index, &output)?;
            println!("exported {} records to {}", index.len(), output.display());
        }
        Command::Clear => {
            index.clear();
            index.save_to_path(&cli.file)?;
            println!("cleared all records");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Load the snapshot if it exists; a missing file just means starting with
/// an empty index.
fn load_if_present(index: &mut AvlIndex, path: &Path) -> Result<()> {
    match index.load_from_path(path, MalformedPolicy::Fail) {
        Ok(_) => Ok(()),
        Err(e) if e.is_missing_file() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Plain in-order listing with a header. Presentation format only — the
/// ` | ` separator is padded, so this file is not a reloadable snapshot.
fn export_listing(index: &AvlIndex, path: &Path) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "=== RECORDS ===")?;
    writeln!(file)?;
    for (key, value) in index.iter() {
        writeln!(file, "{key} | {value}")?;
    }
    Ok(())
}
