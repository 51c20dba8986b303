//! FixedKV CLI
//!
//! Create, query and inspect FixedKV store files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fixedkv::{Config, FixedKv, Reader};
use tracing_subscriber::{fmt, EnvFilter};

/// FixedKV CLI
#[derive(Parser, Debug)]
#[command(name = "fixedkv")]
#[command(about = "Single-file embedded key-value store")]
#[command(version)]
struct Args {
    /// Capacity bound for the store image, in bytes
    #[arg(short, long, default_value = "4096")]
    capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new store from KEY=VALUE pairs
    Write {
        /// Store file (must not exist or be empty)
        path: PathBuf,

        /// Pairs to store, as KEY=VALUE
        #[arg(required = true)]
        pairs: Vec<String>,
    },

    /// Print the value stored under a key
    Get {
        path: PathBuf,

        /// The key to look up
        key: String,
    },

    /// Print every pair in key order
    List { path: PathBuf },

    /// Print format version and key count
    Info { path: PathBuf },

    /// Recreate a store with six sample keys and read two back
    Demo { path: PathBuf },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fixedkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::builder().capacity(args.capacity).build();

    match run(args.command, config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: Config) -> fixedkv::Result<ExitCode> {
    match command {
        Commands::Write { path, pairs } => {
            let kv = FixedKv::open_with_config(&path, config)?;
            for pair in &pairs {
                let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
                kv.set(key.as_bytes(), value.as_bytes())?;
            }
            kv.save()?;
            kv.close()?;
            tracing::info!("Wrote {} pairs to {}", pairs.len(), path.display());
        }

        Commands::Get { path, key } => {
            let reader = Reader::open_with_config(&path, config)?;
            match reader.get(key.as_bytes()) {
                Some(value) => println!("{}", String::from_utf8_lossy(&value)),
                None => {
                    eprintln!("key not found: {}", key);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::List { path } => {
            let reader = Reader::open_with_config(&path, config)?;
            for (key, value) in reader.iter() {
                println!(
                    "{}={}",
                    String::from_utf8_lossy(&key),
                    String::from_utf8_lossy(&value)
                );
            }
        }

        Commands::Info { path } => {
            let reader = Reader::open_with_config(&path, config)?;
            println!("version: {}", reader.version());
            println!("keys:    {}", reader.len());
        }

        Commands::Demo { path } => {
            if path.exists() {
                std::fs::remove_file(&path)?;
            }

            let kv = FixedKv::open_with_config(&path, config.clone())?;
            for (key, value) in [
                ("A", "Aa"),
                ("F", "FFFFFF"),
                ("E", "EEEEE"),
                ("D", "DDDD"),
                ("C", "CCC"),
                ("B", "BB"),
            ] {
                kv.set(key.as_bytes(), value.as_bytes())?;
            }
            kv.save()?;
            kv.close()?;
            println!("fixed-kv cli");

            let reader = Reader::open_with_config(&path, config)?;
            for key in ["A", "F"] {
                if let Some(value) = reader.get(key.as_bytes()) {
                    println!("{}", String::from_utf8_lossy(&value));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
