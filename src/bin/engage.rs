//! Command-line driver for the Engage XML API client.
//!
//! Credentials and the endpoint come from the environment:
//!
//! ```sh
//! export ENGAGE_URL='http://api.example.com/XMLAPI'
//! export ENGAGE_USERNAME='jojo@mojocom.com'
//! export ENGAGE_PASSWORD='...'
//! engage get-lists --relational
//! engage insert-update-relational-table 90211 purchases.csv
//! ```
//!
//! Errors print as a single `<Kind>: <message>` line and exit non-zero;
//! `-v` turns on debug logging and appends the error's source chain.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use engage_api::{ClientConfig, EngageClient, Error, ErrorKind, Operation};

#[derive(Parser)]
#[command(name = "engage", about = "Silverpop Engage XML API client", version)]
struct Cli {
    /// Verbose output: debug-level logging and full error detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the account's contact lists or relational tables
    GetLists {
        /// Enumerate relational tables instead of contact lists
        #[arg(long)]
        relational: bool,
    },
    /// Show column metadata for one list
    GetListMetaData { list_id: String },
    /// Export a list to the download site; prints the remote file path
    ExportList { list_id: String },
    /// Insert or update rows of a relational table from a CSV file
    InsertUpdateRelationalTable {
        list_id: String,
        /// CSV whose first record names the destination columns
        csv_file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli).await {
        eprintln!("{}: {err}", err.kind.label());
        if cli.verbose {
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let mut config = ClientConfig::from_env()?;
    config.enable_tracing = cli.verbose;

    let operation = match &cli.command {
        Command::GetLists { relational } => Operation::GetLists {
            relational: *relational,
        },
        Command::GetListMetaData { list_id } => Operation::GetListMetaData {
            list_id: list_id.clone(),
        },
        Command::ExportList { list_id } => Operation::ExportList {
            list_id: list_id.clone(),
        },
        Command::InsertUpdateRelationalTable { list_id, csv_file } => {
            Operation::InsertUpdateRelationalTable {
                list_id: list_id.clone(),
                records: read_records(csv_file)?,
            }
        }
    };

    let client = EngageClient::new(config)?;
    let outcome = client.dispatch(operation).await?;
    println!("{outcome}");
    Ok(())
}

/// Read a CSV file as raw records, header interpretation disabled so the
/// first record reaches the row transformer untouched. Ragged rows pass
/// through here too; shape enforcement is the transformer's contract.
fn read_records(path: &Path) -> Result<Vec<Vec<String>>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidParameter(format!("cannot read {}", path.display())),
                e,
            )
        })?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidParameter(format!("malformed CSV in {}", path.display())),
                e,
            )
        })?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}
