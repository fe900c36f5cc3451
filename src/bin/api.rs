//! Todo API server binary.
//!
//! This binary creates the concrete MongoDB-backed database and passes it
//! to the API server. The API layer remains agnostic of the storage
//! backend.

use std::net::IpAddr;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use todo_api::api::{self, ApiError, Config};
use todo_api::db::DbError;
use todo_api::db::mongo::{DEFAULT_URI, MongoDatabase};

/// Port used when neither `--port` nor `PORT` is set.
const DEFAULT_PORT: u16 = 8000;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(todo_api::binary::database))]
    Database(#[from] DbError),

    #[error("API server error: {0}")]
    #[diagnostic(code(todo_api::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(author, version, about = "Todo API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on (falls back to the PORT environment variable, then 8000)
    #[arg(short, long)]
    port: Option<u16>,

    /// MongoDB connection string
    #[arg(long, default_value = DEFAULT_URI)]
    uri: String,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    let port = cli
        .port
        .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(DEFAULT_PORT);

    // Unreachable storage is fatal; there is nothing to serve without it.
    let db = MongoDatabase::connect(&cli.uri).await?;
    println!("Connected to MongoDB");

    api::run(
        Config {
            host: cli.host,
            port,
        },
        db,
    )
    .await?;

    Ok(())
}
