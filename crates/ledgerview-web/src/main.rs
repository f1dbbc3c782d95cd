//! ledgerview-web binary: load the dataset, build the router, serve.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;

use ledgerview_report::{Dataset, MemoryPreferences, MemoryReports};
use ledgerview_web::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the dataset file
    #[arg(default_value = "ledgerview.json")]
    dataset: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if !args.dataset.exists() {
        eprintln!("Error: dataset file '{}' not found.", args.dataset.display());
        std::process::exit(1);
    }

    let tera = ledgerview_web::load_templates()?;

    let dataset = Dataset::from_path(&args.dataset)
        .with_context(|| format!("failed to load {}", args.dataset.display()))?;
    let preferences = Arc::new(MemoryPreferences::new(dataset.preferences.clone()));
    let reports = Arc::new(MemoryReports::new(Arc::new(dataset)));

    let state = Arc::new(AppState {
        tera,
        query: reports.clone(),
        helper: reports,
        preferences,
    });

    let app = ledgerview_web::router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    println!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
