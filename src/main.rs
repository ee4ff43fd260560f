use std::sync::Arc;

use clap::Parser;
use item_service::config::Args;
use item_service::logging::init_logging;
use item_service::{http, InMemoryItemStore, ItemService};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_config()) {
        eprintln!("Error: Failed to initialize logging: {e}");
        return Err(e.into());
    }

    let config = args.processor_config();
    info!(
        concurrency = config.concurrency,
        delay_ms = args.delay_ms,
        "starting item service on {}",
        args.addr
    );

    let service = Arc::new(ItemService::with_config(InMemoryItemStore::new(), config));
    http::serve(service, &args.addr).await?;
    Ok(())
}
