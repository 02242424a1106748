//! Queue a ledger export, wait for it and save the archive.
//!
//! Needs `KRAKEN_API_KEY` and `KRAKEN_API_SECRET` with export permissions.
//!
//! Run with: RUST_LOG=kraken_rest_client=debug cargo run --example export_download

use std::time::Duration;

use kraken_rest_client::auth::Credentials;
use kraken_rest_client::rest::KrakenRestClient;
use kraken_rest_client::rest::private::AddExportRequest;
use kraken_rest_client::types::{ExportRemoval, ExportReport};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let _ = dotenv::dotenv();

    let client = KrakenRestClient::builder()
        .credentials(Credentials::from_env()?)
        .traced()
        .max_retries(2)
        .build();

    let request = AddExportRequest::new(ExportReport::Ledgers, "ledger archive");
    let id = client.add_export(&request).await?.id;
    println!("Queued export {id}");

    loop {
        let reports = client.get_export_status(ExportReport::Ledgers).await?;
        match reports.iter().find(|report| report.id == id) {
            Some(report) if report.is_processed() => break,
            Some(report) => println!("  {}", report.status),
            None => return Err(format!("export {id} disappeared").into()),
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    let body = client.retrieve_export(&id).await?;
    let path = format!("{id}.zip");
    let mut file = tokio::fs::File::create(&path).await?;
    let written = body.copy_to(&mut file).await?;
    println!("Saved {written} bytes to {path}");

    client.remove_export(&id, ExportRemoval::Delete).await?;
    Ok(())
}
