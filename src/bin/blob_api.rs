//! Blob API server: S3-compatible store gated by a static read/write policy.

use platform_kit::{blob_routes, BlobState, BlobStore, StoragePolicy};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = BlobStore::from_env().await?;
    let policy = StoragePolicy::from_env()?;
    tracing::info!(container = store.container(), %policy, "blob store ready");
    let app = blob_routes(BlobState { store, policy });

    let port: u16 = std::env::var("PORT").unwrap_or_else(|_| "7071".into()).parse()?;
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
