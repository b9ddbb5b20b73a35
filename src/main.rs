//! Hỷ Lạc Việt storefront service

use anyhow::Result;
use hylacviet_storefront::{config::StorefrontConfig, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = StorefrontConfig::from_env()?;
    let bind_address = config.bind_address.clone();
    tracing::info!(api_url = %config.api_url, site_url = %config.site_url, "catalog API configured");

    let state = web::AppState::new(config)?;
    let app = web::router(state);

    tracing::info!("🚀 Hỷ Lạc Việt storefront listening on {}", bind_address);
    axum::serve(tokio::net::TcpListener::bind(&bind_address).await?, app).await?;
    Ok(())
}
