pub mod auth;
pub mod axum_http;
pub mod config;
pub mod observability;

use std::sync::Arc;

use anyhow::Result;
use infra::supabase::client::{SupabaseClient, SupabaseConfig};
use tracing::info;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability()?;

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let supabase_client = SupabaseClient::new(SupabaseConfig {
        project_url: dotenvy_env.supabase.project_url.clone(),
        service_key: dotenvy_env.supabase.service_key.clone(),
    });
    info!("Supabase client has been initialized");

    axum_http::http_serve::start(Arc::new(dotenvy_env), Arc::new(supabase_client)).await?;

    Ok(())
}
