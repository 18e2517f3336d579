use anyhow::{Ok, Result};

use super::config_model::{BackendServer, DotEnvyConfig, Stars, Supabase};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let supabase = Supabase {
        project_url: std::env::var("SUPABASE_PROJECT_URL")
            .expect("SUPABASE_PROJECT_URL is invalid"),
        service_key: std::env::var("SUPABASE_SERVICE_KEY")
            .expect("SUPABASE_SERVICE_KEY is invalid"),
        jwt_secret: std::env::var("SUPABASE_JWT_SECRET").expect("SUPABASE_JWT_SECRET is invalid"),
    };

    let stars = Stars {
        poll_interval_ms: std::env::var("STARS_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "2000".to_string())
            .parse()?,
        poll_max_attempts: std::env::var("STARS_POLL_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "90".to_string())
            .parse()?,
    };

    Ok(DotEnvyConfig {
        backend_server,
        supabase,
        stars,
    })
}
