#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub supabase: Supabase,
    pub stars: Stars,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Supabase {
    pub project_url: String,
    pub service_key: String,
    pub jwt_secret: String,
}

/// Polling cadence of the server-side host bridge watching Stars invoices.
#[derive(Debug, Clone)]
pub struct Stars {
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,
}
