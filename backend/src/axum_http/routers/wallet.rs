use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use domain::repositories::ledger::LedgerRepository;
use infra::supabase::client::SupabaseClient;
use infra::supabase::ledger::SupabaseLedger;

use crate::auth::AuthUser;
use crate::axum_http::error_responses::ApiError;

pub fn routes(supabase: Arc<SupabaseClient>) -> Router {
    let ledger = SupabaseLedger::new(supabase);

    Router::new()
        .route("/balance", get(balance))
        .with_state(Arc::new(ledger))
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: i64,
}

pub async fn balance(
    State(ledger): State<Arc<SupabaseLedger>>,
    auth: AuthUser,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = ledger
        .balance_of(auth.user_id)
        .await
        .map_err(application::usecases::PaymentError::Internal)?;
    Ok(Json(BalanceResponse { balance }))
}
