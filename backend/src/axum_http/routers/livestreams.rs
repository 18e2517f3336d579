use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use application::usecases::livestreams::LivestreamTicketUseCase;
use domain::value_objects::access::AccessDecision;
use domain::value_objects::enums::payment_rails::PaymentRail;
use infra::stars::invoice_client::StarsInvoiceClient;
use infra::supabase::client::SupabaseClient;
use infra::supabase::ledger::SupabaseLedger;
use infra::supabase::repositories::{
    earnings::SupabaseEarningRepository, livestreams::SupabaseLivestreamRepository,
    notifications::SupabaseNotificationRepository, transactions::SupabaseTransactionRepository,
};

use crate::auth::AuthUser;
use crate::axum_http::error_responses::ApiError;
use crate::config::config_model::DotEnvyConfig;

use super::{PaymentResponse, host_bridge};

type Service = LivestreamTicketUseCase<
    SupabaseLedger,
    SupabaseLivestreamRepository,
    SupabaseEarningRepository,
    SupabaseTransactionRepository,
    SupabaseNotificationRepository,
    StarsInvoiceClient,
>;

pub fn routes(supabase: Arc<SupabaseClient>, config: &DotEnvyConfig) -> Router {
    let stars = Arc::new(StarsInvoiceClient::new(Arc::clone(&supabase)));
    let usecase = LivestreamTicketUseCase::new(
        Arc::new(SupabaseLedger::new(Arc::clone(&supabase))),
        Arc::new(SupabaseLivestreamRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseEarningRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseTransactionRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseNotificationRepository::new(Arc::clone(&supabase))),
        Arc::clone(&stars),
        host_bridge(&stars, config),
    );

    Router::new()
        .route("/:livestream_id/ticket", post(buy_ticket))
        .route("/:livestream_id/access", get(access))
        .with_state(Arc::new(usecase))
}

#[derive(Debug, Deserialize)]
pub struct TicketRequest {
    #[serde(default)]
    pub rail: PaymentRail,
}

#[derive(Debug, Serialize)]
pub struct LivestreamAccessResponse {
    #[serde(flatten)]
    pub decision: AccessDecision,
    pub channel_name: Option<String>,
}

pub async fn buy_ticket(
    State(usecase): State<Arc<Service>>,
    auth: AuthUser,
    Path(livestream_id): Path<Uuid>,
    Json(body): Json<TicketRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let outcome = usecase
        .process_livestream_ticket(auth.user_id, livestream_id, body.rail)
        .await?;
    Ok(Json(outcome.into()))
}

pub async fn access(
    State(usecase): State<Arc<Service>>,
    auth: AuthUser,
    Path(livestream_id): Path<Uuid>,
) -> Result<Json<LivestreamAccessResponse>, ApiError> {
    let access = usecase
        .get_livestream_access(auth.user_id, livestream_id)
        .await?;
    Ok(Json(LivestreamAccessResponse {
        decision: access.decision,
        channel_name: access.channel_name,
    }))
}
