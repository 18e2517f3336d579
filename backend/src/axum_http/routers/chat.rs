use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::Deserialize;
use uuid::Uuid;

use application::usecases::chat::ChatPaymentUseCase;
use domain::value_objects::enums::payment_rails::PaymentRail;
use infra::stars::invoice_client::StarsInvoiceClient;
use infra::supabase::client::SupabaseClient;
use infra::supabase::ledger::SupabaseLedger;
use infra::supabase::repositories::{
    earnings::SupabaseEarningRepository, notifications::SupabaseNotificationRepository,
    transactions::SupabaseTransactionRepository,
};

use crate::auth::AuthUser;
use crate::axum_http::error_responses::ApiError;
use crate::config::config_model::DotEnvyConfig;

use super::{PaymentResponse, host_bridge};

type Service = ChatPaymentUseCase<
    SupabaseLedger,
    SupabaseEarningRepository,
    SupabaseTransactionRepository,
    SupabaseNotificationRepository,
    StarsInvoiceClient,
>;

pub fn routes(supabase: Arc<SupabaseClient>, config: &DotEnvyConfig) -> Router {
    let stars = Arc::new(StarsInvoiceClient::new(Arc::clone(&supabase)));
    let usecase = ChatPaymentUseCase::new(
        Arc::new(SupabaseLedger::new(Arc::clone(&supabase))),
        Arc::new(SupabaseEarningRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseTransactionRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseNotificationRepository::new(Arc::clone(&supabase))),
        Arc::clone(&stars),
        host_bridge(&stars, config),
    );

    Router::new()
        .route("/api/v1/tips", post(send_tip))
        .route("/api/v1/gifts", post(send_gift))
        .route("/api/v1/messages/:message_id/unlock", post(unlock_message))
        .with_state(Arc::new(usecase))
}

#[derive(Debug, Deserialize)]
pub struct TipRequest {
    pub recipient_id: Uuid,
    pub amount: i64,
    #[serde(default)]
    pub rail: PaymentRail,
}

#[derive(Debug, Deserialize)]
pub struct GiftRequest {
    pub recipient_id: Uuid,
    pub conversation_id: Uuid,
    pub gift_id: Uuid,
    pub price: i64,
}

pub async fn send_tip(
    State(usecase): State<Arc<Service>>,
    auth: AuthUser,
    Json(body): Json<TipRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let outcome = usecase
        .process_tip(auth.user_id, body.recipient_id, body.amount, body.rail)
        .await?;
    Ok(Json(outcome.into()))
}

pub async fn send_gift(
    State(usecase): State<Arc<Service>>,
    auth: AuthUser,
    Json(body): Json<GiftRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let outcome = usecase
        .send_gift(
            auth.user_id,
            body.recipient_id,
            body.conversation_id,
            body.gift_id,
            body.price,
        )
        .await?;
    Ok(Json(outcome.into()))
}

pub async fn unlock_message(
    State(usecase): State<Arc<Service>>,
    auth: AuthUser,
    Path(message_id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let outcome = usecase.unlock_ppv(message_id, auth.user_id).await?;
    Ok(Json(outcome.into()))
}
