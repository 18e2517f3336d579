use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::Deserialize;
use uuid::Uuid;

use application::usecases::subscriptions::SubscriptionPaymentUseCase;
use domain::value_objects::enums::payment_rails::PaymentRail;
use infra::stars::invoice_client::StarsInvoiceClient;
use infra::supabase::client::SupabaseClient;
use infra::supabase::ledger::SupabaseLedger;
use infra::supabase::repositories::{
    earnings::SupabaseEarningRepository, notifications::SupabaseNotificationRepository,
    subscriptions::SupabaseSubscriptionRepository, transactions::SupabaseTransactionRepository,
};

use crate::auth::AuthUser;
use crate::axum_http::error_responses::ApiError;
use crate::config::config_model::DotEnvyConfig;

use super::{PaymentResponse, host_bridge};

type Service = SubscriptionPaymentUseCase<
    SupabaseLedger,
    SupabaseSubscriptionRepository,
    SupabaseEarningRepository,
    SupabaseTransactionRepository,
    SupabaseNotificationRepository,
    StarsInvoiceClient,
>;

pub fn routes(supabase: Arc<SupabaseClient>, config: &DotEnvyConfig) -> Router {
    let stars = Arc::new(StarsInvoiceClient::new(Arc::clone(&supabase)));
    let usecase = SubscriptionPaymentUseCase::new(
        Arc::new(SupabaseLedger::new(Arc::clone(&supabase))),
        Arc::new(SupabaseSubscriptionRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseEarningRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseTransactionRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseNotificationRepository::new(Arc::clone(&supabase))),
        Arc::clone(&stars),
        host_bridge(&stars, config),
    );

    Router::new()
        .route("/:creator_id/subscribe", post(subscribe))
        .with_state(Arc::new(usecase))
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub price: i64,
    #[serde(default)]
    pub rail: PaymentRail,
}

pub async fn subscribe(
    State(usecase): State<Arc<Service>>,
    auth: AuthUser,
    Path(creator_id): Path<Uuid>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let outcome = usecase
        .process_subscription_payment(auth.user_id, creator_id, body.price, body.rail)
        .await?;
    Ok(Json(outcome.into()))
}
