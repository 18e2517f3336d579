use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use application::usecases::content::ContentPurchaseUseCase;
use domain::value_objects::access::AccessDecision;
use domain::value_objects::enums::payment_rails::PaymentRail;
use infra::stars::invoice_client::StarsInvoiceClient;
use infra::supabase::client::SupabaseClient;
use infra::supabase::ledger::SupabaseLedger;
use infra::supabase::repositories::{
    earnings::SupabaseEarningRepository, follows::SupabaseFollowRepository,
    notifications::SupabaseNotificationRepository, posts::SupabasePostRepository,
    subscriptions::SupabaseSubscriptionRepository, transactions::SupabaseTransactionRepository,
};

use crate::auth::AuthUser;
use crate::axum_http::error_responses::ApiError;
use crate::config::config_model::DotEnvyConfig;

use super::{PaymentResponse, host_bridge};

type Service = ContentPurchaseUseCase<
    SupabaseLedger,
    SupabasePostRepository,
    SupabaseSubscriptionRepository,
    SupabaseFollowRepository,
    SupabaseEarningRepository,
    SupabaseTransactionRepository,
    SupabaseNotificationRepository,
    StarsInvoiceClient,
>;

pub fn routes(supabase: Arc<SupabaseClient>, config: &DotEnvyConfig) -> Router {
    let stars = Arc::new(StarsInvoiceClient::new(Arc::clone(&supabase)));
    let usecase = ContentPurchaseUseCase::new(
        Arc::new(SupabaseLedger::new(Arc::clone(&supabase))),
        Arc::new(SupabasePostRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseSubscriptionRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseFollowRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseEarningRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseTransactionRepository::new(Arc::clone(&supabase))),
        Arc::new(SupabaseNotificationRepository::new(Arc::clone(&supabase))),
        Arc::clone(&stars),
        host_bridge(&stars, config),
    );

    Router::new()
        .route("/:post_id/purchase", post(purchase))
        .route("/:post_id/access", get(access))
        .with_state(Arc::new(usecase))
}

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    #[serde(default)]
    pub rail: PaymentRail,
}

pub async fn purchase(
    State(usecase): State<Arc<Service>>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
    Json(body): Json<PurchaseRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let outcome = usecase
        .process_content_purchase(auth.user_id, post_id, body.rail)
        .await?;
    Ok(Json(outcome.into()))
}

pub async fn access(
    State(usecase): State<Arc<Service>>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<AccessDecision>, ApiError> {
    let decision = usecase.can_view_post(auth.user_id, post_id).await?;
    Ok(Json(decision))
}
