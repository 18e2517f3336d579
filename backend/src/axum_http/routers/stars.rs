use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use application::gateways::stars::StarsGateway;
use application::usecases::PaymentError;
use domain::value_objects::stars::{PaymentReference, StarsInvoiceRequest};
use infra::stars::invoice_client::StarsInvoiceClient;
use infra::supabase::client::SupabaseClient;

use crate::auth::AuthUser;
use crate::axum_http::error_responses::ApiError;

/// Raw invoice pair for clients that drive the payment sheet themselves,
/// mirroring the provider calls the orchestrators make internally.
pub fn routes(supabase: Arc<SupabaseClient>) -> Router {
    let stars = StarsInvoiceClient::new(supabase);

    Router::new()
        .route("/invoice", post(create_invoice))
        .route("/confirm", post(confirm))
        .with_state(Arc::new(stars))
}

#[derive(Debug, Deserialize)]
pub struct InvoiceRequest {
    pub payee_id: Uuid,
    pub amount: i64,
    pub reference: PaymentReference,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub invoice_url: String,
    pub provider_transaction_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub provider_transaction_id: String,
}

pub async fn create_invoice(
    State(stars): State<Arc<StarsInvoiceClient>>,
    auth: AuthUser,
    Json(body): Json<InvoiceRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    if body.amount <= 0 {
        return Err(PaymentError::InvalidAmount.into());
    }

    let invoice = stars
        .create_invoice(StarsInvoiceRequest {
            payer_id: auth.user_id,
            payee_id: body.payee_id,
            amount: body.amount,
            reference: body.reference,
            description: body.description,
        })
        .await
        .map_err(|err| PaymentError::InvoiceCreationFailed {
            message: err.to_string(),
        })?;

    Ok(Json(InvoiceResponse {
        invoice_url: invoice.invoice_url,
        provider_transaction_id: invoice.provider_transaction_id,
    }))
}

pub async fn confirm(
    State(stars): State<Arc<StarsInvoiceClient>>,
    _auth: AuthUser,
    Json(body): Json<ConfirmRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    stars
        .confirm_payment(&body.provider_transaction_id)
        .await
        .map_err(PaymentError::Internal)?;

    Ok(Json(serde_json::json!({ "confirmed": true })))
}
