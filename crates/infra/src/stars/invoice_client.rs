use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use application::gateways::stars::StarsGateway;
use domain::value_objects::stars::{InvoiceStatus, StarsInvoice, StarsInvoiceRequest};

use crate::supabase::client::SupabaseClient;

/// Stars gateway backed by the `payments` Edge Function, which holds the bot
/// token and talks to the Telegram Bot API on our behalf.
pub struct StarsInvoiceClient {
    client: Arc<SupabaseClient>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: InvoiceStatus,
}

impl StarsInvoiceClient {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StarsGateway for StarsInvoiceClient {
    async fn create_invoice(&self, request: StarsInvoiceRequest) -> Result<StarsInvoice> {
        self.client
            .function(
                "payments",
                &json!({
                    "action": "create_invoice",
                    "payer_id": request.payer_id,
                    "payee_id": request.payee_id,
                    "amount": request.amount,
                    "reference": request.reference,
                    "description": request.description,
                }),
                "create stars invoice",
            )
            .await
    }

    async fn confirm_payment(&self, provider_transaction_id: &str) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .function(
                "payments",
                &json!({
                    "action": "confirm_payment",
                    "provider_transaction_id": provider_transaction_id,
                }),
                "confirm stars payment",
            )
            .await?;
        Ok(())
    }

    async fn invoice_status(&self, provider_transaction_id: &str) -> Result<InvoiceStatus> {
        let response: StatusResponse = self
            .client
            .function(
                "payments",
                &json!({
                    "action": "check_status",
                    "provider_transaction_id": provider_transaction_id,
                }),
                "check stars invoice status",
            )
            .await?;
        Ok(response.status)
    }
}
