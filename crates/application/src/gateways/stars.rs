use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use domain::value_objects::stars::{InvoiceStatus, StarsInvoice, StarsInvoiceRequest};

/// Client for the Stars invoice provider (the secondary payment rail).
///
/// Invoice lifecycle: CREATED -> (user interaction) -> PAID | CANCELLED |
/// FAILED. Creation and status live server-side at the provider; this layer
/// only requests and observes them.
#[async_trait]
#[automock]
pub trait StarsGateway: Send + Sync {
    async fn create_invoice(&self, request: StarsInvoiceRequest) -> Result<StarsInvoice>;

    /// Best-effort confirmation after the sheet reports `paid`. Callers log
    /// and swallow failures; final truth is reconciled by the provider's
    /// out-of-band webhook.
    async fn confirm_payment(&self, provider_transaction_id: &str) -> Result<()>;

    /// Current provider-side status of an invoice, for polling bridges.
    async fn invoice_status(&self, provider_transaction_id: &str) -> Result<InvoiceStatus>;
}
