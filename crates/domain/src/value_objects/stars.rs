use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a Stars payment is for. Serialized into the invoice payload so the
/// provider webhook can settle the right domain row later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum PaymentReference {
    /// Creator being subscribed to.
    Subscription(Uuid),
    Post(Uuid),
    Livestream(Uuid),
    /// Tip recipient.
    Tip(Uuid),
}

/// Ephemeral request for the invoice-creation endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StarsInvoiceRequest {
    pub payer_id: Uuid,
    pub payee_id: Uuid,
    pub amount: i64,
    pub reference: PaymentReference,
    pub description: String,
}

/// Provider response: where to send the user, and the provider-side
/// transaction id (distinct from our `transactions` rows).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StarsInvoice {
    pub invoice_url: String,
    pub provider_transaction_id: String,
}

/// Invoice lifecycle as reported by the host payment sheet.
/// `Pending` is non-terminal and may be observed any number of times.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Cancelled,
    Failed,
    Pending,
}

impl InvoiceStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvoiceStatus::Pending)
    }
}
