use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use application::gateways::host::HostBridge;
use application::gateways::stars::StarsGateway;
use domain::value_objects::stars::{InvoiceStatus, StarsInvoice};

/// Server-side host bridge: the payment sheet runs on the user's device, so
/// this implementation observes its outcome by polling the provider until
/// the invoice reaches a terminal status.
pub struct PollingHostBridge<G>
where
    G: StarsGateway + 'static,
{
    stars: Arc<G>,
    interval: Duration,
    max_attempts: u32,
}

impl<G> PollingHostBridge<G>
where
    G: StarsGateway + 'static,
{
    pub fn new(stars: Arc<G>, interval: Duration, max_attempts: u32) -> Self {
        Self {
            stars,
            interval,
            max_attempts,
        }
    }
}

#[async_trait]
impl<G> HostBridge for PollingHostBridge<G>
where
    G: StarsGateway + 'static,
{
    async fn open_invoice(&self, invoice: &StarsInvoice) -> Result<InvoiceStatus> {
        for attempt in 1..=self.max_attempts {
            let status = self
                .stars
                .invoice_status(&invoice.provider_transaction_id)
                .await?;
            if status.is_terminal() {
                return Ok(status);
            }
            debug!(
                provider_transaction_id = %invoice.provider_transaction_id,
                attempt,
                "stars: invoice still pending"
            );
            tokio::time::sleep(self.interval).await;
        }

        anyhow::bail!(
            "stars invoice {} still pending after {} polls",
            invoice.provider_transaction_id,
            self.max_attempts
        )
    }
}
