use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use domain::value_objects::stars::{InvoiceStatus, StarsInvoice};

/// Injected capability interface over the host environment's native payment
/// sheet, replacing ambient host-object access so tests can substitute a
/// fake.
#[async_trait]
#[automock]
pub trait HostBridge: Send + Sync {
    /// Hand the invoice to the host payment sheet and resolve once with a
    /// terminal status. Implementations absorb any number of `pending`
    /// observations before the terminal one.
    async fn open_invoice(&self, invoice: &StarsInvoice) -> Result<InvoiceStatus>;
}
