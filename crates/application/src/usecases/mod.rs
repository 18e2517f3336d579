pub mod chat;
pub mod content;
pub mod livestreams;
pub mod subscriptions;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use domain::{
    entities::notifications::NewNotification,
    repositories::{ledger::LedgerError, notifications::NotificationRepository},
    value_objects::stars::{InvoiceStatus, StarsInvoiceRequest},
};

use crate::gateways::{host::HostBridge, stars::StarsGateway};

/// Closed error taxonomy for every payment orchestrator. The human-readable
/// message is payload, never the discriminant. `Err` always means the payer
/// saw a no-op, with one documented exception: `RecordWriteFailed` on the
/// stars rail, where the provider payment already went through and is not
/// compensated by this layer (reconciled out-of-band).
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("already purchased")]
    DuplicatePurchase,

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("invoice creation failed: {message}")]
    InvoiceCreationFailed { message: String },

    #[error("payment cancelled")]
    PaymentCancelled,

    #[error("record write failed after payment: {stage}")]
    RecordWriteFailed { stage: &'static str },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<LedgerError> for PaymentError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance => PaymentError::InsufficientBalance,
            LedgerError::DuplicatePurchase => PaymentError::DuplicatePurchase,
            LedgerError::NotFound(what) => PaymentError::NotFound { what },
            LedgerError::Rejected(message) => PaymentError::Unauthorized { message },
            LedgerError::Backend(err) => PaymentError::Internal(err),
        }
    }
}

pub type PaymentResult<T> = Result<T, PaymentError>;

/// Success result of an orchestrator. `transaction_id` is absent when the
/// flow short-circuited (already purchased, free tier) or when the audit row
/// could not be resolved on the stars rail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentOutcome {
    pub transaction_id: Option<Uuid>,
}

impl PaymentOutcome {
    pub fn recorded(transaction_id: Uuid) -> Self {
        Self {
            transaction_id: Some(transaction_id),
        }
    }

    pub fn short_circuit() -> Self {
        Self {
            transaction_id: None,
        }
    }
}

/// Fire-and-forget notification insert. Dispatched after the core
/// transaction commits; never awaited for correctness, failures are logged
/// and swallowed.
pub(crate) fn dispatch_notification<N>(notification_repo: &Arc<N>, notification: NewNotification)
where
    N: NotificationRepository + Send + Sync + 'static,
{
    let notification_repo = Arc::clone(notification_repo);
    tokio::spawn(async move {
        let user_id = notification.user_id;
        if let Err(err) = notification_repo.insert(notification).await {
            warn!(
                %user_id,
                error = ?err,
                "payments: notification insert failed"
            );
        }
    });
}

/// Stars-rail collection: create the invoice, hand it to the host payment
/// sheet, and fire the best-effort confirmation once the sheet reports
/// `paid`. Returns the provider-side transaction id. No compensation is
/// required for failures here: nothing has been debited yet.
pub(crate) async fn collect_stars_payment<G>(
    stars: &Arc<G>,
    host: &Arc<dyn HostBridge>,
    request: StarsInvoiceRequest,
) -> PaymentResult<String>
where
    G: StarsGateway + 'static,
{
    let payer_id = request.payer_id;
    let invoice = stars.create_invoice(request).await.map_err(|err| {
        warn!(%payer_id, error = ?err, "payments: stars invoice creation failed");
        PaymentError::InvoiceCreationFailed {
            message: err.to_string(),
        }
    })?;

    match host.open_invoice(&invoice).await? {
        InvoiceStatus::Paid => {}
        InvoiceStatus::Cancelled | InvoiceStatus::Failed => {
            return Err(PaymentError::PaymentCancelled);
        }
        InvoiceStatus::Pending => {
            return Err(PaymentError::Internal(anyhow::anyhow!(
                "host bridge resolved with a non-terminal invoice status"
            )));
        }
    }

    let provider_transaction_id = invoice.provider_transaction_id.clone();
    let stars = Arc::clone(stars);
    let confirm_id = invoice.provider_transaction_id.clone();
    tokio::spawn(async move {
        if let Err(err) = stars.confirm_payment(&confirm_id).await {
            warn!(
                provider_transaction_id = %confirm_id,
                error = ?err,
                "payments: stars confirmation failed; provider webhook will reconcile"
            );
        }
    });

    Ok(provider_transaction_id)
}
