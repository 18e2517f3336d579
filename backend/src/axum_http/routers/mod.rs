pub mod chat;
pub mod livestreams;
pub mod posts;
pub mod stars;
pub mod subscriptions;
pub mod wallet;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use application::gateways::host::HostBridge;
use application::usecases::PaymentOutcome;
use infra::stars::invoice_client::StarsInvoiceClient;
use infra::stars::polling_bridge::PollingHostBridge;

use crate::config::config_model::DotEnvyConfig;

/// Body returned by every payment endpoint. `transaction_id` is null when
/// the flow short-circuited.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub transaction_id: Option<Uuid>,
}

impl From<PaymentOutcome> for PaymentResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        Self {
            transaction_id: outcome.transaction_id,
        }
    }
}

pub(crate) fn host_bridge(
    stars: &Arc<StarsInvoiceClient>,
    config: &DotEnvyConfig,
) -> Arc<dyn HostBridge> {
    Arc::new(PollingHostBridge::new(
        Arc::clone(stars),
        Duration::from_millis(config.stars.poll_interval_ms),
        config.stars.poll_max_attempts,
    ))
}
