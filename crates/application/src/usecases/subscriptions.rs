use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    entities::{
        earnings::NewCreatorEarning, notifications::NewNotification,
        subscriptions::NewSubscription, transactions::NewTransaction,
    },
    repositories::{
        earnings::EarningRepository, ledger::LedgerRepository,
        notifications::NotificationRepository, subscriptions::SubscriptionRepository,
        transactions::TransactionRepository,
    },
    value_objects::{
        enums::{
            earning_sources::EarningSource, notification_kinds::NotificationKind,
            payment_rails::PaymentRail, transaction_types::TransactionType,
        },
        fees,
        stars::{PaymentReference, StarsInvoiceRequest},
    },
};

use crate::gateways::{host::HostBridge, stars::StarsGateway};

use super::{
    PaymentError, PaymentOutcome, PaymentResult, collect_stars_payment, dispatch_notification,
};

/// Subscriptions run on fixed 30-day periods; renewal upserts the same row
/// with a fresh `expires_at`.
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

pub struct SubscriptionPaymentUseCase<L, S, E, T, N, G>
where
    L: LedgerRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NotificationRepository + Send + Sync + 'static,
    G: StarsGateway + 'static,
{
    ledger: Arc<L>,
    subscription_repo: Arc<S>,
    earning_repo: Arc<E>,
    transaction_repo: Arc<T>,
    notification_repo: Arc<N>,
    stars: Arc<G>,
    host: Arc<dyn HostBridge>,
}

impl<L, S, E, T, N, G> SubscriptionPaymentUseCase<L, S, E, T, N, G>
where
    L: LedgerRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NotificationRepository + Send + Sync + 'static,
    G: StarsGateway + 'static,
{
    pub fn new(
        ledger: Arc<L>,
        subscription_repo: Arc<S>,
        earning_repo: Arc<E>,
        transaction_repo: Arc<T>,
        notification_repo: Arc<N>,
        stars: Arc<G>,
        host: Arc<dyn HostBridge>,
    ) -> Self {
        Self {
            ledger,
            subscription_repo,
            earning_repo,
            transaction_repo,
            notification_repo,
            stars,
            host,
        }
    }

    pub async fn process_subscription_payment(
        &self,
        subscriber: Uuid,
        creator: Uuid,
        price: i64,
        rail: PaymentRail,
    ) -> PaymentResult<PaymentOutcome> {
        info!(
            %subscriber,
            %creator,
            price,
            rail = %rail,
            "subscriptions: payment requested"
        );

        if subscriber == creator {
            return Err(PaymentError::Unauthorized {
                message: "you cannot subscribe to yourself".to_string(),
            });
        }
        if price < 0 {
            return Err(PaymentError::InvalidAmount);
        }

        let existing = self
            .subscription_repo
            .find_active(subscriber, creator)
            .await
            .map_err(|err| {
                error!(
                    %subscriber,
                    %creator,
                    db_error = ?err,
                    "subscriptions: failed to load current subscription"
                );
                PaymentError::Internal(err)
            })?;
        if existing.is_some() {
            info!(%subscriber, %creator, "subscriptions: already active, nothing to pay");
            return Ok(PaymentOutcome::short_circuit());
        }

        // Free tier: record the subscription, never touch the ledger.
        if price == 0 {
            self.upsert_subscription(subscriber, creator, 0).await?;
            self.notify_creator(subscriber, creator);
            return Ok(PaymentOutcome::short_circuit());
        }

        match rail {
            PaymentRail::Tokens => {
                let receipt = self.ledger.subscribe(subscriber, creator, price).await?;
                info!(
                    %subscriber,
                    %creator,
                    transaction_id = %receipt.transaction_id,
                    "subscriptions: token payment settled"
                );
                self.notify_creator(subscriber, creator);
                Ok(PaymentOutcome::recorded(receipt.transaction_id))
            }
            PaymentRail::Stars => {
                collect_stars_payment(
                    &self.stars,
                    &self.host,
                    StarsInvoiceRequest {
                        payer_id: subscriber,
                        payee_id: creator,
                        amount: price,
                        reference: PaymentReference::Subscription(creator),
                        description: format!("Subscription ({} tokens)", price),
                    },
                )
                .await?;
                self.settle_stars_subscription(subscriber, creator, price)
                    .await
            }
        }
    }

    /// Post-payment settlement for the stars rail: subscription upsert,
    /// creator payout, audit rows, notification. Runs only after
    /// `collect_stars_payment` reports the invoice as paid.
    ///
    /// A failed write here is NOT compensated: the provider payment stands
    /// and reconciliation happens out-of-band.
    pub async fn settle_stars_subscription(
        &self,
        subscriber: Uuid,
        creator: Uuid,
        price: i64,
    ) -> PaymentResult<PaymentOutcome> {
        let subscription_id = match self.upsert_subscription(subscriber, creator, price).await {
            Ok(id) => id,
            Err(err) => {
                error!(
                    %subscriber,
                    %creator,
                    price,
                    "subscriptions: stars payment succeeded but subscription write failed; \
                     NOT refunded, needs reconciliation"
                );
                return Err(err);
            }
        };

        let share = fees::creator_share(price);
        self.ledger
            .credit(creator, share, "subscription payout")
            .await
            .map_err(|err| {
                error!(
                    %subscriber,
                    %creator,
                    share,
                    error = ?err,
                    "subscriptions: creator payout failed after stars payment; \
                     NOT refunded, needs reconciliation"
                );
                PaymentError::RecordWriteFailed { stage: "payout" }
            })?;

        if let Err(err) = self
            .earning_repo
            .record_earning(NewCreatorEarning {
                creator_id: creator,
                amount: price,
                source_type: EarningSource::Subscription.to_string(),
                source_id: subscription_id,
                from_user_id: subscriber,
                platform_fee: price - share,
                net_amount: share,
            })
            .await
        {
            warn!(%creator, db_error = ?err, "subscriptions: earnings row insert failed");
        }

        let transaction_id = match self
            .transaction_repo
            .record(NewTransaction {
                user_id: subscriber,
                amount: -price,
                transaction_type: TransactionType::Subscription.to_string(),
                status: "completed".to_string(),
                description: Some(format!("Subscription to creator {} (stars)", creator)),
            })
            .await
        {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(%subscriber, db_error = ?err, "subscriptions: audit row insert failed");
                None
            }
        };

        self.notify_creator(subscriber, creator);

        Ok(PaymentOutcome { transaction_id })
    }

    async fn upsert_subscription(
        &self,
        subscriber: Uuid,
        creator: Uuid,
        price_paid: i64,
    ) -> PaymentResult<Uuid> {
        self.subscription_repo
            .upsert(NewSubscription {
                subscriber_id: subscriber,
                creator_id: creator,
                price_paid,
                is_active: true,
                expires_at: Utc::now() + Duration::days(SUBSCRIPTION_PERIOD_DAYS),
            })
            .await
            .map_err(|err| {
                error!(
                    %subscriber,
                    %creator,
                    db_error = ?err,
                    "subscriptions: subscription upsert failed"
                );
                PaymentError::RecordWriteFailed {
                    stage: "subscription",
                }
            })
    }

    fn notify_creator(&self, subscriber: Uuid, creator: Uuid) {
        dispatch_notification(
            &self.notification_repo,
            NewNotification {
                user_id: creator,
                kind: NotificationKind::NewSubscriber,
                actor_id: Some(subscriber),
                subject_id: None,
                body: "You have a new subscriber".to_string(),
            },
        );
    }
}
