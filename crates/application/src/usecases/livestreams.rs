use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    entities::{
        earnings::NewCreatorEarning,
        livestreams::{LivestreamEntity, NewLivestreamTicket},
        notifications::NewNotification,
        transactions::NewTransaction,
    },
    repositories::{
        earnings::EarningRepository, ledger::LedgerRepository, livestreams::LivestreamRepository,
        notifications::NotificationRepository, transactions::TransactionRepository,
    },
    value_objects::{
        access::{AccessDecision, DenyReason},
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

/// What the gate evaluator hands back when entry is allowed: the channel the
/// viewer should join. Denials carry the price so the UI can render the
/// ticket prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct LivestreamAccess {
    pub decision: AccessDecision,
    pub channel_name: Option<String>,
}

pub struct LivestreamTicketUseCase<L, V, E, T, N, G>
where
    L: LedgerRepository + Send + Sync + 'static,
    V: LivestreamRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NotificationRepository + Send + Sync + 'static,
    G: StarsGateway + 'static,
{
    ledger: Arc<L>,
    livestream_repo: Arc<V>,
    earning_repo: Arc<E>,
    transaction_repo: Arc<T>,
    notification_repo: Arc<N>,
    stars: Arc<G>,
    host: Arc<dyn HostBridge>,
}

impl<L, V, E, T, N, G> LivestreamTicketUseCase<L, V, E, T, N, G>
where
    L: LedgerRepository + Send + Sync + 'static,
    V: LivestreamRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NotificationRepository + Send + Sync + 'static,
    G: StarsGateway + 'static,
{
    pub fn new(
        ledger: Arc<L>,
        livestream_repo: Arc<V>,
        earning_repo: Arc<E>,
        transaction_repo: Arc<T>,
        notification_repo: Arc<N>,
        stars: Arc<G>,
        host: Arc<dyn HostBridge>,
    ) -> Self {
        Self {
            ledger,
            livestream_repo,
            earning_repo,
            transaction_repo,
            notification_repo,
            stars,
            host,
        }
    }

    pub async fn process_livestream_ticket(
        &self,
        viewer: Uuid,
        livestream_id: Uuid,
        rail: PaymentRail,
    ) -> PaymentResult<PaymentOutcome> {
        info!(%viewer, %livestream_id, rail = %rail, "livestreams: ticket requested");

        let stream = self.load_livestream(livestream_id).await?;

        if stream.creator_id == viewer {
            return Ok(PaymentOutcome::short_circuit());
        }

        let holds_ticket = self
            .livestream_repo
            .has_ticket(livestream_id, viewer)
            .await
            .map_err(PaymentError::Internal)?;
        if holds_ticket {
            info!(%viewer, %livestream_id, "livestreams: ticket already held");
            return Ok(PaymentOutcome::short_circuit());
        }

        if stream.entry_price == 0 {
            return Ok(PaymentOutcome::short_circuit());
        }

        match rail {
            PaymentRail::Tokens => {
                let receipt = self
                    .ledger
                    .buy_ticket(viewer, livestream_id, stream.entry_price)
                    .await?;
                info!(
                    %viewer,
                    %livestream_id,
                    transaction_id = %receipt.transaction_id,
                    "livestreams: token payment settled"
                );
                self.notify_creator(viewer, &stream);
                Ok(PaymentOutcome::recorded(receipt.transaction_id))
            }
            PaymentRail::Stars => {
                collect_stars_payment(
                    &self.stars,
                    &self.host,
                    StarsInvoiceRequest {
                        payer_id: viewer,
                        payee_id: stream.creator_id,
                        amount: stream.entry_price,
                        reference: PaymentReference::Livestream(livestream_id),
                        description: format!(
                            "Livestream ticket ({} tokens)",
                            stream.entry_price
                        ),
                    },
                )
                .await?;
                self.settle_stars_ticket(viewer, &stream).await
            }
        }
    }

    /// Stars-rail settlement. Tickets use the ceil fee schedule, not the
    /// flat creator share: fee is rounded up, the creator gets the
    /// remainder.
    pub async fn settle_stars_ticket(
        &self,
        viewer: Uuid,
        stream: &LivestreamEntity,
    ) -> PaymentResult<PaymentOutcome> {
        self.livestream_repo
            .record_ticket(NewLivestreamTicket {
                livestream_id: stream.id,
                user_id: viewer,
                amount: stream.entry_price,
            })
            .await
            .map_err(|err| {
                error!(
                    %viewer,
                    livestream_id = %stream.id,
                    db_error = ?err,
                    "livestreams: stars payment succeeded but ticket write failed; \
                     NOT refunded, needs reconciliation"
                );
                PaymentError::RecordWriteFailed { stage: "ticket" }
            })?;

        let fee = fees::ticket_fee(stream.entry_price);
        let net = fees::ticket_net(stream.entry_price);
        self.ledger
            .credit(stream.creator_id, net, "livestream ticket payout")
            .await
            .map_err(|err| {
                error!(
                    creator_id = %stream.creator_id,
                    net,
                    error = ?err,
                    "livestreams: creator payout failed after stars payment; \
                     NOT refunded, needs reconciliation"
                );
                PaymentError::RecordWriteFailed { stage: "payout" }
            })?;

        if let Err(err) = self
            .earning_repo
            .record_earning(NewCreatorEarning {
                creator_id: stream.creator_id,
                amount: stream.entry_price,
                source_type: EarningSource::LivestreamTicket.to_string(),
                source_id: stream.id,
                from_user_id: viewer,
                platform_fee: fee,
                net_amount: net,
            })
            .await
        {
            warn!(creator_id = %stream.creator_id, db_error = ?err, "livestreams: earnings row insert failed");
        }

        let transaction_id = match self
            .transaction_repo
            .record(NewTransaction {
                user_id: viewer,
                amount: -stream.entry_price,
                transaction_type: TransactionType::LivestreamTicket.to_string(),
                status: "completed".to_string(),
                description: Some(format!("Ticket for livestream {} (stars)", stream.id)),
            })
            .await
        {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(%viewer, db_error = ?err, "livestreams: audit row insert failed");
                None
            }
        };

        self.notify_creator(viewer, stream);

        Ok(PaymentOutcome { transaction_id })
    }

    /// Read-only entry gate. The channel name only leaves this layer when
    /// entry is allowed.
    pub async fn get_livestream_access(
        &self,
        viewer: Uuid,
        livestream_id: Uuid,
    ) -> PaymentResult<LivestreamAccess> {
        let stream = self.load_livestream(livestream_id).await?;

        if stream.creator_id == viewer || stream.entry_price == 0 {
            return Ok(LivestreamAccess {
                decision: AccessDecision::granted(),
                channel_name: Some(stream.channel_name),
            });
        }

        let holds_ticket = self
            .livestream_repo
            .has_ticket(livestream_id, viewer)
            .await
            .map_err(PaymentError::Internal)?;
        if holds_ticket {
            return Ok(LivestreamAccess {
                decision: AccessDecision::granted(),
                channel_name: Some(stream.channel_name),
            });
        }

        Ok(LivestreamAccess {
            decision: AccessDecision::denied(DenyReason::TicketRequired {
                price: stream.entry_price,
            }),
            channel_name: None,
        })
    }

    async fn load_livestream(&self, livestream_id: Uuid) -> PaymentResult<LivestreamEntity> {
        self.livestream_repo
            .find_livestream(livestream_id)
            .await
            .map_err(PaymentError::Internal)?
            .ok_or_else(|| PaymentError::NotFound {
                what: "livestream".to_string(),
            })
    }

    fn notify_creator(&self, viewer: Uuid, stream: &LivestreamEntity) {
        dispatch_notification(
            &self.notification_repo,
            NewNotification {
                user_id: stream.creator_id,
                kind: NotificationKind::TicketPurchased,
                actor_id: Some(viewer),
                subject_id: Some(stream.id),
                body: "Someone bought a ticket to your stream".to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::{
        earnings::MockEarningRepository,
        ledger::{LedgerReceipt, MockLedgerRepository},
        livestreams::MockLivestreamRepository,
        notifications::MockNotificationRepository,
        transactions::MockTransactionRepository,
    };

    use crate::gateways::{host::MockHostBridge, stars::MockStarsGateway};

    fn sample_stream(creator_id: Uuid, entry_price: i64) -> LivestreamEntity {
        LivestreamEntity {
            id: Uuid::new_v4(),
            creator_id,
            entry_price,
            is_live: true,
            channel_name: "stream_abc123".to_string(),
        }
    }

    struct Mocks {
        ledger: MockLedgerRepository,
        livestream_repo: MockLivestreamRepository,
        earning_repo: MockEarningRepository,
        transaction_repo: MockTransactionRepository,
        stars: MockStarsGateway,
        host: MockHostBridge,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                ledger: MockLedgerRepository::new(),
                livestream_repo: MockLivestreamRepository::new(),
                earning_repo: MockEarningRepository::new(),
                transaction_repo: MockTransactionRepository::new(),
                stars: MockStarsGateway::new(),
                host: MockHostBridge::new(),
            }
        }

        fn build(
            self,
        ) -> LivestreamTicketUseCase<
            MockLedgerRepository,
            MockLivestreamRepository,
            MockEarningRepository,
            MockTransactionRepository,
            MockNotificationRepository,
            MockStarsGateway,
        > {
            let mut notification_repo = MockNotificationRepository::new();
            notification_repo
                .expect_insert()
                .returning(|_| Box::pin(async { Ok(()) }));

            LivestreamTicketUseCase::new(
                Arc::new(self.ledger),
                Arc::new(self.livestream_repo),
                Arc::new(self.earning_repo),
                Arc::new(self.transaction_repo),
                Arc::new(notification_repo),
                Arc::new(self.stars),
                Arc::new(self.host),
            )
        }
    }

    #[tokio::test]
    async fn free_stream_needs_no_ticket() {
        let viewer = Uuid::new_v4();
        let stream = sample_stream(Uuid::new_v4(), 0);
        let stream_id = stream.id;

        let mut mocks = Mocks::new();
        mocks
            .livestream_repo
            .expect_find_livestream()
            .returning(move |_| {
                let stream = stream.clone();
                Box::pin(async move { Ok(Some(stream)) })
            });
        mocks
            .livestream_repo
            .expect_has_ticket()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let outcome = mocks
            .build()
            .process_livestream_ticket(viewer, stream_id, PaymentRail::Tokens)
            .await
            .unwrap();

        assert_eq!(outcome.transaction_id, None);
    }

    #[tokio::test]
    async fn token_ticket_goes_through_atomic_procedure() {
        let viewer = Uuid::new_v4();
        let stream = sample_stream(Uuid::new_v4(), 99);
        let stream_id = stream.id;
        let transaction_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks
            .livestream_repo
            .expect_find_livestream()
            .returning(move |_| {
                let stream = stream.clone();
                Box::pin(async move { Ok(Some(stream)) })
            });
        mocks
            .livestream_repo
            .expect_has_ticket()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        mocks
            .ledger
            .expect_buy_ticket()
            .withf(move |v, s, price| *v == viewer && *s == stream_id && *price == 99)
            .returning(move |_, _, _| {
                Box::pin(async move { Ok(LedgerReceipt { transaction_id }) })
            });

        let outcome = mocks
            .build()
            .process_livestream_ticket(viewer, stream_id, PaymentRail::Tokens)
            .await
            .unwrap();

        assert_eq!(outcome.transaction_id, Some(transaction_id));
    }

    #[tokio::test]
    async fn stars_ticket_splits_price_with_ceil_fee() {
        let viewer = Uuid::new_v4();
        let stream = sample_stream(Uuid::new_v4(), 99);
        let creator = stream.creator_id;
        let stream_id = stream.id;
        let transaction_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks
            .livestream_repo
            .expect_record_ticket()
            .withf(move |ticket| {
                ticket.livestream_id == stream_id
                    && ticket.user_id == viewer
                    && ticket.amount == 99
            })
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));
        // 99 tokens: fee rounds up to 10, creator keeps 89.
        mocks
            .ledger
            .expect_credit()
            .withf(move |user, amount, _| *user == creator && *amount == 89)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        mocks
            .earning_repo
            .expect_record_earning()
            .withf(|earning| {
                earning.amount == 99 && earning.platform_fee == 10 && earning.net_amount == 89
            })
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));
        mocks
            .transaction_repo
            .expect_record()
            .withf(|tx| tx.amount == -99)
            .returning(move |_| Box::pin(async move { Ok(transaction_id) }));

        let outcome = mocks
            .build()
            .settle_stars_ticket(viewer, &stream)
            .await
            .unwrap();

        assert_eq!(outcome.transaction_id, Some(transaction_id));
    }

    #[tokio::test]
    async fn ticket_write_failure_is_not_refunded() {
        let viewer = Uuid::new_v4();
        let stream = sample_stream(Uuid::new_v4(), 50);

        let mut mocks = Mocks::new();
        mocks
            .livestream_repo
            .expect_record_ticket()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("connection reset")) }));
        // No credit expectation on the ledger mock: any payout or refund
        // attempt would panic the test.

        let err = mocks
            .build()
            .settle_stars_ticket(viewer, &stream)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::RecordWriteFailed { stage: "ticket" }
        ));
    }

    #[tokio::test]
    async fn ticket_holder_gets_channel_name() {
        let viewer = Uuid::new_v4();
        let stream = sample_stream(Uuid::new_v4(), 50);
        let stream_id = stream.id;

        let mut mocks = Mocks::new();
        mocks
            .livestream_repo
            .expect_find_livestream()
            .returning(move |_| {
                let stream = stream.clone();
                Box::pin(async move { Ok(Some(stream)) })
            });
        mocks
            .livestream_repo
            .expect_has_ticket()
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let access = mocks
            .build()
            .get_livestream_access(viewer, stream_id)
            .await
            .unwrap();

        assert!(access.decision.allowed);
        assert_eq!(access.channel_name.as_deref(), Some("stream_abc123"));
    }

    #[tokio::test]
    async fn priced_stream_without_ticket_withholds_channel() {
        let viewer = Uuid::new_v4();
        let stream = sample_stream(Uuid::new_v4(), 50);
        let stream_id = stream.id;

        let mut mocks = Mocks::new();
        mocks
            .livestream_repo
            .expect_find_livestream()
            .returning(move |_| {
                let stream = stream.clone();
                Box::pin(async move { Ok(Some(stream)) })
            });
        mocks
            .livestream_repo
            .expect_has_ticket()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let access = mocks
            .build()
            .get_livestream_access(viewer, stream_id)
            .await
            .unwrap();

        assert_eq!(
            access.decision,
            AccessDecision::denied(DenyReason::TicketRequired { price: 50 })
        );
        assert_eq!(access.channel_name, None);
    }
}
