use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    entities::{
        earnings::NewCreatorEarning, notifications::NewNotification,
        transactions::NewTransaction,
    },
    repositories::{
        earnings::EarningRepository, ledger::LedgerRepository,
        notifications::NotificationRepository, transactions::TransactionRepository,
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

/// In-conversation money movement: tips, catalogued gifts, and pay-per-view
/// message unlocks. Tips ride either rail; gifts and PPV are token-only.
pub struct ChatPaymentUseCase<L, E, T, N, G>
where
    L: LedgerRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NotificationRepository + Send + Sync + 'static,
    G: StarsGateway + 'static,
{
    ledger: Arc<L>,
    earning_repo: Arc<E>,
    transaction_repo: Arc<T>,
    notification_repo: Arc<N>,
    stars: Arc<G>,
    host: Arc<dyn HostBridge>,
}

impl<L, E, T, N, G> ChatPaymentUseCase<L, E, T, N, G>
where
    L: LedgerRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NotificationRepository + Send + Sync + 'static,
    G: StarsGateway + 'static,
{
    pub fn new(
        ledger: Arc<L>,
        earning_repo: Arc<E>,
        transaction_repo: Arc<T>,
        notification_repo: Arc<N>,
        stars: Arc<G>,
        host: Arc<dyn HostBridge>,
    ) -> Self {
        Self {
            ledger,
            earning_repo,
            transaction_repo,
            notification_repo,
            stars,
            host,
        }
    }

    pub async fn process_tip(
        &self,
        sender: Uuid,
        recipient: Uuid,
        amount: i64,
        rail: PaymentRail,
    ) -> PaymentResult<PaymentOutcome> {
        info!(%sender, %recipient, amount, rail = %rail, "chat: tip requested");

        if amount <= 0 {
            return Err(PaymentError::InvalidAmount);
        }
        if sender == recipient {
            return Err(PaymentError::Unauthorized {
                message: "cannot tip yourself".to_string(),
            });
        }

        match rail {
            PaymentRail::Tokens => {
                let receipt = self.ledger.send_tip(sender, recipient, amount).await?;
                info!(
                    %sender,
                    %recipient,
                    transaction_id = %receipt.transaction_id,
                    "chat: token tip settled"
                );
                self.notify(recipient, sender, NotificationKind::TipReceived, None);
                Ok(PaymentOutcome::recorded(receipt.transaction_id))
            }
            PaymentRail::Stars => {
                collect_stars_payment(
                    &self.stars,
                    &self.host,
                    StarsInvoiceRequest {
                        payer_id: sender,
                        payee_id: recipient,
                        amount,
                        reference: PaymentReference::Tip(recipient),
                        description: format!("Tip ({} tokens)", amount),
                    },
                )
                .await?;
                self.settle_stars_tip(sender, recipient, amount).await
            }
        }
    }

    /// Stars-rail settlement. Tips have no domain row of their own, so the
    /// audit transaction doubles as the record step and its id seeds the
    /// earnings row.
    pub async fn settle_stars_tip(
        &self,
        sender: Uuid,
        recipient: Uuid,
        amount: i64,
    ) -> PaymentResult<PaymentOutcome> {
        let transaction_id = self
            .transaction_repo
            .record(NewTransaction {
                user_id: sender,
                amount: -amount,
                transaction_type: TransactionType::Tip.to_string(),
                status: "completed".to_string(),
                description: Some(format!("Tip to {} (stars)", recipient)),
            })
            .await
            .map_err(|err| {
                error!(
                    %sender,
                    %recipient,
                    db_error = ?err,
                    "chat: stars payment succeeded but tip record failed; \
                     NOT refunded, needs reconciliation"
                );
                PaymentError::RecordWriteFailed {
                    stage: "transaction",
                }
            })?;

        let share = fees::tip_share(amount);
        self.ledger
            .credit(recipient, share, "tip payout")
            .await
            .map_err(|err| {
                error!(
                    %recipient,
                    share,
                    error = ?err,
                    "chat: tip payout failed after stars payment; \
                     NOT refunded, needs reconciliation"
                );
                PaymentError::RecordWriteFailed { stage: "payout" }
            })?;

        if let Err(err) = self
            .earning_repo
            .record_earning(NewCreatorEarning {
                creator_id: recipient,
                amount,
                source_type: EarningSource::Tip.to_string(),
                source_id: transaction_id,
                from_user_id: sender,
                platform_fee: amount - share,
                net_amount: share,
            })
            .await
        {
            warn!(%recipient, db_error = ?err, "chat: earnings row insert failed");
        }

        self.notify(recipient, sender, NotificationKind::TipReceived, None);

        Ok(PaymentOutcome::recorded(transaction_id))
    }

    /// Gifts are token-only; the catalogue price is validated server-side by
    /// the stored procedure against the gift row.
    pub async fn send_gift(
        &self,
        sender: Uuid,
        recipient: Uuid,
        conversation_id: Uuid,
        gift_id: Uuid,
        price: i64,
    ) -> PaymentResult<PaymentOutcome> {
        info!(%sender, %recipient, %gift_id, price, "chat: gift requested");

        if price <= 0 {
            return Err(PaymentError::InvalidAmount);
        }
        if sender == recipient {
            return Err(PaymentError::Unauthorized {
                message: "cannot send a gift to yourself".to_string(),
            });
        }

        let receipt = self
            .ledger
            .send_gift(sender, recipient, conversation_id, gift_id, price)
            .await?;
        info!(
            %sender,
            %recipient,
            transaction_id = %receipt.transaction_id,
            "chat: gift settled"
        );

        self.notify(
            recipient,
            sender,
            NotificationKind::GiftReceived,
            Some(gift_id),
        );

        Ok(PaymentOutcome::recorded(receipt.transaction_id))
    }

    /// Pay-per-view message unlock, token-only. Repeat unlocks surface as
    /// `DuplicatePurchase` from the stored procedure; no notification is
    /// sent, the unlock is visible in the conversation itself.
    pub async fn unlock_ppv(&self, message_id: Uuid, user_id: Uuid) -> PaymentResult<PaymentOutcome> {
        info!(%user_id, %message_id, "chat: ppv unlock requested");

        let receipt = self.ledger.unlock_ppv(message_id, user_id).await?;
        info!(
            %user_id,
            %message_id,
            transaction_id = %receipt.transaction_id,
            "chat: ppv unlock settled"
        );

        Ok(PaymentOutcome::recorded(receipt.transaction_id))
    }

    fn notify(&self, user_id: Uuid, actor_id: Uuid, kind: NotificationKind, subject_id: Option<Uuid>) {
        let body = match kind {
            NotificationKind::TipReceived => "You received a tip",
            NotificationKind::GiftReceived => "You received a gift",
            _ => "You have a new notification",
        };
        dispatch_notification(
            &self.notification_repo,
            NewNotification {
                user_id,
                kind,
                actor_id: Some(actor_id),
                subject_id,
                body: body.to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::{
        earnings::MockEarningRepository,
        ledger::{LedgerError, LedgerReceipt, MockLedgerRepository},
        notifications::MockNotificationRepository,
        transactions::MockTransactionRepository,
    };

    use crate::gateways::{host::MockHostBridge, stars::MockStarsGateway};

    struct Mocks {
        ledger: MockLedgerRepository,
        earning_repo: MockEarningRepository,
        transaction_repo: MockTransactionRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                ledger: MockLedgerRepository::new(),
                earning_repo: MockEarningRepository::new(),
                transaction_repo: MockTransactionRepository::new(),
            }
        }

        fn build(
            self,
        ) -> ChatPaymentUseCase<
            MockLedgerRepository,
            MockEarningRepository,
            MockTransactionRepository,
            MockNotificationRepository,
            MockStarsGateway,
        > {
            let mut notification_repo = MockNotificationRepository::new();
            notification_repo
                .expect_insert()
                .returning(|_| Box::pin(async { Ok(()) }));

            ChatPaymentUseCase::new(
                Arc::new(self.ledger),
                Arc::new(self.earning_repo),
                Arc::new(self.transaction_repo),
                Arc::new(notification_repo),
                Arc::new(MockStarsGateway::new()),
                Arc::new(MockHostBridge::new()),
            )
        }
    }

    #[tokio::test]
    async fn zero_tip_is_rejected_before_the_ledger() {
        let err = Mocks::new()
            .build()
            .process_tip(Uuid::new_v4(), Uuid::new_v4(), 0, PaymentRail::Tokens)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidAmount));
    }

    #[tokio::test]
    async fn self_tip_is_rejected() {
        let user = Uuid::new_v4();

        let err = Mocks::new()
            .build()
            .process_tip(user, user, 30, PaymentRail::Tokens)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn token_tip_settles_through_atomic_procedure() {
        let sender = Uuid::new_v4();
        let recipient = Uuid::new_v4();
        let transaction_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks
            .ledger
            .expect_send_tip()
            .withf(move |s, r, amount| *s == sender && *r == recipient && *amount == 30)
            .returning(move |_, _, _| {
                Box::pin(async move { Ok(LedgerReceipt { transaction_id }) })
            });

        let outcome = mocks
            .build()
            .process_tip(sender, recipient, 30, PaymentRail::Tokens)
            .await
            .unwrap();

        assert_eq!(outcome.transaction_id, Some(transaction_id));
    }

    #[tokio::test]
    async fn insufficient_balance_surfaces_as_typed_error() {
        let mut mocks = Mocks::new();
        mocks
            .ledger
            .expect_send_tip()
            .returning(|_, _, _| Box::pin(async { Err(LedgerError::InsufficientBalance) }));

        let err = mocks
            .build()
            .process_tip(Uuid::new_v4(), Uuid::new_v4(), 30, PaymentRail::Tokens)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::InsufficientBalance));
    }

    #[tokio::test]
    async fn stars_tip_credits_recipient_share() {
        let sender = Uuid::new_v4();
        let recipient = Uuid::new_v4();
        let transaction_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks
            .transaction_repo
            .expect_record()
            .withf(|tx| tx.amount == -30)
            .returning(move |_| Box::pin(async move { Ok(transaction_id) }));
        // 30 tokens tipped: recipient keeps floor(30 * 95%) = 28.
        mocks
            .ledger
            .expect_credit()
            .withf(move |user, amount, _| *user == recipient && *amount == 28)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        mocks
            .earning_repo
            .expect_record_earning()
            .withf(move |earning| {
                earning.creator_id == recipient
                    && earning.amount == 30
                    && earning.platform_fee == 2
                    && earning.net_amount == 28
                    && earning.source_id == transaction_id
            })
            .returning(|_| Box::pin(async { Ok(Uuid::new_v4()) }));

        let outcome = mocks
            .build()
            .settle_stars_tip(sender, recipient, 30)
            .await
            .unwrap();

        assert_eq!(outcome.transaction_id, Some(transaction_id));
    }

    #[tokio::test]
    async fn stars_tip_record_failure_is_not_refunded() {
        let mut mocks = Mocks::new();
        mocks
            .transaction_repo
            .expect_record()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("timeout")) }));
        // No ledger expectations: a payout or refund attempt would panic.

        let err = mocks
            .build()
            .settle_stars_tip(Uuid::new_v4(), Uuid::new_v4(), 30)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::RecordWriteFailed {
                stage: "transaction"
            }
        ));
    }

    #[tokio::test]
    async fn gift_settles_and_reports_receipt() {
        let sender = Uuid::new_v4();
        let recipient = Uuid::new_v4();
        let gift_id = Uuid::new_v4();
        let transaction_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks
            .ledger
            .expect_send_gift()
            .withf(move |s, r, _, g, price| {
                *s == sender && *r == recipient && *g == gift_id && *price == 50
            })
            .returning(move |_, _, _, _, _| {
                Box::pin(async move { Ok(LedgerReceipt { transaction_id }) })
            });

        let outcome = mocks
            .build()
            .send_gift(sender, recipient, Uuid::new_v4(), gift_id, 50)
            .await
            .unwrap();

        assert_eq!(outcome.transaction_id, Some(transaction_id));
    }

    #[tokio::test]
    async fn repeated_ppv_unlock_is_a_duplicate() {
        let mut mocks = Mocks::new();
        mocks
            .ledger
            .expect_unlock_ppv()
            .returning(|_, _| Box::pin(async { Err(LedgerError::DuplicatePurchase) }));

        let err = mocks
            .build()
            .unlock_ppv(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::DuplicatePurchase));
    }
}
