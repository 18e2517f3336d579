use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    entities::{
        earnings::NewCreatorEarning, notifications::NewNotification, posts::NewPostPurchase,
        posts::PostEntity, transactions::NewTransaction,
    },
    repositories::{
        earnings::EarningRepository, follows::FollowRepository, ledger::LedgerRepository,
        notifications::NotificationRepository, posts::PostRepository,
        subscriptions::SubscriptionRepository, transactions::TransactionRepository,
    },
    value_objects::{
        access::{AccessDecision, DenyReason},
        enums::{
            content_visibility::ContentVisibility, earning_sources::EarningSource,
            notification_kinds::NotificationKind, payment_rails::PaymentRail,
            transaction_types::TransactionType,
        },
        fees,
        stars::{PaymentReference, StarsInvoiceRequest},
    },
};

use crate::gateways::{host::HostBridge, stars::StarsGateway};

use super::{
    PaymentError, PaymentOutcome, PaymentResult, collect_stars_payment, dispatch_notification,
};

pub struct ContentPurchaseUseCase<L, P, S, F, E, T, N, G>
where
    L: LedgerRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    F: FollowRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NotificationRepository + Send + Sync + 'static,
    G: StarsGateway + 'static,
{
    ledger: Arc<L>,
    post_repo: Arc<P>,
    subscription_repo: Arc<S>,
    follow_repo: Arc<F>,
    earning_repo: Arc<E>,
    transaction_repo: Arc<T>,
    notification_repo: Arc<N>,
    stars: Arc<G>,
    host: Arc<dyn HostBridge>,
}

impl<L, P, S, F, E, T, N, G> ContentPurchaseUseCase<L, P, S, F, E, T, N, G>
where
    L: LedgerRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    F: FollowRepository + Send + Sync + 'static,
    E: EarningRepository + Send + Sync + 'static,
    T: TransactionRepository + Send + Sync + 'static,
    N: NotificationRepository + Send + Sync + 'static,
    G: StarsGateway + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ledger: Arc<L>,
        post_repo: Arc<P>,
        subscription_repo: Arc<S>,
        follow_repo: Arc<F>,
        earning_repo: Arc<E>,
        transaction_repo: Arc<T>,
        notification_repo: Arc<N>,
        stars: Arc<G>,
        host: Arc<dyn HostBridge>,
    ) -> Self {
        Self {
            ledger,
            post_repo,
            subscription_repo,
            follow_repo,
            earning_repo,
            transaction_repo,
            notification_repo,
            stars,
            host,
        }
    }

    pub async fn process_content_purchase(
        &self,
        buyer: Uuid,
        post_id: Uuid,
        rail: PaymentRail,
    ) -> PaymentResult<PaymentOutcome> {
        info!(%buyer, %post_id, rail = %rail, "content: purchase requested");

        let post = self.load_post(post_id).await?;

        if post.creator_id == buyer {
            return Ok(PaymentOutcome::short_circuit());
        }

        let already = self
            .post_repo
            .has_purchased(buyer, post_id)
            .await
            .map_err(PaymentError::Internal)?;
        if already {
            info!(%buyer, %post_id, "content: already purchased, nothing to pay");
            return Ok(PaymentOutcome::short_circuit());
        }

        if post.price == 0 {
            return Ok(PaymentOutcome::short_circuit());
        }

        match rail {
            PaymentRail::Tokens => {
                let receipt = self.ledger.unlock_post(buyer, post_id, post.price).await?;
                info!(
                    %buyer,
                    %post_id,
                    transaction_id = %receipt.transaction_id,
                    "content: token payment settled"
                );
                self.notify_creator(buyer, &post);
                Ok(PaymentOutcome::recorded(receipt.transaction_id))
            }
            PaymentRail::Stars => {
                collect_stars_payment(
                    &self.stars,
                    &self.host,
                    StarsInvoiceRequest {
                        payer_id: buyer,
                        payee_id: post.creator_id,
                        amount: post.price,
                        reference: PaymentReference::Post(post_id),
                        description: format!("Unlock post ({} tokens)", post.price),
                    },
                )
                .await?;
                self.settle_stars_purchase(buyer, &post).await
            }
        }
    }

    /// Stars-rail settlement: purchase row, creator payout, audit rows,
    /// notification. No compensation on failure; the provider payment stands.
    pub async fn settle_stars_purchase(
        &self,
        buyer: Uuid,
        post: &PostEntity,
    ) -> PaymentResult<PaymentOutcome> {
        self.post_repo
            .record_purchase(NewPostPurchase {
                user_id: buyer,
                post_id: post.id,
                amount: post.price,
            })
            .await
            .map_err(|err| {
                error!(
                    %buyer,
                    post_id = %post.id,
                    db_error = ?err,
                    "content: stars payment succeeded but purchase write failed; \
                     NOT refunded, needs reconciliation"
                );
                PaymentError::RecordWriteFailed {
                    stage: "post_purchase",
                }
            })?;

        let share = fees::creator_share(post.price);
        self.ledger
            .credit(post.creator_id, share, "post unlock payout")
            .await
            .map_err(|err| {
                error!(
                    creator_id = %post.creator_id,
                    share,
                    error = ?err,
                    "content: creator payout failed after stars payment; \
                     NOT refunded, needs reconciliation"
                );
                PaymentError::RecordWriteFailed { stage: "payout" }
            })?;

        if let Err(err) = self
            .earning_repo
            .record_earning(NewCreatorEarning {
                creator_id: post.creator_id,
                amount: post.price,
                source_type: EarningSource::PostUnlock.to_string(),
                source_id: post.id,
                from_user_id: buyer,
                platform_fee: post.price - share,
                net_amount: share,
            })
            .await
        {
            warn!(creator_id = %post.creator_id, db_error = ?err, "content: earnings row insert failed");
        }

        let transaction_id = match self
            .transaction_repo
            .record(NewTransaction {
                user_id: buyer,
                amount: -post.price,
                transaction_type: TransactionType::PostUnlock.to_string(),
                status: "completed".to_string(),
                description: Some(format!("Unlocked post {} (stars)", post.id)),
            })
            .await
        {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(%buyer, db_error = ?err, "content: audit row insert failed");
                None
            }
        };

        self.notify_creator(buyer, post);

        Ok(PaymentOutcome { transaction_id })
    }

    /// Read-only gate: ownership, purchases, the visibility enum and the
    /// PPV flag combine into a structured decision for the UI.
    pub async fn can_view_post(&self, viewer: Uuid, post_id: Uuid) -> PaymentResult<AccessDecision> {
        let post = self.load_post(post_id).await?;

        if post.creator_id == viewer {
            return Ok(AccessDecision::granted());
        }

        // A recorded purchase grants permanent access regardless of the
        // current visibility setting.
        if self
            .post_repo
            .has_purchased(viewer, post_id)
            .await
            .map_err(PaymentError::Internal)?
        {
            return Ok(AccessDecision::granted());
        }

        match post.visibility {
            ContentVisibility::Public => {}
            ContentVisibility::Followers => {
                let following = self
                    .follow_repo
                    .is_follower(viewer, post.creator_id)
                    .await
                    .map_err(PaymentError::Internal)?;
                if !following {
                    return Ok(AccessDecision::denied(DenyReason::FollowersOnly));
                }
            }
            ContentVisibility::Subscribers => {
                let subscribed = self
                    .subscription_repo
                    .is_active_subscriber(viewer, post.creator_id)
                    .await
                    .map_err(PaymentError::Internal)?;
                if !subscribed {
                    return Ok(AccessDecision::denied(DenyReason::SubscribersOnly));
                }
            }
        }

        if post.is_ppv {
            return Ok(AccessDecision::denied(DenyReason::PpvLocked {
                price: post.price,
            }));
        }

        Ok(AccessDecision::granted())
    }

    async fn load_post(&self, post_id: Uuid) -> PaymentResult<PostEntity> {
        self.post_repo
            .find_post(post_id)
            .await
            .map_err(PaymentError::Internal)?
            .ok_or_else(|| PaymentError::NotFound {
                what: "post".to_string(),
            })
    }

    fn notify_creator(&self, buyer: Uuid, post: &PostEntity) {
        dispatch_notification(
            &self.notification_repo,
            NewNotification {
                user_id: post.creator_id,
                kind: NotificationKind::PostUnlocked,
                actor_id: Some(buyer),
                subject_id: Some(post.id),
                body: "Someone unlocked your post".to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::{
        earnings::MockEarningRepository,
        follows::MockFollowRepository,
        ledger::{LedgerReceipt, MockLedgerRepository},
        notifications::MockNotificationRepository,
        posts::MockPostRepository,
        subscriptions::MockSubscriptionRepository,
        transactions::MockTransactionRepository,
    };

    use crate::gateways::{host::MockHostBridge, stars::MockStarsGateway};

    fn sample_post(creator_id: Uuid, visibility: ContentVisibility, price: i64, is_ppv: bool) -> PostEntity {
        PostEntity {
            id: Uuid::new_v4(),
            creator_id,
            visibility,
            price,
            is_ppv,
        }
    }

    struct Mocks {
        ledger: MockLedgerRepository,
        post_repo: MockPostRepository,
        subscription_repo: MockSubscriptionRepository,
        follow_repo: MockFollowRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                ledger: MockLedgerRepository::new(),
                post_repo: MockPostRepository::new(),
                subscription_repo: MockSubscriptionRepository::new(),
                follow_repo: MockFollowRepository::new(),
            }
        }

        fn build(
            self,
        ) -> ContentPurchaseUseCase<
            MockLedgerRepository,
            MockPostRepository,
            MockSubscriptionRepository,
            MockFollowRepository,
            MockEarningRepository,
            MockTransactionRepository,
            MockNotificationRepository,
            MockStarsGateway,
        > {
            let mut notification_repo = MockNotificationRepository::new();
            notification_repo
                .expect_insert()
                .returning(|_| Box::pin(async { Ok(()) }));

            ContentPurchaseUseCase::new(
                Arc::new(self.ledger),
                Arc::new(self.post_repo),
                Arc::new(self.subscription_repo),
                Arc::new(self.follow_repo),
                Arc::new(MockEarningRepository::new()),
                Arc::new(MockTransactionRepository::new()),
                Arc::new(notification_repo),
                Arc::new(MockStarsGateway::new()),
                Arc::new(MockHostBridge::new()),
            )
        }
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .post_repo
            .expect_find_post()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = mocks
            .build()
            .process_content_purchase(Uuid::new_v4(), Uuid::new_v4(), PaymentRail::Tokens)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::NotFound { .. }));
    }

    #[tokio::test]
    async fn repeated_purchase_short_circuits_without_debit() {
        let buyer = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let post = sample_post(creator, ContentVisibility::Public, 40, true);
        let post_id = post.id;

        let mut mocks = Mocks::new();
        mocks.post_repo.expect_find_post().returning(move |_| {
            let post = post.clone();
            Box::pin(async move { Ok(Some(post)) })
        });
        mocks
            .post_repo
            .expect_has_purchased()
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let outcome = mocks
            .build()
            .process_content_purchase(buyer, post_id, PaymentRail::Tokens)
            .await
            .unwrap();

        assert_eq!(outcome.transaction_id, None);
    }

    #[tokio::test]
    async fn token_purchase_goes_through_atomic_unlock() {
        let buyer = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let post = sample_post(creator, ContentVisibility::Public, 40, true);
        let post_id = post.id;
        let transaction_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks.post_repo.expect_find_post().returning(move |_| {
            let post = post.clone();
            Box::pin(async move { Ok(Some(post)) })
        });
        mocks
            .post_repo
            .expect_has_purchased()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        mocks
            .ledger
            .expect_unlock_post()
            .withf(move |b, p, price| *b == buyer && *p == post_id && *price == 40)
            .returning(move |_, _, _| {
                Box::pin(async move { Ok(LedgerReceipt { transaction_id }) })
            });

        let outcome = mocks
            .build()
            .process_content_purchase(buyer, post_id, PaymentRail::Tokens)
            .await
            .unwrap();

        assert_eq!(outcome.transaction_id, Some(transaction_id));
    }

    #[tokio::test]
    async fn owner_always_views_own_post() {
        let creator = Uuid::new_v4();
        let post = sample_post(creator, ContentVisibility::Subscribers, 40, true);
        let post_id = post.id;

        let mut mocks = Mocks::new();
        mocks.post_repo.expect_find_post().returning(move |_| {
            let post = post.clone();
            Box::pin(async move { Ok(Some(post)) })
        });

        let decision = mocks.build().can_view_post(creator, post_id).await.unwrap();
        assert!(decision.allowed);
    }

    #[tokio::test]
    async fn followers_only_post_requires_follow() {
        let viewer = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let post = sample_post(creator, ContentVisibility::Followers, 0, false);
        let post_id = post.id;

        let mut mocks = Mocks::new();
        mocks.post_repo.expect_find_post().returning(move |_| {
            let post = post.clone();
            Box::pin(async move { Ok(Some(post)) })
        });
        mocks
            .post_repo
            .expect_has_purchased()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        mocks
            .follow_repo
            .expect_is_follower()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let decision = mocks.build().can_view_post(viewer, post_id).await.unwrap();
        assert_eq!(
            decision,
            AccessDecision::denied(DenyReason::FollowersOnly)
        );
    }

    #[tokio::test]
    async fn subscriber_passes_subscribers_only_gate() {
        let viewer = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let post = sample_post(creator, ContentVisibility::Subscribers, 0, false);
        let post_id = post.id;

        let mut mocks = Mocks::new();
        mocks.post_repo.expect_find_post().returning(move |_| {
            let post = post.clone();
            Box::pin(async move { Ok(Some(post)) })
        });
        mocks
            .post_repo
            .expect_has_purchased()
            .returning(|_, _| Box::pin(async { Ok(false) }));
        mocks
            .subscription_repo
            .expect_is_active_subscriber()
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let decision = mocks.build().can_view_post(viewer, post_id).await.unwrap();
        assert!(decision.allowed);
    }

    #[tokio::test]
    async fn unpurchased_ppv_post_is_locked_with_price() {
        let viewer = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let post = sample_post(creator, ContentVisibility::Public, 25, true);
        let post_id = post.id;

        let mut mocks = Mocks::new();
        mocks.post_repo.expect_find_post().returning(move |_| {
            let post = post.clone();
            Box::pin(async move { Ok(Some(post)) })
        });
        mocks
            .post_repo
            .expect_has_purchased()
            .returning(|_, _| Box::pin(async { Ok(false) }));

        let decision = mocks.build().can_view_post(viewer, post_id).await.unwrap();
        assert_eq!(
            decision,
            AccessDecision::denied(DenyReason::PpvLocked { price: 25 })
        );
    }

    #[tokio::test]
    async fn purchase_unlocks_ppv_for_good() {
        let viewer = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let post = sample_post(creator, ContentVisibility::Subscribers, 25, true);
        let post_id = post.id;

        let mut mocks = Mocks::new();
        mocks.post_repo.expect_find_post().returning(move |_| {
            let post = post.clone();
            Box::pin(async move { Ok(Some(post)) })
        });
        mocks
            .post_repo
            .expect_has_purchased()
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let decision = mocks.build().can_view_post(viewer, post_id).await.unwrap();
        assert!(decision.allowed);
    }
}
