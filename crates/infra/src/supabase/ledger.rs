use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use domain::entities::balances::BalanceEntity;
use domain::repositories::ledger::{
    LedgerError, LedgerReceipt, LedgerRepository, LedgerResult,
};

use super::client::{SupabaseApiError, SupabaseClient};

/// Token ledger backed by Supabase stored procedures. Each entry point maps
/// to one `atomic_*` function that debits, writes the domain row, pays the
/// creator and records the audit trail in a single transaction.
pub struct SupabaseLedger {
    client: Arc<SupabaseClient>,
}

impl SupabaseLedger {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    async fn call_atomic(
        &self,
        function: &str,
        args: serde_json::Value,
        context: &str,
    ) -> LedgerResult<LedgerReceipt> {
        let transaction_id: Uuid = self
            .client
            .rpc(function, &args, context)
            .await
            .map_err(map_ledger_error)?;

        Ok(LedgerReceipt { transaction_id })
    }
}

/// Stored procedures reject with `raise exception`; PostgREST forwards the
/// message verbatim. The well-known rejection phrases become typed variants,
/// everything else stays an opaque backend failure.
fn map_ledger_error(err: anyhow::Error) -> LedgerError {
    let Some(api_err) = err.downcast_ref::<SupabaseApiError>() else {
        return LedgerError::Backend(err);
    };

    let message = api_err.message.to_lowercase();
    if message.contains("insufficient") {
        LedgerError::InsufficientBalance
    } else if message.contains("already") || message.contains("duplicate") {
        LedgerError::DuplicatePurchase
    } else if let Some(what) = message.strip_suffix(" not found") {
        LedgerError::NotFound(what.to_string())
    } else if (400..500).contains(&api_err.status) {
        LedgerError::Rejected(api_err.message.clone())
    } else {
        LedgerError::Backend(err)
    }
}

#[async_trait]
impl LedgerRepository for SupabaseLedger {
    async fn balance_of(&self, user_id: Uuid) -> Result<i64> {
        let rows: Vec<BalanceEntity> = self
            .client
            .select(
                "balances",
                &[
                    ("user_id", format!("eq.{}", user_id)),
                    ("select", "user_id,balance".to_string()),
                ],
                "read balance",
            )
            .await?;

        // No row yet means the wallet was never funded.
        Ok(rows.first().map(|row| row.balance).unwrap_or(0))
    }

    async fn credit(&self, user_id: Uuid, amount: i64, reason: &str) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .rpc(
                "add_to_balance",
                &json!({
                    "p_user_id": user_id,
                    "p_amount": amount,
                    "p_reason": reason,
                }),
                "credit balance",
            )
            .await?;
        Ok(())
    }

    async fn send_tip(
        &self,
        sender: Uuid,
        recipient: Uuid,
        amount: i64,
    ) -> LedgerResult<LedgerReceipt> {
        self.call_atomic(
            "atomic_send_tip",
            json!({
                "p_sender_id": sender,
                "p_recipient_id": recipient,
                "p_amount": amount,
            }),
            "send tip",
        )
        .await
    }

    async fn send_gift(
        &self,
        sender: Uuid,
        recipient: Uuid,
        conversation_id: Uuid,
        gift_id: Uuid,
        price: i64,
    ) -> LedgerResult<LedgerReceipt> {
        self.call_atomic(
            "atomic_send_gift",
            json!({
                "p_sender_id": sender,
                "p_recipient_id": recipient,
                "p_conversation_id": conversation_id,
                "p_gift_id": gift_id,
                "p_price": price,
            }),
            "send gift",
        )
        .await
    }

    async fn unlock_ppv(&self, message_id: Uuid, user_id: Uuid) -> LedgerResult<LedgerReceipt> {
        self.call_atomic(
            "atomic_unlock_ppv",
            json!({
                "p_message_id": message_id,
                "p_user_id": user_id,
            }),
            "unlock ppv message",
        )
        .await
    }

    async fn subscribe(
        &self,
        subscriber: Uuid,
        creator: Uuid,
        price: i64,
    ) -> LedgerResult<LedgerReceipt> {
        self.call_atomic(
            "atomic_subscribe",
            json!({
                "p_subscriber_id": subscriber,
                "p_creator_id": creator,
                "p_price": price,
            }),
            "subscribe",
        )
        .await
    }

    async fn unlock_post(
        &self,
        buyer: Uuid,
        post_id: Uuid,
        price: i64,
    ) -> LedgerResult<LedgerReceipt> {
        self.call_atomic(
            "atomic_unlock_post",
            json!({
                "p_buyer_id": buyer,
                "p_post_id": post_id,
                "p_price": price,
            }),
            "unlock post",
        )
        .await
    }

    async fn buy_ticket(
        &self,
        viewer: Uuid,
        livestream_id: Uuid,
        price: i64,
    ) -> LedgerResult<LedgerReceipt> {
        self.call_atomic(
            "atomic_buy_ticket",
            json!({
                "p_viewer_id": viewer,
                "p_livestream_id": livestream_id,
                "p_price": price,
            }),
            "buy livestream ticket",
        )
        .await
    }
}
