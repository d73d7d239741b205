//! Transfer Engine - atomic debit, credit and ledger recording
//!
//! A transfer moves `amount` from the sender's account to the recipient's
//! account and appends one `debit` and one `credit` record. All reads and
//! writes happen inside a single `LedgerContext`; either everything commits
//! or the context is rolled back.

use crate::error::{TransferError, TransferResult};
use chrono::{DateTime, Utc};
use digibank_core::{AccountSide, TransactionRecord};
use digibank_persistence::{LedgerContext, LedgerStore};
use rust_decimal::Decimal;
use serde::Serialize;

/// Policy knobs for the engine
#[derive(Debug, Clone, Default)]
pub struct TransferPolicy {
    /// Permit `from == to`. Net effect is zero but two records are still written.
    pub allow_self_transfer: bool,
}

/// Committed transfer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    /// ID of the debit record on the sender's account
    pub transaction_id: String,
    pub credit_transaction_id: String,
    pub from_account_number: String,
    pub to_account_number: String,
    pub amount: Decimal,
    /// Sender balance after commit
    pub sender_balance: Decimal,
    pub committed_at: DateTime<Utc>,
}

/// Transfer Engine over an injected Ledger Store
pub struct TransferEngine<S> {
    store: S,
    policy: TransferPolicy,
}

impl<S: LedgerStore> TransferEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: TransferPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TransferPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Move `amount` from `from_account_number` to `to_account_number`.
    ///
    /// `initiating_user_id` is trusted; it must own the sender account.
    pub async fn transfer(
        &self,
        initiating_user_id: &str,
        from_account_number: &str,
        to_account_number: &str,
        amount: Decimal,
    ) -> TransferResult<TransferReceipt> {
        let result = self
            .run(initiating_user_id, from_account_number, to_account_number, amount)
            .await;

        match &result {
            Ok(receipt) => tracing::info!(
                transaction_id = %receipt.transaction_id,
                from = from_account_number,
                to = to_account_number,
                amount = %amount,
                "transfer committed"
            ),
            Err(TransferError::TransferFailed { source }) => tracing::error!(
                error = %source,
                transient = source.is_transient(),
                from = from_account_number,
                to = to_account_number,
                "transfer failed, rolled back"
            ),
            Err(err) => tracing::warn!(
                kind = err.kind(),
                user_id = initiating_user_id,
                from = from_account_number,
                to = to_account_number,
                "transfer rejected: {}",
                err
            ),
        }

        result
    }

    async fn run(
        &self,
        user_id: &str,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> TransferResult<TransferReceipt> {
        // Validate before touching the store
        if amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount { amount });
        }

        if from == to && !self.policy.allow_self_transfer {
            return Err(TransferError::InvalidTransfer {
                account_number: from.to_string(),
            });
        }

        let mut ctx = self.store.begin().await?;

        match Self::apply(&mut ctx, user_id, from, to, amount).await {
            Ok(receipt) => {
                ctx.commit().await?;
                Ok(receipt)
            }
            Err(err) => {
                if let Err(rollback_err) = ctx.rollback().await {
                    // Context is dropped here; the store still discards the writes.
                    tracing::error!(error = %rollback_err, "explicit rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn apply(
        ctx: &mut S::Context,
        user_id: &str,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> TransferResult<TransferReceipt> {
        let sender = ctx
            .account_by_number(from)
            .await?
            .ok_or_else(|| TransferError::account_not_found(AccountSide::Sender, from))?;

        if !sender.is_owned_by(user_id) {
            return Err(TransferError::Unauthorized {
                user_id: user_id.to_string(),
                account_number: from.to_string(),
            });
        }

        let recipient = ctx
            .account_by_number(to)
            .await?
            .ok_or_else(|| TransferError::account_not_found(AccountSide::Recipient, to))?;

        // Balance read inside this context, not a cached one
        if !sender.can_cover(amount) {
            return Err(TransferError::InsufficientFunds {
                account_number: from.to_string(),
                requested: amount,
                available: sender.balance,
            });
        }

        let mut sender_balance = ctx.adjust_balance(&sender.id, -amount).await?;
        let recipient_balance = ctx.adjust_balance(&recipient.id, amount).await?;
        if sender.id == recipient.id {
            sender_balance = recipient_balance;
        }

        let debit = TransactionRecord::debit(&sender.id, amount, &recipient.account_number);
        let credit = TransactionRecord::credit(&recipient.id, amount, &sender.account_number);
        ctx.append_record(&debit).await?;
        ctx.append_record(&credit).await?;

        Ok(TransferReceipt {
            transaction_id: debit.id,
            credit_transaction_id: credit.id,
            from_account_number: sender.account_number,
            to_account_number: recipient.account_number,
            amount,
            sender_balance,
            committed_at: debit.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Engine behaviour against an in-memory store that records every call,
    //! so each test can assert that rejected transfers never mutate.

    use super::*;
    use async_trait::async_trait;
    use digibank_core::Account;
    use digibank_persistence::{PersistenceError, PersistenceResult};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Ledger {
        accounts: HashMap<String, Account>,
        records: Vec<TransactionRecord>,
        commits: usize,
        rollbacks: usize,
    }

    #[derive(Clone, Default)]
    struct MemoryStore {
        ledger: Arc<Mutex<Ledger>>,
        fail_on_append: bool,
    }

    struct MemoryContext {
        ledger: Arc<Mutex<Ledger>>,
        staged_accounts: HashMap<String, Account>,
        staged_records: Vec<TransactionRecord>,
        fail_on_append: bool,
    }

    impl MemoryStore {
        fn with_accounts(accounts: &[Account]) -> Self {
            let store = Self::default();
            {
                let mut ledger = store.ledger.lock().unwrap();
                for account in accounts {
                    ledger.accounts.insert(account.id.clone(), account.clone());
                }
            }
            store
        }

        fn balance(&self, id: &str) -> Decimal {
            self.ledger.lock().unwrap().accounts[id].balance
        }

        fn record_count(&self) -> usize {
            self.ledger.lock().unwrap().records.len()
        }
    }

    #[async_trait]
    impl LedgerStore for MemoryStore {
        type Context = MemoryContext;

        async fn begin(&self) -> PersistenceResult<MemoryContext> {
            let staged_accounts = self.ledger.lock().unwrap().accounts.clone();
            Ok(MemoryContext {
                ledger: Arc::clone(&self.ledger),
                staged_accounts,
                staged_records: Vec::new(),
                fail_on_append: self.fail_on_append,
            })
        }
    }

    #[async_trait]
    impl LedgerContext for MemoryContext {
        async fn account_by_number(
            &mut self,
            account_number: &str,
        ) -> PersistenceResult<Option<Account>> {
            Ok(self
                .staged_accounts
                .values()
                .find(|a| a.account_number == account_number)
                .cloned())
        }

        async fn adjust_balance(
            &mut self,
            account_id: &str,
            delta: Decimal,
        ) -> PersistenceResult<Decimal> {
            let account = self
                .staged_accounts
                .get_mut(account_id)
                .ok_or_else(|| PersistenceError::not_found("Account", account_id))?;
            let new_balance = account.balance.checked_add(delta).ok_or_else(|| {
                PersistenceError::BalanceOverflow {
                    account_id: account_id.to_string(),
                    balance: account.balance,
                    delta,
                }
            })?;
            if new_balance < Decimal::ZERO {
                return Err(PersistenceError::NegativeBalance {
                    account_id: account_id.to_string(),
                    balance: account.balance,
                    delta,
                });
            }
            account.balance = new_balance;
            Ok(account.balance)
        }

        async fn append_record(&mut self, record: &TransactionRecord) -> PersistenceResult<()> {
            if self.fail_on_append {
                return Err(PersistenceError::InvalidDecimal("disk full".to_string()));
            }
            self.staged_records.push(record.clone());
            Ok(())
        }

        async fn commit(self) -> PersistenceResult<()> {
            let mut ledger = self.ledger.lock().unwrap();
            ledger.accounts = self.staged_accounts;
            ledger.records.extend(self.staged_records);
            ledger.commits += 1;
            Ok(())
        }

        async fn rollback(self) -> PersistenceResult<()> {
            self.ledger.lock().unwrap().rollbacks += 1;
            Ok(())
        }
    }

    fn fixture() -> (MemoryStore, Account, Account) {
        let alice = Account::open("alice", "1000000001", dec!(500));
        let bob = Account::open("bob", "2000000002", dec!(100));
        let store = MemoryStore::with_accounts(&[alice.clone(), bob.clone()]);
        (store, alice, bob)
    }

    #[tokio::test]
    async fn test_transfer_moves_funds_and_writes_two_records() {
        let (store, alice, bob) = fixture();
        let engine = TransferEngine::new(store.clone());

        let receipt = engine
            .transfer("alice", "1000000001", "2000000002", dec!(200))
            .await
            .unwrap();

        assert_eq!(store.balance(&alice.id), dec!(300));
        assert_eq!(store.balance(&bob.id), dec!(300));
        assert_eq!(receipt.sender_balance, dec!(300));
        assert_eq!(receipt.amount, dec!(200));

        let ledger = store.ledger.lock().unwrap();
        assert_eq!(ledger.records.len(), 2);
        assert_eq!(ledger.records[0].account_id, alice.id);
        assert_eq!(ledger.records[0].kind, digibank_core::TxKind::Debit);
        assert_eq!(ledger.records[0].id, receipt.transaction_id);
        assert_eq!(ledger.records[1].account_id, bob.id);
        assert_eq!(ledger.records[1].kind, digibank_core::TxKind::Credit);
        assert_eq!(ledger.records[0].amount, ledger.records[1].amount);
        assert_eq!(ledger.commits, 1);
    }

    #[tokio::test]
    async fn test_non_positive_amount_never_opens_context() {
        let (store, alice, _) = fixture();
        let engine = TransferEngine::new(store.clone());

        for amount in [dec!(0), dec!(-5)] {
            let err = engine
                .transfer("alice", "1000000001", "2000000002", amount)
                .await
                .unwrap_err();
            assert!(matches!(err, TransferError::InvalidAmount { .. }));
        }

        assert_eq!(store.balance(&alice.id), dec!(500));
        let ledger = store.ledger.lock().unwrap();
        assert_eq!(ledger.commits + ledger.rollbacks, 0);
    }

    #[tokio::test]
    async fn test_unknown_accounts() {
        let (store, _, _) = fixture();
        let engine = TransferEngine::new(store.clone());

        let err = engine
            .transfer("alice", "9999999999", "2000000002", dec!(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransferError::AccountNotFound { side: AccountSide::Sender, .. }
        ));

        let err = engine
            .transfer("alice", "1000000001", "9999999999", dec!(1))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransferError::AccountNotFound { side: AccountSide::Recipient, .. }
        ));

        assert_eq!(store.record_count(), 0);
        assert_eq!(store.ledger.lock().unwrap().rollbacks, 2);
    }

    #[tokio::test]
    async fn test_non_owner_is_unauthorized() {
        let (store, alice, bob) = fixture();
        let engine = TransferEngine::new(store.clone());

        let err = engine
            .transfer("bob", "1000000001", "2000000002", dec!(50))
            .await
            .unwrap_err();

        assert!(matches!(err, TransferError::Unauthorized { .. }));
        assert_eq!(store.balance(&alice.id), dec!(500));
        assert_eq!(store.balance(&bob.id), dec!(100));
        assert_eq!(store.record_count(), 0);
    }

    #[tokio::test]
    async fn test_ownership_checked_before_recipient_lookup() {
        let (store, _, _) = fixture();
        let engine = TransferEngine::new(store);

        let err = engine
            .transfer("bob", "1000000001", "9999999999", dec!(50))
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_insufficient_funds() {
        let (store, alice, bob) = fixture();
        let engine = TransferEngine::new(store.clone());

        let err = engine
            .transfer("bob", "2000000002", "1000000001", dec!(100.01))
            .await
            .unwrap_err();

        match err {
            TransferError::InsufficientFunds {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested, dec!(100.01));
                assert_eq!(available, dec!(100));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.balance(&alice.id), dec!(500));
        assert_eq!(store.balance(&bob.id), dec!(100));
    }

    #[tokio::test]
    async fn test_exact_balance_can_be_transferred() {
        let (store, _, bob) = fixture();
        let engine = TransferEngine::new(store.clone());

        let receipt = engine
            .transfer("bob", "2000000002", "1000000001", dec!(100))
            .await
            .unwrap();
        assert_eq!(receipt.sender_balance, dec!(0));
        assert_eq!(store.balance(&bob.id), dec!(0));
    }

    #[tokio::test]
    async fn test_self_transfer_rejected_by_default() {
        let (store, _, _) = fixture();
        let engine = TransferEngine::new(store.clone());

        let err = engine
            .transfer("alice", "1000000001", "1000000001", dec!(10))
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidTransfer { .. }));
        assert_eq!(store.record_count(), 0);
    }

    #[tokio::test]
    async fn test_self_transfer_allowed_by_policy() {
        let (store, alice, _) = fixture();
        let engine = TransferEngine::new(store.clone()).with_policy(TransferPolicy {
            allow_self_transfer: true,
        });

        let receipt = engine
            .transfer("alice", "1000000001", "1000000001", dec!(10))
            .await
            .unwrap();
        assert_eq!(receipt.sender_balance, dec!(500));
        assert_eq!(store.balance(&alice.id), dec!(500));
        assert_eq!(store.record_count(), 2);
    }

    #[tokio::test]
    async fn test_storage_failure_rolls_back_everything() {
        let (mut store, alice, bob) = fixture();
        store.fail_on_append = true;
        let engine = TransferEngine::new(store.clone());

        let err = engine
            .transfer("alice", "1000000001", "2000000002", dec!(200))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "TransferFailed");
        assert_eq!(store.balance(&alice.id), dec!(500));
        assert_eq!(store.balance(&bob.id), dec!(100));
        assert_eq!(store.record_count(), 0);
        let ledger = store.ledger.lock().unwrap();
        assert_eq!((ledger.commits, ledger.rollbacks), (0, 1));
    }

    #[tokio::test]
    async fn test_recipient_overflow_fails_and_rolls_back() {
        let alice = Account::open("alice", "1000000001", dec!(10));
        let bob = Account::open("bob", "2000000002", Decimal::MAX);
        let store = MemoryStore::with_accounts(&[alice.clone(), bob.clone()]);
        let engine = TransferEngine::new(store.clone());

        let err = engine
            .transfer("alice", "1000000001", "2000000002", dec!(5))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TransferError::TransferFailed {
                source: PersistenceError::BalanceOverflow { .. }
            }
        ));
        assert_eq!(store.balance(&alice.id), dec!(10));
        assert_eq!(store.balance(&bob.id), Decimal::MAX);
        assert_eq!(store.record_count(), 0);
        let ledger = store.ledger.lock().unwrap();
        assert_eq!((ledger.commits, ledger.rollbacks), (0, 1));
    }
}
