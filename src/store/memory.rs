//! In-memory store.
//!
//! Mirrors the Postgres schema: the same seeded identities, the same
//! uniqueness rules, and the same conditional status update. Used by the test
//! suite and when the server runs with `DATABASE_URL=memory`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::Store;
use crate::{
    error::AppError,
    models::{
        account::Account,
        transfer::{NewTransfer, Transfer, TransferStatus},
        user::{User, UserCredentials},
    },
};

const FIRST_USER_ID: i32 = 1001;
const FIRST_ACCOUNT_ID: i32 = 2001;
const FIRST_TRANSFER_ID: i32 = 3001;

#[derive(Debug)]
struct Tables {
    users: BTreeMap<i32, UserCredentials>,
    accounts: BTreeMap<i32, Account>,
    transfers: BTreeMap<i32, Transfer>,
    tokens: HashMap<String, i32>,
    next_user_id: i32,
    next_account_id: i32,
    next_transfer_id: i32,
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                users: BTreeMap::new(),
                accounts: BTreeMap::new(),
                transfers: BTreeMap::new(),
                tokens: HashMap::new(),
                next_user_id: FIRST_USER_ID,
                next_account_id: FIRST_ACCOUNT_ID,
                next_transfer_id: FIRST_TRANSFER_ID,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        starting_balance: Decimal,
    ) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == username) {
            return Err(AppError::UsernameTaken);
        }

        let user_id = tables.next_user_id;
        tables.next_user_id += 1;
        let account_id = tables.next_account_id;
        tables.next_account_id += 1;

        let credentials = UserCredentials {
            user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user_id, credentials.clone());
        tables.accounts.insert(
            account_id,
            Account {
                account_id,
                user_id,
                balance: starting_balance,
            },
        );

        Ok(credentials.into())
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().map(User::from).collect())
    }

    async fn user_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&user_id).cloned().map(User::from))
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.find_credentials(username).await?.map(User::from))
    }

    async fn store_token(&self, token_hash: &str, user_id: i32) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.tokens.insert(token_hash.to_string(), user_id);
        Ok(())
    }

    async fn user_for_token(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        let user = tables
            .tokens
            .get(token_hash)
            .and_then(|user_id| tables.users.get(user_id))
            .cloned()
            .map(User::from);
        Ok(user)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.values().cloned().collect())
    }

    async fn account_by_user_id(&self, user_id: i32) -> Result<Option<Account>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.values().find(|a| a.user_id == user_id).cloned())
    }

    async fn account_by_id(&self, account_id: i32) -> Result<Option<Account>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.get(&account_id).cloned())
    }

    async fn replace_balance(&self, account_id: i32, balance: Decimal) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        match tables.accounts.get_mut(&account_id) {
            Some(account) => {
                account.balance = balance;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.transfers.values().rev().cloned().collect())
    }

    async fn transfers_for_account(&self, account_id: i32) -> Result<Vec<Transfer>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .transfers
            .values()
            .rev()
            .filter(|t| t.involves(account_id))
            .cloned()
            .collect())
    }

    async fn pending_for_fund_holder(&self, account_id: i32) -> Result<Vec<Transfer>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .transfers
            .values()
            .rev()
            .filter(|t| {
                t.account_from == account_id && t.transfer_status == TransferStatus::Pending
            })
            .cloned()
            .collect())
    }

    async fn transfer_by_id(&self, transfer_id: i32) -> Result<Option<Transfer>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.transfers.get(&transfer_id).cloned())
    }

    async fn insert_transfer(
        &self,
        transfer: &NewTransfer,
        status: TransferStatus,
    ) -> Result<Option<Transfer>, AppError> {
        let mut tables = self.tables.write().await;

        // Foreign keys on both accounts, as in the schema
        if !tables.accounts.contains_key(&transfer.account_from)
            || !tables.accounts.contains_key(&transfer.account_to)
        {
            return Ok(None);
        }

        let transfer_id = tables.next_transfer_id;
        tables.next_transfer_id += 1;

        let created = Transfer {
            transfer_id,
            transfer_type: transfer.transfer_type,
            transfer_status: status,
            account_from: transfer.account_from,
            account_to: transfer.account_to,
            amount: transfer.amount,
        };
        tables.transfers.insert(transfer_id, created.clone());

        Ok(Some(created))
    }

    async fn set_transfer_status(
        &self,
        transfer_id: i32,
        expected: TransferStatus,
        next: TransferStatus,
    ) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        match tables.transfers.get_mut(&transfer_id) {
            Some(transfer) if transfer.transfer_status == expected => {
                transfer.transfer_status = next;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transfer::TransferType;

    #[tokio::test]
    async fn identities_follow_the_seeded_sequences() {
        let store = MemoryStore::new();

        let alice = store.create_user("alice", "hash", Decimal::from(100)).await.unwrap();
        let bob = store.create_user("bob", "hash", Decimal::from(100)).await.unwrap();

        assert_eq!(alice.user_id, 1001);
        assert_eq!(bob.user_id, 1002);
        assert_eq!(store.account_by_user_id(1002).await.unwrap().unwrap().account_id, 2002);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        store.create_user("alice", "hash", Decimal::ZERO).await.unwrap();

        let err = store.create_user("alice", "other", Decimal::ZERO).await.unwrap_err();

        assert!(matches!(err, AppError::UsernameTaken));
    }

    #[tokio::test]
    async fn status_update_only_applies_from_expected_state() {
        let store = MemoryStore::new();
        store.create_user("alice", "hash", Decimal::from(100)).await.unwrap();
        store.create_user("bob", "hash", Decimal::from(100)).await.unwrap();
        let request = NewTransfer {
            transfer_type: TransferType::Request,
            account_from: 2001,
            account_to: 2002,
            amount: Decimal::from(30),
        };
        let transfer = store
            .insert_transfer(&request, TransferStatus::Pending)
            .await
            .unwrap()
            .unwrap();

        let first = store
            .set_transfer_status(
                transfer.transfer_id,
                TransferStatus::Pending,
                TransferStatus::Approved,
            )
            .await
            .unwrap();
        let second = store
            .set_transfer_status(
                transfer.transfer_id,
                TransferStatus::Pending,
                TransferStatus::Approved,
            )
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn transfer_to_unknown_account_is_not_created() {
        let store = MemoryStore::new();
        store.create_user("alice", "hash", Decimal::from(100)).await.unwrap();
        let send = NewTransfer {
            transfer_type: TransferType::Send,
            account_from: 2001,
            account_to: 2999,
            amount: Decimal::from(1),
        };

        let created = store.insert_transfer(&send, TransferStatus::Approved).await.unwrap();

        assert!(created.is_none());
    }
}
