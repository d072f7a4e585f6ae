//! PostgreSQL-backed store.
//!
//! Every method is a single statement (or, for registration, a single
//! database transaction) against the pool. Balance replacement and status
//! updates are independent statements: two-sided balance moves are not
//! wrapped in a transaction.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::Store;
use crate::{
    db::DbPool,
    error::AppError,
    models::{
        account::Account,
        transfer::{NewTransfer, Transfer, TransferStatus},
        user::{User, UserCredentials},
    },
};

const TRANSFER_COLUMNS: &str =
    "transfer_id, transfer_type_id, transfer_status_id, account_from, account_to, amount";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation on `tenmo_user.username` to `UsernameTaken`.
fn username_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::UsernameTaken;
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        starting_balance: Decimal,
    ) -> Result<User, AppError> {
        // User and account are created together or not at all
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO tenmo_user (username, password_hash)
            VALUES ($1, $2)
            RETURNING user_id, username
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(username_conflict)?;

        sqlx::query("INSERT INTO account (user_id, balance) VALUES ($1, $2)")
            .bind(user.user_id)
            .bind(starting_balance)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT user_id, username, password_hash FROM tenmo_user WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users =
            sqlx::query_as::<_, User>("SELECT user_id, username FROM tenmo_user ORDER BY user_id")
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    async fn user_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT user_id, username FROM tenmo_user WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username FROM tenmo_user WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn store_token(&self, token_hash: &str, user_id: i32) -> Result<(), AppError> {
        sqlx::query("INSERT INTO auth_token (token_hash, user_id) VALUES ($1, $2)")
            .bind(token_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn user_for_token(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.username
            FROM auth_token t
            JOIN tenmo_user u ON u.user_id = t.user_id
            WHERE t.token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT account_id, user_id, balance FROM account ORDER BY account_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn account_by_user_id(&self, user_id: i32) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT account_id, user_id, balance FROM account WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn account_by_id(&self, account_id: i32) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT account_id, user_id, balance FROM account WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn replace_balance(&self, account_id: i32, balance: Decimal) -> Result<u64, AppError> {
        let rows = sqlx::query("UPDATE account SET balance = $1 WHERE account_id = $2")
            .bind(balance)
            .bind(account_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows)
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, AppError> {
        let transfers = sqlx::query_as::<_, Transfer>(&format!(
            "SELECT {TRANSFER_COLUMNS} FROM transfer ORDER BY transfer_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(transfers)
    }

    async fn transfers_for_account(&self, account_id: i32) -> Result<Vec<Transfer>, AppError> {
        let transfers = sqlx::query_as::<_, Transfer>(&format!(
            "SELECT {TRANSFER_COLUMNS} FROM transfer \
             WHERE account_from = $1 OR account_to = $1 \
             ORDER BY transfer_id DESC"
        ))
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transfers)
    }

    async fn pending_for_fund_holder(&self, account_id: i32) -> Result<Vec<Transfer>, AppError> {
        let transfers = sqlx::query_as::<_, Transfer>(&format!(
            "SELECT {TRANSFER_COLUMNS} FROM transfer \
             WHERE account_from = $1 AND transfer_status_id = $2 \
             ORDER BY transfer_id DESC"
        ))
        .bind(account_id)
        .bind(TransferStatus::Pending)
        .fetch_all(&self.pool)
        .await?;

        Ok(transfers)
    }

    async fn transfer_by_id(&self, transfer_id: i32) -> Result<Option<Transfer>, AppError> {
        let transfer = sqlx::query_as::<_, Transfer>(&format!(
            "SELECT {TRANSFER_COLUMNS} FROM transfer WHERE transfer_id = $1"
        ))
        .bind(transfer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transfer)
    }

    async fn insert_transfer(
        &self,
        transfer: &NewTransfer,
        status: TransferStatus,
    ) -> Result<Option<Transfer>, AppError> {
        let created = sqlx::query_as::<_, Transfer>(&format!(
            "INSERT INTO transfer \
             (transfer_type_id, transfer_status_id, account_from, account_to, amount) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {TRANSFER_COLUMNS}"
        ))
        .bind(transfer.transfer_type)
        .bind(status)
        .bind(transfer.account_from)
        .bind(transfer.account_to)
        .bind(transfer.amount)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created)
    }

    async fn set_transfer_status(
        &self,
        transfer_id: i32,
        expected: TransferStatus,
        next: TransferStatus,
    ) -> Result<u64, AppError> {
        // The status guard makes a decided transfer immune to a second decision
        let rows = sqlx::query(
            r#"
            UPDATE transfer
            SET transfer_status_id = $1
            WHERE transfer_id = $2 AND transfer_status_id = $3
            "#,
        )
        .bind(next)
        .bind(transfer_id)
        .bind(expected)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }
}
