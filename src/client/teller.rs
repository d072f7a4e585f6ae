//! Client-side orchestration of sends, requests and approvals.
//!
//! The server only records transfers and stores balances it is given, so
//! the teller does the rest: it validates with [`crate::ledger`] and works
//! out both new balances, records the transfer, then applies the fund
//! movement as two independent balance replacements (debit first, then
//! credit). If the credit fails after the debit succeeded, the failure is
//! logged and returned; nothing is rolled back.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::api::{ApiClient, AuthenticatedUser, ClientError};
use crate::{
    ledger::{self, FundMovement},
    models::{
        account::Account,
        transfer::{NewTransfer, Transfer, TransferStatus, TransferType},
        user::User,
    },
};

/// One row of the account directory shown before a send or request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub account_id: i32,
    pub user_id: i32,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct Teller {
    api: ApiClient,
    session: AuthenticatedUser,
}

impl Teller {
    pub fn new(api: ApiClient, session: AuthenticatedUser) -> Self {
        Self { api, session }
    }

    pub fn user(&self) -> &User {
        &self.session.user
    }

    pub async fn own_account(&self) -> Result<Account, ClientError> {
        self.api.own_account(&self.session).await
    }

    pub async fn balance(&self) -> Result<Decimal, ClientError> {
        Ok(self.own_account().await?.balance)
    }

    /// Every account with its owner's username, ordered by account id.
    pub async fn directory(&self) -> Result<Vec<DirectoryEntry>, ClientError> {
        let accounts = self.api.accounts(&self.session).await?;
        let usernames: HashMap<i32, String> = self
            .api
            .users(&self.session)
            .await?
            .into_iter()
            .map(|user| (user.user_id, user.username))
            .collect();

        let mut entries: Vec<DirectoryEntry> = accounts
            .into_iter()
            .map(|account| DirectoryEntry {
                account_id: account.account_id,
                user_id: account.user_id,
                username: usernames
                    .get(&account.user_id)
                    .cloned()
                    .unwrap_or_else(|| format!("user {}", account.user_id)),
            })
            .collect();
        entries.sort_by_key(|entry| entry.account_id);

        Ok(entries)
    }

    pub async fn history(&self) -> Result<Vec<Transfer>, ClientError> {
        self.api.transfers(&self.session).await
    }

    /// Requests waiting on this user's approval.
    pub async fn pending(&self) -> Result<Vec<Transfer>, ClientError> {
        self.api.pending_transfers(&self.session).await
    }

    pub async fn transfer(&self, transfer_id: i32) -> Result<Transfer, ClientError> {
        self.api.transfer(&self.session, transfer_id).await
    }

    /// Send `amount` to `account_to` right away.
    ///
    /// Rejected before any write if the target is the user's own account,
    /// the amount is not a positive whole-cent value, the balance does not
    /// cover it, or the recipient's balance would overflow.
    pub async fn send_bucks(
        &self,
        account_to: i32,
        amount: Decimal,
    ) -> Result<Transfer, ClientError> {
        let own = self.own_account().await?;
        ledger::validate_send(&own, account_to, amount)?;
        let movement = self.plan_movement(own.account_id, account_to, amount).await?;

        let transfer = self
            .api
            .create_transfer(
                &self.session,
                &NewTransfer {
                    transfer_type: TransferType::Send,
                    account_from: own.account_id,
                    account_to,
                    amount,
                },
            )
            .await?;

        self.apply_movement(&movement).await?;

        Ok(transfer)
    }

    /// Ask the owner of `account_from` for `amount`. No balance changes.
    pub async fn request_bucks(
        &self,
        account_from: i32,
        amount: Decimal,
    ) -> Result<Transfer, ClientError> {
        let own = self.own_account().await?;
        ledger::validate_request(own.account_id, account_from, amount)?;

        self.api
            .create_transfer(
                &self.session,
                &NewTransfer {
                    transfer_type: TransferType::Request,
                    account_from,
                    account_to: own.account_id,
                    amount,
                },
            )
            .await
    }

    /// Approve a pending request addressed to this user and pay it.
    ///
    /// Both new balances are computed before the status changes, so an
    /// approval never leaves a request approved but unpayable.
    pub async fn approve(&self, transfer_id: i32) -> Result<Transfer, ClientError> {
        let own = self.own_account().await?;
        let transfer = self.transfer(transfer_id).await?;

        if transfer.account_from != own.account_id {
            return Err(ClientError::NotFundHolder(transfer_id));
        }
        ledger::ensure_covers(own.balance, transfer.amount)?;
        let movement = self
            .plan_movement(transfer.account_from, transfer.account_to, transfer.amount)
            .await?;

        let approved = self
            .api
            .update_transfer_status(&self.session, transfer_id, TransferStatus::Approved)
            .await?;

        self.apply_movement(&movement).await?;

        Ok(approved)
    }

    /// Reject a pending request. No balance changes.
    pub async fn reject(&self, transfer_id: i32) -> Result<Transfer, ClientError> {
        self.api
            .update_transfer_status(&self.session, transfer_id, TransferStatus::Rejected)
            .await
    }

    /// Fetch both accounts and work out their balances after the movement.
    async fn plan_movement(
        &self,
        account_from: i32,
        account_to: i32,
        amount: Decimal,
    ) -> Result<FundMovement, ClientError> {
        let from = self.api.account(&self.session, account_from).await?;
        let to = self.api.account(&self.session, account_to).await?;
        Ok(ledger::move_funds(&from, &to, amount)?)
    }

    /// Debit, then credit. There is no rollback if the credit fails.
    async fn apply_movement(&self, movement: &FundMovement) -> Result<(), ClientError> {
        let FundMovement { from, to } = movement;

        self.api
            .update_balance(&self.session, from.account_id, from.balance)
            .await?;

        if let Err(err) = self
            .api
            .update_balance(&self.session, to.account_id, to.balance)
            .await
        {
            tracing::error!(
                account_from = from.account_id,
                account_to = to.account_id,
                "Debit applied but credit failed: {err}"
            );
            return Err(err);
        }

        Ok(())
    }
}
