//! Menu loop of the console client.
//!
//! Login menu first; once logged in, the main menu dispatches to the
//! [`Teller`]. Action failures never end the session: ledger rule
//! violations are shown as-is, everything else is logged and reported with
//! a generic message. Only console I/O errors stop the loop.

use std::{
    collections::HashMap,
    io::{BufRead, Write},
};

use super::{
    api::{ApiClient, ClientError},
    console::Console,
    teller::Teller,
};

const CHOOSE: &str = "Please choose an option: ";

pub struct App<R, W> {
    api: ApiClient,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(api: ApiClient, console: Console<R, W>) -> Self {
        Self { api, console }
    }

    /// Run until the user exits; returns the console so callers can inspect
    /// what was written.
    pub async fn run(mut self) -> Result<Console<R, W>, ClientError> {
        self.console.print_greeting()?;

        if let Some(teller) = self.login_menu().await? {
            self.main_menu(&teller).await?;
        }

        Ok(self.console)
    }

    async fn login_menu(&mut self) -> Result<Option<Teller>, ClientError> {
        loop {
            self.console.print_login_menu()?;
            match self.console.prompt_for_menu_selection(CHOOSE)? {
                0 => return Ok(None),
                1 => self.handle_register().await?,
                2 => {
                    if let Some(teller) = self.handle_login().await? {
                        return Ok(Some(teller));
                    }
                }
                _ => {
                    self.console.print_message("Invalid Selection")?;
                    self.console.pause()?;
                }
            }
        }
    }

    async fn handle_register(&mut self) -> Result<(), ClientError> {
        self.console.print_message("Please register a new user account")?;
        let credentials = self.console.prompt_for_credentials()?;

        match self.api.register(&credentials).await {
            Ok(_) => self
                .console
                .print_message("Registration successful. You can now login.")?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    async fn handle_login(&mut self) -> Result<Option<Teller>, ClientError> {
        let credentials = self.console.prompt_for_credentials()?;

        match self.api.login(&credentials).await {
            Ok(session) => Ok(Some(Teller::new(self.api.clone(), session))),
            Err(err) => {
                self.report(err)?;
                Ok(None)
            }
        }
    }

    async fn main_menu(&mut self, teller: &Teller) -> Result<(), ClientError> {
        loop {
            self.console.print_main_menu()?;
            let outcome = match self.console.prompt_for_menu_selection(CHOOSE)? {
                0 => return Ok(()),
                1 => self.view_balance(teller).await,
                2 => self.view_transfer_history(teller).await,
                3 => self.approval_menu(teller).await,
                4 => self.send_bucks(teller).await,
                5 => self.request_bucks(teller).await,
                _ => self
                    .console
                    .print_message("Invalid Selection")
                    .map_err(ClientError::from),
            };
            if let Err(err) = outcome {
                self.report(err)?;
            }
            self.console.pause()?;
        }
    }

    async fn approval_menu(&mut self, teller: &Teller) -> Result<(), ClientError> {
        loop {
            self.view_pending_requests(teller).await?;
            self.console.print_approval_menu()?;
            let outcome = match self.console.prompt_for_menu_selection(CHOOSE)? {
                0 => return Ok(()),
                1 => self.decide(teller, true).await,
                2 => self.decide(teller, false).await,
                _ => self
                    .console
                    .print_message("Invalid Selection")
                    .map_err(ClientError::from),
            };
            if let Err(err) = outcome {
                self.report(err)?;
            }
            self.console.pause()?;
        }
    }

    async fn view_balance(&mut self, teller: &Teller) -> Result<(), ClientError> {
        let balance = teller.balance().await?;
        self.console.print_balance(balance)?;
        Ok(())
    }

    async fn view_transfer_history(&mut self, teller: &Teller) -> Result<(), ClientError> {
        let own = teller.own_account().await?;
        let transfers = teller.history().await?;
        let names = account_names(teller).await?;
        self.console
            .print_transfers("Transfers", &transfers, own.account_id, &names)?;
        Ok(())
    }

    async fn view_pending_requests(&mut self, teller: &Teller) -> Result<(), ClientError> {
        let own = teller.own_account().await?;
        let transfers = teller.pending().await?;
        let names = account_names(teller).await?;
        self.console
            .print_transfers("Pending Requests", &transfers, own.account_id, &names)?;
        Ok(())
    }

    async fn decide(&mut self, teller: &Teller, approve: bool) -> Result<(), ClientError> {
        let transfer_id = self.console.prompt_for_int("Please input transfer ID: ")?;

        let transfer = if approve {
            teller.approve(transfer_id).await?
        } else {
            teller.reject(transfer_id).await?
        };

        self.console.print_message(&format!(
            "Transfer {} is now {}.",
            transfer.transfer_id, transfer.transfer_status
        ))?;
        Ok(())
    }

    async fn send_bucks(&mut self, teller: &Teller) -> Result<(), ClientError> {
        let directory = teller.directory().await?;
        self.console.print_directory(&directory)?;

        let account_to = self
            .console
            .prompt_for_int("Please choose recipient's account ID: ")?;
        let amount = self.console.prompt_for_decimal(
            "Please input amount with 2 decimal places (examples: 10.50, 20, 19.69): ",
        )?;

        let transfer = teller.send_bucks(account_to, amount).await?;
        self.console.print_message(&format!(
            "Sent ${} (transfer {}).",
            transfer.amount, transfer.transfer_id
        ))?;
        Ok(())
    }

    async fn request_bucks(&mut self, teller: &Teller) -> Result<(), ClientError> {
        let directory = teller.directory().await?;
        self.console.print_directory(&directory)?;

        let account_from = self.console.prompt_for_int(
            "Please choose the account ID you are requesting money from: ",
        )?;
        let amount = self
            .console
            .prompt_for_decimal("Please input amount in two decimal: ")?;

        let transfer = teller.request_bucks(account_from, amount).await?;
        self.console.print_message(&format!(
            "Requested ${} (transfer {}).",
            transfer.amount, transfer.transfer_id
        ))?;
        Ok(())
    }

    /// Show an action failure. Console I/O errors are passed back up.
    fn report(&mut self, err: ClientError) -> Result<(), ClientError> {
        match err {
            ClientError::Io(_) => Err(err),
            ClientError::Ledger(ref rule) => {
                self.console.print_message(&format!("Error: {rule}"))?;
                Ok(())
            }
            ClientError::NotFundHolder(_) => {
                self.console.print_message(&format!("Error: {err}"))?;
                Ok(())
            }
            other => {
                tracing::error!("{other}");
                self.console.print_error_message()?;
                Ok(())
            }
        }
    }
}

/// Account id to username, for labelling transfers.
async fn account_names(teller: &Teller) -> Result<HashMap<i32, String>, ClientError> {
    Ok(teller
        .directory()
        .await?
        .into_iter()
        .map(|entry| (entry.account_id, entry.username))
        .collect())
}
