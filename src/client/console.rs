//! Console input and output for the client menus.
//!
//! Generic over the reader and writer so menus can be driven by scripted
//! input in tests. End of input behaves like choosing "0" at a menu.

use std::{
    collections::HashMap,
    io::{self, BufRead, Write},
    str::FromStr,
};

use rust_decimal::Decimal;

use super::teller::DirectoryEntry;
use crate::models::{transfer::Transfer, user::CredentialsRequest};

const RULE: &str = "-------------------------------------------";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line without its newline, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Parse until the user enters a valid value.
    fn prompt_for<T: FromStr>(&mut self, prompt: &str, retry: &str) -> io::Result<T> {
        loop {
            let line = self
                .prompt(prompt)?
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))?;
            match line.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "{retry}")?,
            }
        }
    }

    pub fn print_greeting(&mut self) -> io::Result<()> {
        writeln!(self.output, "*********************")?;
        writeln!(self.output, "* Welcome to TEnmo! *")?;
        writeln!(self.output, "*********************")
    }

    pub fn print_login_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "1: Register")?;
        writeln!(self.output, "2: Login")?;
        writeln!(self.output, "0: Exit")?;
        writeln!(self.output)
    }

    pub fn print_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "1: View your current balance")?;
        writeln!(self.output, "2: View your past transfers")?;
        writeln!(self.output, "3: View your pending requests")?;
        writeln!(self.output, "4: Send TE bucks")?;
        writeln!(self.output, "5: Request TE bucks")?;
        writeln!(self.output, "0: Exit")?;
        writeln!(self.output)
    }

    pub fn print_approval_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "1: Approve")?;
        writeln!(self.output, "2: Reject")?;
        writeln!(self.output, "0: Don't approve or reject")?;
        writeln!(self.output)
    }

    /// Menu choice; `-1` for anything that is not a number, `0` at end of input.
    pub fn prompt_for_menu_selection(&mut self, prompt: &str) -> io::Result<i32> {
        Ok(match self.prompt(prompt)? {
            Some(line) => line.parse().unwrap_or(-1),
            None => 0,
        })
    }

    pub fn prompt_for_int(&mut self, prompt: &str) -> io::Result<i32> {
        self.prompt_for(prompt, "Please enter a number.")
    }

    pub fn prompt_for_decimal(&mut self, prompt: &str) -> io::Result<Decimal> {
        self.prompt_for(prompt, "Please enter a decimal number.")
    }

    pub fn prompt_for_credentials(&mut self) -> io::Result<CredentialsRequest> {
        let username = self.prompt("Username: ")?.unwrap_or_default();
        let password = self.prompt("Password: ")?.unwrap_or_default();
        Ok(CredentialsRequest { username, password })
    }

    pub fn print_message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    pub fn print_error_message(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "An error occurred. Check the log for details."
        )
    }

    pub fn print_balance(&mut self, balance: Decimal) -> io::Result<()> {
        writeln!(self.output, "Your current account balance is: ${balance}")
    }

    pub fn print_directory(&mut self, entries: &[DirectoryEntry]) -> io::Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Accounts")?;
        writeln!(self.output, "{:<12}{}", "Account ID", "Username")?;
        writeln!(self.output, "{RULE}")?;
        for entry in entries {
            writeln!(self.output, "{:<12}{}", entry.account_id, entry.username)?;
        }
        writeln!(self.output, "{RULE}")
    }

    /// Transfer table from the point of view of `own_account_id`.
    ///
    /// `names` maps account ids to usernames; unknown accounts print their id.
    pub fn print_transfers(
        &mut self,
        title: &str,
        transfers: &[Transfer],
        own_account_id: i32,
        names: &HashMap<i32, String>,
    ) -> io::Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "{title}")?;
        writeln!(
            self.output,
            "{:<8}{:<22}{:>10}  {:<8}{}",
            "ID", "From/To", "Amount", "Type", "Status"
        )?;
        writeln!(self.output, "{RULE}")?;

        if transfers.is_empty() {
            writeln!(self.output, "No transfers found.")?;
        }

        for transfer in transfers {
            let (label, counterparty) = if transfer.account_from == own_account_id {
                ("To:", transfer.account_to)
            } else {
                ("From:", transfer.account_from)
            };
            let name = names
                .get(&counterparty)
                .cloned()
                .unwrap_or_else(|| counterparty.to_string());

            writeln!(
                self.output,
                "{:<8}{:<22}{:>10}  {:<8}{}",
                transfer.transfer_id,
                format!("{label} {name}"),
                format!("${}", transfer.amount),
                transfer.transfer_type.to_string(),
                transfer.transfer_status
            )?;
        }

        writeln!(self.output, "{RULE}")
    }

    pub fn pause(&mut self) -> io::Result<()> {
        write!(self.output, "\nPress Enter to continue...")?;
        self.output.flush()?;
        self.read_line()?;
        Ok(())
    }
}
