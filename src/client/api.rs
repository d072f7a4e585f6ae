//! HTTP client for the TEnmo REST API.
//!
//! One method per endpoint. Authenticated calls take the
//! [`AuthenticatedUser`] returned by [`ApiClient::login`] and send its token
//! as a bearer header. Failed responses are turned into
//! [`ClientError::Api`] using the server's JSON error body when present.

use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::ErrorBody,
    ledger::LedgerError,
    models::{
        account::{Account, UpdateBalanceRequest},
        transfer::{NewTransfer, Transfer, TransferStatus, UpdateTransferStatusRequest},
        user::{CredentialsRequest, LoginResponse, User},
    },
};

/// Errors seen by the console client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Base URL cannot hold a path: {0}")]
    BaseUrl(String),

    /// Server answered with a non-success status.
    #[error("Server responded {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Transfer {0} is not waiting on your approval")]
    NotFundHolder(i32),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Logged-in user and their bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user: User,
}

impl From<LoginResponse> for AuthenticatedUser {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Client for the server at `base_url`. A trailing slash is added if
    /// missing so relative paths join under it.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(&normalized)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a request and decode a JSON success body.
    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        // Extractor rejections come back as plain text, not ErrorBody
        let (code, message) = match response.json::<ErrorBody>().await {
            Ok(body) => (body.error.code, body.error.message),
            Err(_) => (
                "unknown".to_string(),
                status.canonical_reason().unwrap_or("Unknown error").to_string(),
            ),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    fn get(&self, session: &AuthenticatedUser, url: Url) -> RequestBuilder {
        self.http.get(url).bearer_auth(&session.token)
    }

    pub async fn register(&self, credentials: &CredentialsRequest) -> Result<User, ClientError> {
        let url = self.url("register")?;
        Self::execute(self.http.post(url).json(credentials)).await
    }

    pub async fn login(
        &self,
        credentials: &CredentialsRequest,
    ) -> Result<AuthenticatedUser, ClientError> {
        let url = self.url("login")?;
        let response: LoginResponse = Self::execute(self.http.post(url).json(credentials)).await?;
        Ok(response.into())
    }

    pub async fn accounts(&self, session: &AuthenticatedUser) -> Result<Vec<Account>, ClientError> {
        let url = self.url("user/all/account")?;
        Self::execute(self.get(session, url)).await
    }

    /// The logged-in user's own account.
    pub async fn own_account(&self, session: &AuthenticatedUser) -> Result<Account, ClientError> {
        let url = self.url(&format!("user/{}/account", session.user.user_id))?;
        Self::execute(self.get(session, url)).await
    }

    pub async fn account(
        &self,
        session: &AuthenticatedUser,
        account_id: i32,
    ) -> Result<Account, ClientError> {
        let url = self.url(&format!(
            "user/{}/account/{account_id}",
            session.user.user_id
        ))?;
        Self::execute(self.get(session, url)).await
    }

    /// Replace a balance. The server stores `balance` as given.
    pub async fn update_balance(
        &self,
        session: &AuthenticatedUser,
        account_id: i32,
        balance: Decimal,
    ) -> Result<Account, ClientError> {
        let url = self.url(&format!(
            "user/{}/account/{account_id}",
            session.user.user_id
        ))?;
        let request = self
            .http
            .put(url)
            .bearer_auth(&session.token)
            .json(&UpdateBalanceRequest { balance });
        Self::execute(request).await
    }

    pub async fn transfers(
        &self,
        session: &AuthenticatedUser,
    ) -> Result<Vec<Transfer>, ClientError> {
        let url = self.url(&format!("user/{}/transfer", session.user.user_id))?;
        Self::execute(self.get(session, url)).await
    }

    pub async fn pending_transfers(
        &self,
        session: &AuthenticatedUser,
    ) -> Result<Vec<Transfer>, ClientError> {
        let url = self.url(&format!("user/{}/transfer/pending", session.user.user_id))?;
        Self::execute(self.get(session, url)).await
    }

    pub async fn transfer(
        &self,
        session: &AuthenticatedUser,
        transfer_id: i32,
    ) -> Result<Transfer, ClientError> {
        let url = self.url(&format!(
            "user/{}/transfer/{transfer_id}",
            session.user.user_id
        ))?;
        Self::execute(self.get(session, url)).await
    }

    pub async fn create_transfer(
        &self,
        session: &AuthenticatedUser,
        transfer: &NewTransfer,
    ) -> Result<Transfer, ClientError> {
        let url = self.url(&format!("user/{}/transfer", session.user.user_id))?;
        let request = self.http.post(url).bearer_auth(&session.token).json(transfer);
        Self::execute(request).await
    }

    pub async fn update_transfer_status(
        &self,
        session: &AuthenticatedUser,
        transfer_id: i32,
        transfer_status: TransferStatus,
    ) -> Result<Transfer, ClientError> {
        let url = self.url(&format!(
            "user/{}/transfer/{transfer_id}",
            session.user.user_id
        ))?;
        let request = self
            .http
            .put(url)
            .bearer_auth(&session.token)
            .json(&UpdateTransferStatusRequest { transfer_status });
        Self::execute(request).await
    }

    pub async fn users(&self, session: &AuthenticatedUser) -> Result<Vec<User>, ClientError> {
        let url = self.url("user/allusers")?;
        Self::execute(self.get(session, url)).await
    }

    pub async fn user_by_id(
        &self,
        session: &AuthenticatedUser,
        user_id: i32,
    ) -> Result<User, ClientError> {
        let url = self.url(&format!("user/userId/{user_id}"))?;
        Self::execute(self.get(session, url)).await
    }

    pub async fn user_by_username(
        &self,
        session: &AuthenticatedUser,
        username: &str,
    ) -> Result<User, ClientError> {
        // Pushed as a segment so the name is percent-encoded
        let mut url = self.url("user/username/")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(username);
        Self::execute(self.get(session, url)).await
    }
}
