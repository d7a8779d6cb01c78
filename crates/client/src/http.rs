//! REST client for the trip backend.
//!
//! The backend owns persistence and authentication; this module only maps
//! requests and status codes. Mutation endpoints are behind the
//! [`ExpenseApi`] trait so the store's optimistic flow is testable without a
//! live server.

use api_types::{
    debts::BackendDebts,
    expense::{ExpenseCreated, ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView},
    trip::TripView,
};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Backend operations the expense store drives.
#[allow(async_fn_in_trait)]
pub trait ExpenseApi {
    async fn expenses_list(
        &self,
        trip_id: &str,
    ) -> std::result::Result<Vec<ExpenseView>, ClientError>;

    async fn expense_create(
        &self,
        payload: ExpenseNew,
    ) -> std::result::Result<ExpenseCreated, ClientError>;

    async fn expense_update(
        &self,
        expense_id: &str,
        payload: ExpenseUpdate,
    ) -> std::result::Result<(), ClientError>;

    async fn expense_delete(&self, expense_id: &str) -> std::result::Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    username: String,
    password: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, username: &str, password: &str) -> crate::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::BaseUrl(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            username: username.to_string(),
            password: password.to_string(),
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid endpoint: {err}")))
    }

    pub async fn trip_get(&self, trip_id: &str) -> std::result::Result<TripView, ClientError> {
        let endpoint = self.endpoint(&format!("trips/{trip_id}"))?;
        let res = self
            .http
            .get(endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        if res.status().is_success() {
            return res.json::<TripView>().await.map_err(ClientError::Transport);
        }
        Err(error_from_response(res).await)
    }

    /// Fetches the server-computed debt aggregates for one participant.
    ///
    /// Older backends do not expose the endpoint; a 404 means "compute
    /// locally", not a failure.
    pub async fn debts_get(
        &self,
        trip_id: &str,
        user_id: &str,
    ) -> std::result::Result<Option<BackendDebts>, ClientError> {
        let endpoint = self.endpoint(&format!("trips/{trip_id}/debts/{user_id}"))?;
        let res = self
            .http
            .get(endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        if res.status().is_success() {
            return res
                .json::<BackendDebts>()
                .await
                .map(Some)
                .map_err(ClientError::Transport);
        }
        match error_from_response(res).await {
            ClientError::NotFound => Ok(None),
            err => Err(err),
        }
    }
}

impl ExpenseApi for Client {
    async fn expenses_list(
        &self,
        trip_id: &str,
    ) -> std::result::Result<Vec<ExpenseView>, ClientError> {
        let endpoint = self.endpoint(&format!("trips/{trip_id}/expenses"))?;
        let res = self
            .http
            .get(endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        if res.status().is_success() {
            return res
                .json::<ExpenseListResponse>()
                .await
                .map(|body| body.expenses)
                .map_err(ClientError::Transport);
        }
        Err(error_from_response(res).await)
    }

    async fn expense_create(
        &self,
        payload: ExpenseNew,
    ) -> std::result::Result<ExpenseCreated, ClientError> {
        let endpoint = self.endpoint("expenses")?;
        let res = self
            .http
            .post(endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .json(&payload)
            .send()
            .await?;

        if res.status().is_success() {
            return res
                .json::<ExpenseCreated>()
                .await
                .map_err(ClientError::Transport);
        }
        Err(error_from_response(res).await)
    }

    async fn expense_update(
        &self,
        expense_id: &str,
        payload: ExpenseUpdate,
    ) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("expenses/{expense_id}"))?;
        let res = self
            .http
            .put(endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .json(&payload)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(res).await)
    }

    async fn expense_delete(&self, expense_id: &str) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("expenses/{expense_id}"))?;
        let res = self
            .http
            .delete(endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(res).await)
    }
}

async fn error_from_response(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(body),
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}
