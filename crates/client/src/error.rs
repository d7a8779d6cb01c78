use thiserror::Error;

use crate::http::ClientError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid base url: {0}")]
    BaseUrl(String),
    #[error("backend error: {0}")]
    Client(#[from] ClientError),
    #[error("validation error: {0}")]
    Engine(#[from] engine::EngineError),
    #[error("unknown expense: {0}")]
    UnknownExpense(String),
}
