use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ethers::providers::ProviderError;
use serde::Serialize;
use thiserror::Error;

use crate::models::api_response::ApiResponse;

#[derive(Error, Debug)]
pub enum CustomError {
    #[error("Please enter a wallet address.")]
    EmptyInput,

    #[error("Please enter a valid Ethereum address (starts with 0x and is 42 characters long).")]
    InvalidFormat,

    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("Invalid amount: {0}")]
    InvalidAmountError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    ProviderFailure(String),
}

/// What went wrong with the data provider, as far as the user is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailureKind {
    InvalidAddress,
    ApiKey,
    Unexpected,
}

impl ProviderFailureKind {
    /// Buckets a provider error message. Matching is on message text only,
    /// the provider does not expose stable error codes for these cases.
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("invalid address") {
            ProviderFailureKind::InvalidAddress
        } else if [
            "api key",
            "authenticated",
            "rate limit",
            "too many requests",
            "status 429",
            "code: 429",
        ]
            .iter()
            .any(|needle| message.contains(needle))
        {
            ProviderFailureKind::ApiKey
        } else {
            ProviderFailureKind::Unexpected
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ProviderFailureKind::InvalidAddress => {
                "Invalid Ethereum address. Please check your input."
            }
            ProviderFailureKind::ApiKey => {
                "Alchemy API Key error. Please ensure your API key is correct and not rate-limited."
            }
            ProviderFailureKind::Unexpected => {
                "An unexpected error occurred while fetching token balances. Please try again."
            }
        }
    }
}

impl CustomError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CustomError::EmptyInput | CustomError::InvalidFormat | CustomError::ValidationError(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    code: u16,
    message: String,
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::EmptyInput => StatusCode::BAD_REQUEST,
            CustomError::InvalidFormat => StatusCode::BAD_REQUEST,
            CustomError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CustomError::InvalidAmountError(_) => StatusCode::BAD_GATEWAY,
            CustomError::ProviderError(_) => StatusCode::BAD_GATEWAY,
            CustomError::ProviderFailure(_) => StatusCode::BAD_GATEWAY,
            CustomError::NetworkError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CustomError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let api_error = ApiError {
            code: status.as_u16(),
            message: self.to_string(),
        };

        HttpResponse::build(status).json(ApiResponse {
            status: "FAILURE".to_string(),
            code: api_error.code,
            result: None::<()>,
            error: Some(api_error),
        })
    }
}
