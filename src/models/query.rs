use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::DisplayToken;

#[derive(Debug, Deserialize)]
pub struct BalanceQueryRequest {
    pub address: String,
}

/// Result of one `run_query` call, as handed back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QueryOutcome {
    Success { tokens: Vec<DisplayToken> },
    #[serde(rename = "empty")]
    EmptyResult,
    ValidationError { message: String },
    ProviderFailure { message: String },
}

impl QueryOutcome {
    pub fn tokens(&self) -> &[DisplayToken] {
        match self {
            QueryOutcome::Success { tokens } => tokens,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryStatus {
    Idle,
    Validating,
    Fetching,
    Succeeded { tokens: Vec<DisplayToken> },
    Empty,
    Invalid { message: String },
    Failed { message: String },
}

impl QueryStatus {
    pub fn name(&self) -> &'static str {
        match self {
            QueryStatus::Idle => "idle",
            QueryStatus::Validating => "validating",
            QueryStatus::Fetching => "fetching",
            QueryStatus::Succeeded { .. } => "succeeded",
            QueryStatus::Empty => "empty",
            QueryStatus::Invalid { .. } => "invalid",
            QueryStatus::Failed { .. } => "failed",
        }
    }
}

impl From<&QueryOutcome> for QueryStatus {
    fn from(outcome: &QueryOutcome) -> Self {
        match outcome {
            QueryOutcome::Success { tokens } => QueryStatus::Succeeded {
                tokens: tokens.clone(),
            },
            QueryOutcome::EmptyResult => QueryStatus::Empty,
            QueryOutcome::ValidationError { message } => QueryStatus::Invalid {
                message: message.clone(),
            },
            QueryOutcome::ProviderFailure { message } => QueryStatus::Failed {
                message: message.clone(),
            },
        }
    }
}

/// Last state published by the most recent query.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySnapshot {
    pub generation: u64,
    pub query_id: Option<Uuid>,
    pub address: Option<String>,
    #[serde(flatten)]
    pub status: QueryStatus,
    pub updated_at: DateTime<Utc>,
}

impl QuerySnapshot {
    pub fn idle() -> Self {
        Self {
            generation: 0,
            query_id: None,
            address: None,
            status: QueryStatus::Idle,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryStateResponse {
    pub busy: bool,
    pub snapshot: QuerySnapshot,
}
