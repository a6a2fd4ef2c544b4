use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use chrono::Utc;
use log::{debug, error, info};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{CustomError, ProviderFailureKind},
    models::{
        address::WalletAddress,
        query::{QueryOutcome, QuerySnapshot, QueryStateResponse, QueryStatus},
        token::DisplayToken,
    },
};

use super::balance_service::BalanceNormalizer;

/// Counts a query as in flight until dropped, whichever way the query exits.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs balance queries and keeps the state shown to the presentation layer.
///
/// Every query takes the next generation number. Only the query holding the
/// latest generation may write the shared snapshot, so a slow query that was
/// overtaken cannot overwrite the result of a newer one.
pub struct QueryService {
    normalizer: BalanceNormalizer,
    generation: AtomicU64,
    in_flight: AtomicUsize,
    snapshot: RwLock<QuerySnapshot>,
}

impl QueryService {
    pub fn new(normalizer: BalanceNormalizer) -> Self {
        Self {
            normalizer,
            generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            snapshot: RwLock::new(QuerySnapshot::idle()),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn snapshot(&self) -> QuerySnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn state(&self) -> QueryStateResponse {
        QueryStateResponse {
            busy: self.is_busy(),
            snapshot: self.snapshot().await,
        }
    }

    pub async fn run_query(&self, input: &str) -> QueryOutcome {
        let _busy = BusyGuard::enter(&self.in_flight);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query_id = Uuid::new_v4();
        let address = input.trim();

        info!("Query {} (generation {}) started for {:?}", query_id, generation, address);
        self.publish(generation, query_id, address, QueryStatus::Validating).await;

        let result = match WalletAddress::parse(input) {
            Ok(wallet) => {
                self.publish(generation, query_id, address, QueryStatus::Fetching).await;
                self.normalizer.fetch_display_tokens(&wallet).await
            }
            Err(e) => Err(e),
        };

        let outcome = to_outcome(result);
        self.publish(generation, query_id, address, QueryStatus::from(&outcome)).await;

        info!(
            "Query {} finished: {} with {} tokens",
            query_id,
            QueryStatus::from(&outcome).name(),
            outcome.tokens().len()
        );
        outcome
    }

    async fn publish(&self, generation: u64, query_id: Uuid, address: &str, status: QueryStatus) {
        let mut snapshot = self.snapshot.write().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            debug!(
                "Query {} superseded by generation {}, dropping {} state",
                query_id,
                latest,
                status.name()
            );
            return;
        }

        *snapshot = QuerySnapshot {
            generation,
            query_id: Some(query_id),
            address: Some(address.to_string()),
            status,
            updated_at: Utc::now(),
        };
    }
}

fn to_outcome(result: Result<Vec<DisplayToken>, CustomError>) -> QueryOutcome {
    match result {
        Ok(tokens) if tokens.is_empty() => QueryOutcome::EmptyResult,
        Ok(tokens) => QueryOutcome::Success { tokens },
        Err(e) if e.is_validation() => QueryOutcome::ValidationError {
            message: e.to_string(),
        },
        Err(e) => {
            error!("Error fetching token data: {}", e);
            let kind = ProviderFailureKind::classify(&e.to_string());
            QueryOutcome::ProviderFailure {
                message: kind.user_message().to_string(),
            }
        }
    }
}
