//! The fetch boundary: ledger failures stop here.

use crate::api::Ledger;
use crate::config::Window;
use crate::model::TransactionResource;
use tracing::{debug, warn};

/// The result of asking the ledger for transactions.
///
/// A failed fetch is not an error for the caller: it means there is nothing to import this run.
/// This is deliberately a different type from the `Result` returned by the submit step, so that a
/// submit failure can never be mistaken for "no data".
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FetchOutcome {
    /// The ledger answered. The list may be empty.
    Fetched(Vec<TransactionResource>),
    /// The ledger could not be read. Holds a description of the failure.
    Unavailable(String),
}

/// Fetches the transactions in `window`, logging and absorbing any failure.
pub async fn fetch(ledger: &mut (dyn Ledger + Send), window: &Window) -> FetchOutcome {
    match ledger.transactions(window).await {
        Ok(transactions) => {
            debug!("Fetched {} transactions", transactions.len());
            FetchOutcome::Fetched(transactions)
        }
        Err(e) => {
            let reason = format!("{e:#}");
            warn!("Error fetching transactions from Up: {reason}");
            FetchOutcome::Unavailable(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestLedger;
    use crate::test::{held, settled, window};

    #[tokio::test]
    async fn test_fetch_preserves_order() {
        let mut ledger = TestLedger::new(vec![settled("2", -1), held("1", -2), settled("3", -3)]);
        let outcome = fetch(&mut ledger, &window()).await;
        let FetchOutcome::Fetched(transactions) = outcome else {
            panic!("expected Fetched, got {outcome:?}");
        };
        let ids: Vec<&str> = transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[tokio::test]
    async fn test_fetch_empty() {
        let mut ledger = TestLedger::new(Vec::new());
        assert_eq!(
            fetch(&mut ledger, &window()).await,
            FetchOutcome::Fetched(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_absorbed() {
        let mut ledger = TestLedger::failing("The Up API responded with status 401 Unauthorized");
        let outcome = fetch(&mut ledger, &window()).await;
        assert_eq!(
            outcome,
            FetchOutcome::Unavailable(
                "The Up API responded with status 401 Unauthorized".to_string()
            )
        );
    }
}
