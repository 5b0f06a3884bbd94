//! The fetch → filter/transform → submit pipeline.
//!
//! Each stage finishes before the next one starts, and the whole batch is written with a single
//! request so that YNAB sees every import ID at once.

mod fetch;
mod report;

use crate::api::{Budget, Ledger};
use crate::config::Window;
use crate::{transform, Result};
use anyhow::Context;
use tracing::{debug, info};

pub use fetch::{fetch, FetchOutcome};
pub use report::{SubmitSummary, SyncReport};

/// The inputs to a sync that are not clients.
#[derive(Debug, Clone)]
pub struct SyncOptions<'a> {
    /// The YNAB budget to write to.
    pub budget_id: &'a str,
    /// The YNAB account the transactions belong to.
    pub account_id: &'a str,
    /// The range of creation times to fetch from Up.
    pub window: Window,
    /// When `true`, build the batch but do not send it.
    pub dry_run: bool,
}

/// Runs one sync from `ledger` into `budget`.
///
/// # Errors
/// - Returns an error if a transaction cannot be converted.
/// - Returns an error if `budget` rejects the batch. Failures to read `ledger` are not errors;
///   they are reported as `SyncReport::FetchUnavailable`.
pub async fn run(
    ledger: &mut (dyn Ledger + Send),
    budget: &mut (dyn Budget + Send),
    options: &SyncOptions<'_>,
) -> Result<SyncReport> {
    info!(
        "Fetching transactions created between {} and {}",
        options.window.since_rfc3339(),
        options.window.until_rfc3339()
    );
    let transactions = match fetch(ledger, &options.window).await {
        FetchOutcome::Fetched(transactions) => transactions,
        FetchOutcome::Unavailable(reason) => {
            return Ok(SyncReport::FetchUnavailable { reason });
        }
    };
    if transactions.is_empty() {
        return Ok(SyncReport::NothingFetched);
    }
    let fetched = transactions.len();

    let batch = transform::transform(&transactions, options.account_id)?;
    debug!(
        "{} of {fetched} transactions are eligible for import",
        batch.len()
    );
    if batch.is_empty() {
        return Ok(SyncReport::NothingToImport { fetched });
    }

    if options.dry_run {
        return Ok(SyncReport::DryRun {
            fetched,
            transactions: batch,
        });
    }

    let ack = budget
        .save_transactions(options.budget_id, &batch)
        .await
        .with_context(|| format!("Unable to import {} transactions into YNAB", batch.len()))?;
    Ok(SyncReport::Submitted(SubmitSummary::new(fetched, &batch, ack)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TestBudget, TestLedger};
    use crate::model::ClearedStatus;
    use crate::test::{held, options, settled, transfer, window_ending, TxBuilder};
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_end_to_end_single_purchase() {
        let mut ledger = TestLedger::new(vec![
            TxBuilder::new("purchase")
                .description("Woolworths")
                .amount(-1234)
                .created_at("2024-03-05T10:00:00+10:00")
                .build(),
            transfer("transfer", -10000),
            held("held", -550),
        ]);
        let mut budget = TestBudget::default();

        let report = run(&mut ledger, &mut budget, &options()).await.unwrap();

        let requests = &budget.state().requests;
        assert_eq!(requests.len(), 1);
        let (budget_id, batch) = &requests[0];
        assert_eq!(budget_id, "budget-1");
        assert_eq!(batch.len(), 1);
        let sent = &batch[0];
        assert_eq!(sent.import_id, "purchase");
        assert_eq!(sent.account_id, "account-1");
        assert_eq!(sent.amount.value(), -12340);
        assert_eq!(sent.date.to_string(), "2024-03-05");
        assert_eq!(sent.payee_name, "Woolworths");
        assert_eq!(sent.cleared, ClearedStatus::Cleared);
        assert!(sent.approved);

        let SyncReport::Submitted(summary) = report else {
            panic!("expected Submitted, got {report:?}");
        };
        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.submitted, 1);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.duplicates, 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_submit() {
        let mut ledger = TestLedger::failing("connection reset");
        let mut budget = TestBudget::default();

        let report = run(&mut ledger, &mut budget, &options()).await.unwrap();

        assert_eq!(
            report,
            SyncReport::FetchUnavailable {
                reason: "connection reset".to_string()
            }
        );
        assert!(budget.state().requests.is_empty());
    }

    #[tokio::test]
    async fn test_empty_fetch_skips_submit() {
        let mut ledger = TestLedger::new(Vec::new());
        let mut budget = TestBudget::default();

        let report = run(&mut ledger, &mut budget, &options()).await.unwrap();

        assert_eq!(report, SyncReport::NothingFetched);
        assert!(budget.state().requests.is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_skips_submit() {
        let mut ledger = TestLedger::new(vec![held("a", -1), transfer("b", -2)]);
        let mut budget = TestBudget::default();

        let report = run(&mut ledger, &mut budget, &options()).await.unwrap();

        assert_eq!(report, SyncReport::NothingToImport { fetched: 2 });
        assert_eq!(
            report.message(),
            "None of the 2 transactions from Up are settled purchases, nothing to import"
        );
        assert!(budget.state().requests.is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_skips_submit() {
        let mut ledger = TestLedger::new(vec![settled("a", -1), held("b", -2)]);
        let mut budget = TestBudget::default();
        let mut opts = options();
        opts.dry_run = true;

        let report = run(&mut ledger, &mut budget, &opts).await.unwrap();

        let SyncReport::DryRun {
            fetched,
            transactions,
        } = report
        else {
            panic!("expected DryRun, got {report:?}");
        };
        assert_eq!(fetched, 2);
        assert_eq!(transactions.len(), 1);
        assert!(budget.state().requests.is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_propagates() {
        let mut ledger = TestLedger::new(vec![settled("a", -100)]);
        let mut budget = TestBudget::failing("The YNAB API responded with status 401");

        let err = run(&mut ledger, &mut budget, &options())
            .await
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("Unable to import 1 transactions into YNAB"));
        assert!(message.contains("401"));
        assert_eq!(budget.state().requests.len(), 1);
    }

    #[tokio::test]
    async fn test_transform_failure_skips_submit() {
        let mut ledger = TestLedger::new(vec![TxBuilder::new("big").amount(i64::MAX).build()]);
        let mut budget = TestBudget::default();

        assert!(run(&mut ledger, &mut budget, &options()).await.is_err());
        assert!(budget.state().requests.is_empty());
    }

    #[tokio::test]
    async fn test_whole_batch_is_sent_once_in_order() {
        let transactions: Vec<_> = (0..250)
            .map(|i| settled(&uuid::Uuid::new_v4().to_string(), -(i + 1)))
            .collect();
        let expected: Vec<String> = transactions.iter().map(|t| t.id.clone()).collect();
        let mut ledger = TestLedger::new(transactions);
        let mut budget = TestBudget::default();

        run(&mut ledger, &mut budget, &options()).await.unwrap();

        let requests = &budget.state().requests;
        assert_eq!(requests.len(), 1);
        let actual: Vec<String> = requests[0].1.iter().map(|t| t.import_id.clone()).collect();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_overlapping_runs_are_idempotent() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 19, 0, 0, 0).unwrap();
        let later = earlier + Duration::days(3);
        let shared = settled("shared", -500);
        let mut budget = TestBudget::default();

        let mut first = TestLedger::new(vec![shared.clone(), settled("old", -100)]);
        let mut opts = options();
        opts.window = window_ending(earlier);
        run(&mut first, &mut budget, &opts).await.unwrap();

        let mut second = TestLedger::new(vec![settled("new", -200), shared.clone()]);
        opts.window = window_ending(later);
        let report = run(&mut second, &mut budget, &opts).await.unwrap();

        let requests = &budget.state().requests;
        let first_key = requests[0].1.iter().find(|t| t.import_id == "shared");
        let second_key = requests[1].1.iter().find(|t| t.import_id == "shared");
        assert!(first_key.is_some());
        assert_eq!(first_key, second_key);

        let SyncReport::Submitted(summary) = report else {
            panic!("expected Submitted, got {report:?}");
        };
        assert_eq!(summary.created, 1);
        assert_eq!(summary.duplicate_import_ids, vec!["shared"]);
    }

    #[tokio::test]
    async fn test_requested_window() {
        let mut ledger = TestLedger::new(Vec::new());
        let mut budget = TestBudget::default();
        let opts = options();

        run(&mut ledger, &mut budget, &opts).await.unwrap();

        assert_eq!(ledger.requests(), &[opts.window]);
    }
}
