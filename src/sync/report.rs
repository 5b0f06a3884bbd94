//! The outcome of a sync, for printing.

use crate::model::{Milliunits, SaveTransaction, SaveTransactionsData};
use serde::Serialize;
use std::fmt::Write;

/// What a sync run did.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncReport {
    /// Up could not be read; nothing was sent to YNAB.
    FetchUnavailable { reason: String },
    /// Up had no transactions in the window; nothing was sent to YNAB.
    NothingFetched,
    /// Up had transactions, but none passed the filter; nothing was sent to YNAB.
    NothingToImport { fetched: usize },
    /// `--dry-run` was given; `transactions` is what would have been sent.
    DryRun {
        fetched: usize,
        transactions: Vec<SaveTransaction>,
    },
    /// The batch was sent to YNAB.
    Submitted(SubmitSummary),
}

/// Counts describing a batch that was sent to YNAB.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct SubmitSummary {
    /// Transactions returned by Up.
    pub fetched: usize,
    /// Transactions filtered out (not settled, or transfers).
    pub skipped: usize,
    /// Transactions sent to YNAB.
    pub submitted: usize,
    /// Transactions YNAB created.
    pub created: usize,
    /// Transactions YNAB had already imported on an earlier run.
    pub duplicates: usize,
    /// The sum of the amounts sent.
    pub total: Milliunits,
    pub transaction_ids: Vec<String>,
    pub duplicate_import_ids: Vec<String>,
    pub server_knowledge: Option<i64>,
}

impl SubmitSummary {
    pub fn new(fetched: usize, batch: &[SaveTransaction], ack: SaveTransactionsData) -> Self {
        let total = batch
            .iter()
            .fold(0i64, |sum, t| sum.saturating_add(t.amount.value()));
        Self {
            fetched,
            skipped: fetched.saturating_sub(batch.len()),
            submitted: batch.len(),
            created: ack.transaction_ids.len(),
            duplicates: ack.duplicate_import_ids.len(),
            total: Milliunits::new(total),
            transaction_ids: ack.transaction_ids,
            duplicate_import_ids: ack.duplicate_import_ids,
            server_knowledge: ack.server_knowledge,
        }
    }
}

impl SyncReport {
    /// A human-readable description of the outcome.
    pub fn message(&self) -> String {
        match self {
            SyncReport::FetchUnavailable { reason } => {
                format!("Unable to fetch transactions from Up, nothing was imported: {reason}")
            }
            SyncReport::NothingFetched => {
                "Up returned no transactions for the time window, nothing to import".to_string()
            }
            SyncReport::NothingToImport { fetched } => {
                let eligible = if *fetched == 1 {
                    "is a settled purchase"
                } else {
                    "are settled purchases"
                };
                format!(
                    "None of the {fetched} transaction{} from Up {eligible}, nothing to import",
                    plural(*fetched)
                )
            }
            SyncReport::DryRun {
                fetched,
                transactions,
            } => {
                let mut message = format!(
                    "Dry run: {} of {fetched} transaction{} would be sent to YNAB",
                    transactions.len(),
                    plural(*fetched)
                );
                for t in transactions {
                    let _ = write!(
                        message,
                        "\n  {}  {:>12}  {}",
                        t.date,
                        t.amount.to_string(),
                        t.payee_name
                    );
                }
                message
            }
            SyncReport::Submitted(summary) => format!(
                "Imported {} new transaction{} ({}) into YNAB; {} already imported, {} of {} \
                skipped",
                summary.created,
                plural(summary.created),
                summary.total,
                summary.duplicates,
                summary.skipped,
                summary.fetched
            ),
        }
    }

    /// Whether anything was sent to YNAB.
    pub fn submitted(&self) -> bool {
        matches!(self, SyncReport::Submitted(_))
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
