//! The two remote services this program talks to, behind traits so that tests (and test mode)
//! can substitute in-memory implementations.
//!
//! - `Ledger` is the source of transactions (Up Bank).
//! - `Budget` is the destination of transactions (YNAB).

mod test_client;
mod up;
mod ynab;

use crate::config::Window;
use crate::model::{SaveTransaction, SaveTransactionsData, TransactionResource};
use crate::{Config, Result};
use anyhow::Context;
use tracing::debug;

pub use test_client::{TestBudget, TestBudgetState, TestLedger};

/// When this environment variable is set to a non-empty value the program runs against
/// in-memory data instead of the real APIs.
const TEST_MODE_ENV: &str = "UP_YNAB_SYNC_IN_TEST_MODE";

/// Reads transactions from the source ledger.
#[async_trait::async_trait]
pub trait Ledger {
    /// Returns every transaction created within `window`, following pagination until the last
    /// page, in the order the service returned them.
    async fn transactions(&mut self, window: &Window) -> Result<Vec<TransactionResource>>;
}

/// Writes transactions to the destination budget.
#[async_trait::async_trait]
pub trait Budget {
    /// Creates `transactions` in the budget identified by `budget_id` with a single request and
    /// returns the service's acknowledgement.
    async fn save_transactions(
        &mut self,
        budget_id: &str,
        transactions: &[SaveTransaction],
    ) -> Result<SaveTransactionsData>;
}

/// Whether to use the real APIs or in-memory data.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Live,
    Test,
}

impl Mode {
    /// Returns `Mode::Test` when `UP_YNAB_SYNC_IN_TEST_MODE` is set and non-empty, otherwise
    /// `Mode::Live`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Live,
        }
    }
}

/// Creates the `Ledger` for `mode`.
pub fn ledger(config: &Config, mode: Mode) -> Result<Box<dyn Ledger + Send>> {
    debug!("Creating the {mode:?} ledger client");
    let ledger: Box<dyn Ledger + Send> = match mode {
        Mode::Live => Box::new(up::UpClient::new(config)?),
        Mode::Test => Box::new(TestLedger::seeded()?),
    };
    Ok(ledger)
}

/// Creates the `Budget` for `mode`.
pub fn budget(config: &Config, mode: Mode) -> Result<Box<dyn Budget + Send>> {
    debug!("Creating the {mode:?} budget client");
    let budget: Box<dyn Budget + Send> = match mode {
        Mode::Live => Box::new(ynab::YnabClient::new(config)?),
        Mode::Test => Box::new(TestBudget::default()),
    };
    Ok(budget)
}

/// The HTTP client shared by the live implementations.
fn http_client(service: &str) -> Result<reqwest::Client> {
    let builder = reqwest::Client::builder().user_agent(crate::USER_AGENT);
    // Tests talk to a server on the loopback interface.
    #[cfg(test)]
    let builder = builder.no_proxy();
    builder
        .build()
        .with_context(|| format!("Unable to create the HTTP client for {service}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{complete_args, window};

    #[tokio::test]
    async fn test_test_mode_clients() {
        let config = Config::from_args(&complete_args()).unwrap();
        let mut ledger = ledger(&config, Mode::Test).unwrap();
        let transactions = ledger.transactions(&window()).await.unwrap();
        assert!(!transactions.is_empty());

        let mut budget = budget(&config, Mode::Test).unwrap();
        let ack = budget.save_transactions("budget-1", &[]).await.unwrap();
        assert!(ack.transaction_ids.is_empty());
    }

    #[test]
    fn test_live_mode_clients_build() {
        let config = Config::from_args(&complete_args()).unwrap();
        assert!(ledger(&config, Mode::Live).is_ok());
        assert!(budget(&config, Mode::Live).is_ok());
    }
}
