//! Implements the `Ledger` and `Budget` traits using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without calling Up or YNAB.

use crate::api::{Budget, Ledger};
use crate::config::Window;
use crate::model::{SaveTransaction, SaveTransactionsData, TransactionResource, TransactionsPage};
use crate::Result;
use anyhow::{bail, Context};
use std::collections::BTreeSet;

/// An implementation of `Ledger` that returns transactions held in memory. Every requested window
/// is recorded so tests can check what was asked for.
#[derive(Debug, Clone, Default)]
pub struct TestLedger {
    transactions: Vec<TransactionResource>,
    fail_with: Option<String>,
    requests: Vec<Window>,
}

impl TestLedger {
    /// Create a `TestLedger` that returns `transactions` regardless of the window.
    pub fn new(transactions: Vec<TransactionResource>) -> Self {
        Self {
            transactions,
            fail_with: None,
            requests: Vec::new(),
        }
    }

    /// Create a `TestLedger` whose every request fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            transactions: Vec::new(),
            fail_with: Some(message.into()),
            requests: Vec::new(),
        }
    }

    /// Create a `TestLedger` holding the seed data from this module.
    pub fn seeded() -> Result<Self> {
        let page: TransactionsPage =
            serde_json::from_str(SEED_TRANSACTIONS).context("Unable to parse the seed data")?;
        Ok(Self::new(page.data))
    }

    /// The windows that have been requested so far.
    pub fn requests(&self) -> &[Window] {
        &self.requests
    }
}

#[async_trait::async_trait]
impl Ledger for TestLedger {
    async fn transactions(&mut self, window: &Window) -> Result<Vec<TransactionResource>> {
        self.requests.push(*window);
        if let Some(message) = &self.fail_with {
            bail!("{message}");
        }
        Ok(self.transactions.clone())
    }
}

/// The requests a `TestBudget` has received and the import IDs it has accepted.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TestBudgetState {
    /// One entry per `save_transactions` call: the budget ID and the batch.
    pub requests: Vec<(String, Vec<SaveTransaction>)>,
    /// Every import ID that has been created, used to report duplicates like YNAB does.
    pub import_ids: BTreeSet<String>,
}

/// An implementation of `Budget` that accepts transactions into memory, reporting an import ID it
/// has already seen as a duplicate.
#[derive(Debug, Clone, Default)]
pub struct TestBudget {
    state: TestBudgetState,
    fail_with: Option<String>,
}

impl TestBudget {
    /// Create a `TestBudget` whose every request fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            state: TestBudgetState::default(),
            fail_with: Some(message.into()),
        }
    }

    pub fn state(&self) -> &TestBudgetState {
        &self.state
    }
}

#[async_trait::async_trait]
impl Budget for TestBudget {
    async fn save_transactions(
        &mut self,
        budget_id: &str,
        transactions: &[SaveTransaction],
    ) -> Result<SaveTransactionsData> {
        self.state
            .requests
            .push((budget_id.to_string(), transactions.to_vec()));
        if let Some(message) = &self.fail_with {
            bail!("{message}");
        }

        let mut data = SaveTransactionsData::default();
        for transaction in transactions {
            if self.state.import_ids.insert(transaction.import_id.clone()) {
                data.transaction_ids
                    .push(format!("ynab-{}", transaction.import_id));
            } else {
                data.duplicate_import_ids
                    .push(transaction.import_id.clone());
            }
        }
        data.server_knowledge = Some(self.state.requests.len() as i64);
        Ok(data)
    }
}

/// Seed transaction data in the shape returned by the Up API: two plain settled purchases, a
/// settled transfer to savings, a held purchase and a settled refund.
const SEED_TRANSACTIONS: &str = r##"{
  "data": [
    {
      "type": "transactions",
      "id": "3c5e8a10-2f4b-4d6e-9a1c-7b8d9e0f1a21",
      "attributes": {
        "status": "SETTLED",
        "rawText": "WOOLWORTHS 3342 SYDNEY",
        "description": "Woolworths",
        "message": null,
        "amount": { "currencyCode": "AUD", "value": "-87.43", "valueInBaseUnits": -8743 },
        "createdAt": "2025-10-20T09:15:30+11:00",
        "settledAt": "2025-10-21T04:00:00+11:00"
      },
      "relationships": { "transferAccount": { "data": null } }
    },
    {
      "type": "transactions",
      "id": "9d2f1b47-6c3a-4e85-b0d9-2a7c4f6e8b32",
      "attributes": {
        "status": "SETTLED",
        "rawText": null,
        "description": "Transfer to Savings",
        "message": "rainy day fund",
        "amount": { "currencyCode": "AUD", "value": "-200.00", "valueInBaseUnits": -20000 },
        "createdAt": "2025-10-19T18:00:00+11:00",
        "settledAt": "2025-10-19T18:00:00+11:00"
      },
      "relationships": {
        "transferAccount": { "data": { "type": "accounts", "id": "savings-1" } }
      }
    },
    {
      "type": "transactions",
      "id": "5a7b9c1d-3e4f-4a6b-8c9d-0e1f2a3b4c43",
      "attributes": {
        "status": "HELD",
        "rawText": "SQ *COFFEE CART",
        "description": "Coffee Cart",
        "message": null,
        "amount": { "currencyCode": "AUD", "value": "-5.50", "valueInBaseUnits": -550 },
        "createdAt": "2025-10-21T08:02:11+11:00",
        "settledAt": null
      },
      "relationships": { "transferAccount": { "data": null } }
    },
    {
      "type": "transactions",
      "id": "e1f2a3b4-c5d6-4e7f-8a9b-0c1d2e3f4a54",
      "attributes": {
        "status": "SETTLED",
        "rawText": "SHELL COLES EXPRESS",
        "description": "Shell Coles Express",
        "message": null,
        "amount": { "currencyCode": "AUD", "value": "-52.30", "valueInBaseUnits": -5230 },
        "createdAt": "2025-10-18T07:22:45+11:00",
        "settledAt": "2025-10-19T03:00:00+11:00"
      },
      "relationships": { "transferAccount": { "data": null } }
    },
    {
      "type": "transactions",
      "id": "7f8e9d0c-1b2a-4938-8475-6a5b4c3d2e65",
      "attributes": {
        "status": "SETTLED",
        "rawText": "JB HI-FI REFUND",
        "description": "JB Hi-Fi",
        "message": "returned cable",
        "amount": { "currencyCode": "AUD", "value": "24.95", "valueInBaseUnits": 2495 },
        "createdAt": "2025-10-17T13:40:00+11:00",
        "settledAt": "2025-10-18T02:00:00+11:00"
      },
      "relationships": { "transferAccount": { "data": null } }
    }
  ],
  "links": { "prev": null, "next": null }
}"##;
