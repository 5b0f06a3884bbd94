//! Implements the `Budget` trait with the YNAB REST API.

use crate::api::Budget;
use crate::model::{
    ErrorResponse, SaveTransaction, SaveTransactionsData, SaveTransactionsRequest,
    SaveTransactionsResponse,
};
use crate::{Config, Result};
use anyhow::{bail, Context};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, trace};
use url::Url;

/// Creates transactions with `POST /budgets/{budget_id}/transactions`.
pub(super) struct YnabClient {
    client: reqwest::Client,
    token: String,
    base_url: Url,
}

impl YnabClient {
    pub(super) fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: super::http_client("YNAB")?,
            token: config.ynab_api_token().to_string(),
            base_url: config.ynab_api_url().clone(),
        })
    }

    fn transactions_url(&self, budget_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("The YNAB API URL cannot be a base"))?
            .pop_if_empty()
            .extend(["budgets", budget_id, "transactions"]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Budget for YnabClient {
    async fn save_transactions(
        &mut self,
        budget_id: &str,
        transactions: &[SaveTransaction],
    ) -> Result<SaveTransactionsData> {
        if transactions.is_empty() {
            debug!("No transactions to send to YNAB");
            return Ok(SaveTransactionsData::default());
        }
        let url = self.transactions_url(budget_id)?;
        debug!("Sending {} transactions to YNAB", transactions.len());
        trace!("POST {url}");
        let request = SaveTransactionsRequest {
            transactions: transactions.to_vec(),
        };
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send the transactions to the YNAB API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            bail!("{}", describe_failure(status, &body));
        }

        let response: SaveTransactionsResponse = response
            .json()
            .await
            .context("Failed to parse the YNAB API response")?;
        Ok(response.data)
    }
}

/// Builds an error message from a failed YNAB response, using YNAB's error detail when the body
/// has the documented shape.
fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(e) => format!(
            "The YNAB API responded with status {status}: {} ({})",
            e.error.detail, e.error.name
        ),
        Err(_) => format!("The YNAB API responded with status {status}: {body}"),
    }
}
