//! Implements the `Ledger` trait with the Up Bank REST API.

use crate::api::Ledger;
use crate::config::Window;
use crate::model::{TransactionResource, TransactionsPage};
use crate::{Config, Result};
use anyhow::{bail, Context};
use tracing::{debug, trace};
use url::Url;

/// Fetches transactions from `GET /transactions`, following `links.next` until it is `null`.
pub(super) struct UpClient {
    client: reqwest::Client,
    token: String,
    transactions_url: Url,
    page_size: u32,
}

impl UpClient {
    pub(super) fn new(config: &Config) -> Result<Self> {
        let transactions_url = config
            .up_api_url()
            .join("transactions")
            .context("Unable to build the Up transactions URL")?;
        Ok(Self {
            client: super::http_client("Up")?,
            token: config.up_api_token().to_string(),
            transactions_url,
            page_size: config.page_size(),
        })
    }

    /// The URL of the first page. Subsequent pages come from `links.next`.
    fn first_page_url(&self, window: &Window) -> Url {
        let mut url = self.transactions_url.clone();
        url.query_pairs_mut()
            .append_pair("filter[since]", &window.since_rfc3339())
            .append_pair("filter[until]", &window.until_rfc3339())
            .append_pair("page[size]", &self.page_size.to_string());
        url
    }

    async fn get_page(&self, url: &str) -> Result<TransactionsPage> {
        trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to send the transactions request to the Up API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            bail!("The Up API responded with status {status}: {body}");
        }

        response
            .json()
            .await
            .context("Failed to parse the Up API transactions response")
    }
}

#[async_trait::async_trait]
impl Ledger for UpClient {
    async fn transactions(&mut self, window: &Window) -> Result<Vec<TransactionResource>> {
        let mut transactions = Vec::new();
        let mut next = Some(self.first_page_url(window).to_string());
        let mut pages = 0usize;
        while let Some(url) = next {
            let page = self.get_page(&url).await?;
            pages += 1;
            trace!("Page {pages} held {} transactions", page.data.len());
            transactions.extend(page.data);
            next = page.links.next;
        }
        debug!(
            "Fetched {} transactions from Up in {pages} page(s)",
            transactions.len()
        );
        Ok(transactions)
    }
}
