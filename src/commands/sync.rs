use crate::api::Mode;
use crate::commands::Out;
use crate::sync::{SyncOptions, SyncReport};
use crate::{api, sync as pipeline, Config, Result};
use chrono::Utc;

/// Fetches recent transactions from Up and imports the settled ones into YNAB.
///
/// # Arguments
/// - `config` - The validated configuration.
/// - `mode` - Whether to use the real APIs or in-memory data.
/// - `dry_run` - Build the batch but do not send it to YNAB.
///
/// # Errors
/// - Returns an error if the clients cannot be created.
/// - Returns an error if YNAB rejects the batch. A failure to read from Up is reported in the
///   returned message instead.
pub async fn sync(config: Config, mode: Mode, dry_run: bool) -> Result<Out<SyncReport>> {
    let mut ledger = api::ledger(&config, mode)?;
    let mut budget = api::budget(&config, mode)?;
    let options = SyncOptions {
        budget_id: config.budget_id(),
        account_id: config.account_id(),
        window: config.window(Utc::now()),
        dry_run,
    };
    let report = pipeline::run(ledger.as_mut(), budget.as_mut(), &options).await?;
    Ok(Out::new(report.message(), report))
}
