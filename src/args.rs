//! These structs provide the CLI interface for the up-ynab CLI.

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

/// Weeks of history fetched when not configured.
pub const DEFAULT_LOOKBACK_WEEKS: u32 = 2;

/// Australian Eastern Standard Time, where Up is based.
pub const DEFAULT_UTC_OFFSET: &str = "+10:00";

/// The largest page size the Up API accepts.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// up-ynab: Import your recent Up Bank transactions into YNAB.
///
/// Each run fetches the transactions created in the last few weeks from the Up API, keeps the ones
/// that have settled (skipping transfers between your own Up accounts) and creates them in a YNAB
/// account in a single request. YNAB ignores transactions it has already imported, so it is safe
/// to run this as often as you like.
///
/// Every option can also be provided through the environment or a `.env` file in the current
/// directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    /// Print the transactions that would be sent to YNAB instead of sending them.
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Credentials, identifiers and settings needed for a sync.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// Your Up Bank personal access token.
    #[arg(long, env = "UP_API_TOKEN", hide_env_values = true)]
    up_api_token: Option<String>,

    /// Your YNAB personal access token.
    #[arg(long, env = "YNAB_API_TOKEN", hide_env_values = true)]
    ynab_api_token: Option<String>,

    /// The ID of the YNAB budget to import into.
    #[arg(long, env = "YNAB_BUDGET_ID")]
    ynab_budget_id: Option<String>,

    /// The ID of the account, within the YNAB budget, that the transactions belong to.
    #[arg(long, env = "YNAB_ACCOUNT_ID")]
    ynab_account_id: Option<String>,

    /// How many weeks back from now to fetch transactions for.
    #[arg(long, env = "UP_YNAB_LOOKBACK_WEEKS", default_value_t = DEFAULT_LOOKBACK_WEEKS)]
    lookback_weeks: u32,

    /// The UTC offset used to compute the fetch window, e.g. +10:00 or Z.
    #[arg(long, env = "UP_YNAB_UTC_OFFSET", default_value = DEFAULT_UTC_OFFSET)]
    utc_offset: String,

    /// How many transactions to request from Up per page (at most 100).
    #[arg(long, env = "UP_YNAB_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

impl Common {
    /// Creates a `Common` with no credentials and default settings.
    pub fn new(log_level: LevelFilter) -> Self {
        Self {
            log_level,
            up_api_token: None,
            ynab_api_token: None,
            ynab_budget_id: None,
            ynab_account_id: None,
            lookback_weeks: DEFAULT_LOOKBACK_WEEKS,
            utc_offset: DEFAULT_UTC_OFFSET.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn up_api_token(&self) -> Option<&str> {
        self.up_api_token.as_deref()
    }

    pub fn ynab_api_token(&self) -> Option<&str> {
        self.ynab_api_token.as_deref()
    }

    pub fn ynab_budget_id(&self) -> Option<&str> {
        self.ynab_budget_id.as_deref()
    }

    pub fn ynab_account_id(&self) -> Option<&str> {
        self.ynab_account_id.as_deref()
    }

    pub fn lookback_weeks(&self) -> u32 {
        self.lookback_weeks
    }

    pub fn utc_offset(&self) -> &str {
        &self.utc_offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn with_up_api_token(mut self, value: impl Into<String>) -> Self {
        self.up_api_token = Some(value.into());
        self
    }

    pub fn with_ynab_api_token(mut self, value: impl Into<String>) -> Self {
        self.ynab_api_token = Some(value.into());
        self
    }

    pub fn with_ynab_budget_id(mut self, value: impl Into<String>) -> Self {
        self.ynab_budget_id = Some(value.into());
        self
    }

    pub fn with_ynab_account_id(mut self, value: impl Into<String>) -> Self {
        self.ynab_account_id = Some(value.into());
        self
    }

    pub fn with_lookback_weeks(mut self, value: u32) -> Self {
        self.lookback_weeks = value;
        self
    }

    pub fn with_utc_offset(mut self, value: impl Into<String>) -> Self {
        self.utc_offset = value.into();
        self
    }

    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["up-ynab"]).unwrap();
        assert!(!args.dry_run());
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "up-ynab",
            "--dry-run",
            "--log-level",
            "debug",
            "--up-api-token",
            "up:yeah:abc",
            "--ynab-budget-id",
            "budget-1",
            "--lookback-weeks",
            "4",
            "--utc-offset",
            "Z",
        ])
        .unwrap();
        assert!(args.dry_run());
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert_eq!(args.common().up_api_token(), Some("up:yeah:abc"));
        assert_eq!(args.common().ynab_budget_id(), Some("budget-1"));
        assert_eq!(args.common().lookback_weeks(), 4);
        assert_eq!(args.common().utc_offset(), "Z");
    }
}
