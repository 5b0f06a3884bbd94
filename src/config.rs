//! Configuration handling for up-ynab.
//!
//! All configuration arrives through `Common` (flags, environment variables or a `.env` file). It
//! is validated here, before any client is created, so that a missing credential is reported
//! without touching the network.

use crate::args::Common;
use crate::Result;
use anyhow::{bail, ensure, Context};
use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, SubsecRound, Utc};
use std::fmt::{Debug, Formatter};
use url::Url;

const UP_API_URL: &str = "https://api.up.com.au/api/v1/";
const YNAB_API_URL: &str = "https://api.ynab.com/v1/";
const MAX_PAGE_SIZE: u32 = 100;
const MAX_LOOKBACK_WEEKS: u32 = 520;

const UP_API_TOKEN: &str = "UP_API_TOKEN";
const YNAB_API_TOKEN: &str = "YNAB_API_TOKEN";
const YNAB_BUDGET_ID: &str = "YNAB_BUDGET_ID";
const YNAB_ACCOUNT_ID: &str = "YNAB_ACCOUNT_ID";

/// The `Config` object holds the validated credentials, identifiers and settings for a sync. You
/// instantiate it with `Config::from_args`.
#[derive(Debug, Clone)]
pub struct Config {
    up_api_token: Token,
    ynab_api_token: Token,
    budget_id: String,
    account_id: String,
    lookback_weeks: u32,
    utc_offset: FixedOffset,
    page_size: u32,
    up_api_url: Url,
    ynab_api_url: Url,
}

impl Config {
    /// Validates `common` and builds a `Config` from it.
    ///
    /// # Errors
    /// - Returns an error naming every required value that is missing or blank.
    /// - Returns an error if `lookback_weeks` or `page_size` is out of range.
    /// - Returns an error if `utc_offset` cannot be parsed.
    pub fn from_args(common: &Common) -> Result<Self> {
        let required = [
            (UP_API_TOKEN, common.up_api_token()),
            (YNAB_API_TOKEN, common.ynab_api_token()),
            (YNAB_BUDGET_ID, common.ynab_budget_id()),
            (YNAB_ACCOUNT_ID, common.ynab_account_id()),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.map(str::trim).unwrap_or_default().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            bail!(
                "Missing required configuration: {}. Set these in the environment, in a .env file \
                in the current directory, or pass them as command line flags.",
                missing.join(", ")
            );
        }

        ensure!(
            (1..=MAX_LOOKBACK_WEEKS).contains(&common.lookback_weeks()),
            "The lookback window must be between 1 and {MAX_LOOKBACK_WEEKS} weeks, got {}",
            common.lookback_weeks()
        );
        ensure!(
            (1..=MAX_PAGE_SIZE).contains(&common.page_size()),
            "The page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            common.page_size()
        );
        let utc_offset = parse_utc_offset(common.utc_offset())?;

        Ok(Self {
            up_api_token: Token::new(common.up_api_token()),
            ynab_api_token: Token::new(common.ynab_api_token()),
            budget_id: trimmed(common.ynab_budget_id()),
            account_id: trimmed(common.ynab_account_id()),
            lookback_weeks: common.lookback_weeks(),
            utc_offset,
            page_size: common.page_size(),
            up_api_url: Url::parse(UP_API_URL).context("Invalid Up API URL")?,
            ynab_api_url: Url::parse(YNAB_API_URL).context("Invalid YNAB API URL")?,
        })
    }

    pub fn up_api_token(&self) -> &str {
        self.up_api_token.as_str()
    }

    pub fn ynab_api_token(&self) -> &str {
        self.ynab_api_token.as_str()
    }

    pub fn budget_id(&self) -> &str {
        &self.budget_id
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn lookback_weeks(&self) -> u32 {
        self.lookback_weeks
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The base URL of the Up API, ending with a slash.
    pub fn up_api_url(&self) -> &Url {
        &self.up_api_url
    }

    /// The base URL of the YNAB API, ending with a slash.
    pub fn ynab_api_url(&self) -> &Url {
        &self.ynab_api_url
    }

    /// Points both API clients at `base`, e.g. a local test server.
    #[cfg(test)]
    pub(crate) fn with_api_url(mut self, base: &Url) -> Self {
        self.up_api_url = base.clone();
        self.ynab_api_url = base.clone();
        self
    }

    /// The fetch window ending at `now`.
    pub fn window(&self, now: DateTime<Utc>) -> Window {
        Window::ending_at(now, self.lookback_weeks, self.utc_offset)
    }
}

/// The range of creation times to fetch, expressed in the configured UTC offset.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Window {
    since: DateTime<FixedOffset>,
    until: DateTime<FixedOffset>,
}

impl Window {
    /// Creates a window that ends at `now`, truncated to whole seconds, and starts `weeks` weeks
    /// earlier.
    pub fn ending_at(now: DateTime<Utc>, weeks: u32, offset: FixedOffset) -> Self {
        let until = now.with_timezone(&offset).trunc_subsecs(0);
        let since = until - Duration::weeks(i64::from(weeks));
        Self { since, until }
    }

    pub fn since(&self) -> DateTime<FixedOffset> {
        self.since
    }

    pub fn until(&self) -> DateTime<FixedOffset> {
        self.until
    }

    /// `since` as an RFC 3339 string, e.g. `2024-03-05T10:00:00+10:00`.
    pub fn since_rfc3339(&self) -> String {
        self.since.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// `until` as an RFC 3339 string, e.g. `2024-03-19T10:00:00+10:00`.
    pub fn until_rfc3339(&self) -> String {
        self.until.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

/// An API token. Its `Debug` output is redacted so that it never ends up in logs.
#[derive(Clone, Eq, PartialEq)]
struct Token(String);

impl Token {
    fn new(value: Option<&str>) -> Self {
        Self(trimmed(value))
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Parses a UTC offset such as `+10:00`, `-0530`, `+10`, `Z` or `UTC`.
fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("Unable to create the UTC offset");
    }

    let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (-1, rest)
    } else {
        bail!("Invalid UTC offset '{s}': expected something like +10:00, -05:30 or Z")
    };

    // A colon may only separate hours from minutes.
    let digits = match rest.split_once(':') {
        Some((hours, minutes)) if hours.len() == 2 && minutes.len() == 2 => {
            format!("{hours}{minutes}")
        }
        Some(_) => bail!("Invalid UTC offset '{s}': expected something like +10:00, -05:30 or Z"),
        None => rest.to_string(),
    };
    ensure!(
        (digits.len() == 2 || digits.len() == 4) && digits.chars().all(|c| c.is_ascii_digit()),
        "Invalid UTC offset '{s}': expected something like +10:00, -05:30 or Z"
    );
    let hours: i32 = digits[..2].parse()?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse()?
    } else {
        0
    };
    ensure!(
        hours < 24 && minutes < 60,
        "Invalid UTC offset '{s}': hours must be below 24 and minutes below 60"
    );

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("Invalid UTC offset '{s}'"))
}
