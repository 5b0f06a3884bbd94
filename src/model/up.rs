//! Types that mirror the Up Bank API `/transactions` response.
//!
//! Only the fields this program reads are modelled; anything else in the response is ignored.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One page of results from `GET /transactions`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionsPage {
    pub data: Vec<TransactionResource>,
    #[serde(default)]
    pub links: PageLinks,
}

/// The pagination envelope. `next` is `None` on the last page.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// A single Up transaction.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionResource {
    pub id: String,
    pub attributes: TransactionAttributes,
    #[serde(default)]
    pub relationships: TransactionRelationships,
}

impl TransactionResource {
    pub fn is_settled(&self) -> bool {
        self.attributes.status == TransactionStatus::Settled
    }

    /// Returns `true` when the transaction moved money between two of the customer's own Up
    /// accounts.
    pub fn is_transfer(&self) -> bool {
        self.relationships
            .transfer_account
            .as_ref()
            .is_some_and(|r| r.data.is_some())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAttributes {
    pub status: TransactionStatus,
    #[serde(default)]
    pub raw_text: Option<String>,
    pub description: String,
    #[serde(default)]
    pub message: Option<String>,
    pub amount: MoneyObject,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub settled_at: Option<DateTime<FixedOffset>>,
}

/// The settlement status of an Up transaction.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Held,
    Settled,
    #[serde(other)]
    Other,
}

serde_plain::derive_display_from_serialize!(TransactionStatus);

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyObject {
    pub currency_code: String,
    /// A decimal string such as `"-12.34"`. Kept for display only.
    pub value: String,
    /// The amount in the smallest unit of the currency, e.g. cents.
    pub value_in_base_units: i64,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRelationships {
    #[serde(default)]
    pub transfer_account: Option<RelationshipData>,
}

/// A to-one relationship. `data` is `null` when no related resource exists.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RelationshipData {
    #[serde(default)]
    pub data: Option<ResourceRef>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}
