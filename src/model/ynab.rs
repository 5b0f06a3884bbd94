//! Types for the YNAB `POST /budgets/{budget_id}/transactions` request and response.

use crate::model::Milliunits;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A transaction to be created in YNAB.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SaveTransaction {
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: Milliunits,
    pub payee_name: String,
    pub cleared: ClearedStatus,
    pub approved: bool,
    /// YNAB refuses to create a second transaction with the same `import_id` in an account.
    pub import_id: String,
    pub memo: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearedStatus {
    Cleared,
    Uncleared,
}

serde_plain::derive_display_from_serialize!(ClearedStatus);
serde_plain::derive_fromstr_from_deserialize!(ClearedStatus);

/// The request body: a single key holding the whole batch.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SaveTransactionsRequest {
    pub transactions: Vec<SaveTransaction>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SaveTransactionsResponse {
    pub data: SaveTransactionsData,
}

/// YNAB's acknowledgement of a batch write.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SaveTransactionsData {
    /// IDs of the transactions that were created.
    #[serde(default)]
    pub transaction_ids: Vec<String>,
    /// Import IDs that were rejected because they already exist in the account.
    #[serde(default)]
    pub duplicate_import_ids: Vec<String>,
    #[serde(default)]
    pub server_knowledge: Option<i64>,
}

/// The body YNAB returns with a non-2xx status.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub id: String,
    pub name: String,
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_request() {
        let request = SaveTransactionsRequest {
            transactions: vec![SaveTransaction {
                account_id: "acct-1".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                amount: Milliunits::new(-12340),
                payee_name: "Woolworths".to_string(),
                cleared: ClearedStatus::Cleared,
                approved: true,
                import_id: "7a6b2c1e".to_string(),
                memo: String::new(),
            }],
        };
        let actual = serde_json::to_value(&request).unwrap();
        let expected = json!({
            "transactions": [{
                "account_id": "acct-1",
                "date": "2024-03-05",
                "amount": -12340,
                "payee_name": "Woolworths",
                "cleared": "cleared",
                "approved": true,
                "import_id": "7a6b2c1e",
                "memo": ""
            }]
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_deserialize_response() {
        let json = r#"{
            "data": {
                "transaction_ids": ["t1", "t2"],
                "transaction": null,
                "transactions": [],
                "duplicate_import_ids": ["dup-1"],
                "server_knowledge": 42
            }
        }"#;
        let response: SaveTransactionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.transaction_ids, vec!["t1", "t2"]);
        assert_eq!(response.data.duplicate_import_ids, vec!["dup-1"]);
        assert_eq!(response.data.server_knowledge, Some(42));
    }

    #[test]
    fn test_deserialize_sparse_response() {
        let response: SaveTransactionsResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(response.data.transaction_ids.is_empty());
        assert!(response.data.duplicate_import_ids.is_empty());
        assert!(response.data.server_knowledge.is_none());
    }

    #[test]
    fn test_deserialize_error() {
        let json = r#"{"error": {"id": "400", "name": "bad_request", "detail": "Bad date"}}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.name, "bad_request");
        assert_eq!(response.error.detail, "Bad date");
    }

    #[test]
    fn test_cleared_status_strings() {
        assert_eq!(ClearedStatus::Uncleared.to_string(), "uncleared");
        assert_eq!(
            "cleared".parse::<ClearedStatus>().unwrap(),
            ClearedStatus::Cleared
        );
    }
}
