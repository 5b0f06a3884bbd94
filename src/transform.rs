//! Reshapes Up transactions into YNAB transactions.
//!
//! Everything here is a pure function of its inputs.

use crate::model::{
    ClearedStatus, Milliunits, SaveTransaction, TransactionResource, TransactionStatus,
};
use crate::Result;
use anyhow::Context;

/// YNAB rejects payee names longer than this.
const MAX_PAYEE_NAME_CHARS: usize = 200;

/// YNAB rejects memos longer than this.
const MAX_MEMO_CHARS: usize = 500;

/// Returns `true` if `tx` should be imported: it has settled and it is not a transfer between two
/// of the customer's own accounts (which would otherwise be counted twice).
pub fn is_importable(tx: &TransactionResource) -> bool {
    tx.is_settled() && !tx.is_transfer()
}

/// The YNAB `import_id` for `tx`. Up IDs are already globally unique, so the ID alone is used;
/// this keeps the key identical across runs whose windows overlap.
pub fn import_id(tx: &TransactionResource) -> String {
    tx.id.clone()
}

/// Converts a single Up transaction into a YNAB transaction for `account_id`. This does not apply
/// the inclusion filter; see `is_importable`.
///
/// # Errors
/// - Returns an error if the amount overflows when converted to milliunits.
pub fn to_save_transaction(tx: &TransactionResource, account_id: &str) -> Result<SaveTransaction> {
    let attributes = &tx.attributes;
    let amount = Milliunits::from_base_units(attributes.amount.value_in_base_units)
        .with_context(|| format!("Unable to convert the amount of transaction {}", tx.id))?;
    let settled = attributes.status == TransactionStatus::Settled;
    Ok(SaveTransaction {
        account_id: account_id.to_string(),
        // The date as written in the timestamp, i.e. in the offset Up reported it in.
        date: attributes.created_at.date_naive(),
        amount,
        payee_name: truncate(&attributes.description, MAX_PAYEE_NAME_CHARS),
        cleared: if settled {
            ClearedStatus::Cleared
        } else {
            ClearedStatus::Uncleared
        },
        approved: settled,
        import_id: import_id(tx),
        memo: truncate(
            attributes.message.as_deref().unwrap_or_default(),
            MAX_MEMO_CHARS,
        ),
    })
}

/// Filters `transactions` with `is_importable` and converts the survivors, preserving order.
///
/// # Errors
/// - Returns an error if any included transaction cannot be converted. No partial batch is
///   returned.
pub fn transform<'a, I>(transactions: I, account_id: &str) -> Result<Vec<SaveTransaction>>
where
    I: IntoIterator<Item = &'a TransactionResource>,
{
    transactions
        .into_iter()
        .filter(|tx| is_importable(tx))
        .map(|tx| to_save_transaction(tx, account_id))
        .collect()
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
