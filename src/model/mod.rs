//! Types that represent the data exchanged with Up and YNAB.
mod milliunits;
mod up;
mod ynab;

pub use milliunits::Milliunits;
pub use up::{
    MoneyObject, PageLinks, RelationshipData, ResourceRef, TransactionAttributes,
    TransactionRelationships, TransactionResource, TransactionStatus, TransactionsPage,
};
pub use ynab::{
    ClearedStatus, ErrorDetail, ErrorResponse, SaveTransaction, SaveTransactionsData,
    SaveTransactionsRequest, SaveTransactionsResponse,
};
