use thiserror::Error;

use super::order::OrderId;

/// Errors raised by store operations. Lookup misses that callers are expected
/// to handle inline (`get_client_by_name`, `order`) return `Option` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("a client named \"{0}\" already exists")]
    DuplicateClient(String),
    #[error("no client named \"{0}\"")]
    ClientNotFound(String),
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
}
