use caps_store_core::CapId;

use crate::db::RepositoryError;

/// Order placement errors.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order must contain at least one item")]
    EmptyOrder,

    #[error("invalid quantity {quantity} for cap {cap_id}")]
    InvalidQuantity { cap_id: CapId, quantity: i64 },

    #[error("cap {0} not found")]
    CapNotFound(CapId),

    #[error("insufficient stock for cap {cap_id}: requested {requested}, available {available}")]
    InsufficientStock {
        cap_id: CapId,
        requested: i64,
        available: i64,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
