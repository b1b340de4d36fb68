//! Order placement and history.
//!
//! Placement runs in two passes. A validation pass reads current stock and
//! rejects bad requests without touching the database state. The commit pass
//! then opens a single transaction and conditionally decrements stock line
//! by line; any line that no longer has enough stock aborts the whole
//! transaction, so a failed order never changes stock.

mod error;

pub use error::OrderError;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use caps_store_core::{CapId, UserId};

use crate::db::{self, CapRepository, OrderRepository, RepositoryError};
use crate::models::Order;

/// One requested order line.
#[derive(Debug, Clone, Copy)]
pub struct NewOrderLine {
    pub cap_id: CapId,
    pub quantity: i64,
}

/// Input for placing an order.
#[derive(Debug)]
pub struct NewOrder<'a> {
    pub shipping_address: &'a str,
    pub phone: &'a str,
    pub items: &'a [NewOrderLine],
}

/// Order placement and history service.
pub struct OrderService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order for `user_id`, decrementing stock atomically.
    ///
    /// Unit prices are snapshotted into the order lines at placement time,
    /// so later catalog price changes do not rewrite order history.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyOrder` if the request has no lines.
    /// Returns `OrderError::InvalidQuantity` for a non-positive quantity.
    /// Returns `OrderError::CapNotFound` if a referenced cap does not exist.
    /// Returns `OrderError::InsufficientStock` if any line exceeds the
    /// available stock; in that case no stock was changed.
    pub async fn place_order(
        &self,
        user_id: UserId,
        new_order: NewOrder<'_>,
    ) -> Result<Order, OrderError> {
        if new_order.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        // Validation pass: reject obviously bad requests before opening a
        // transaction. Stock can still change between this read and the
        // commit pass, which re-checks under the transaction.
        let caps = CapRepository::new(self.pool);
        for line in new_order.items {
            if line.quantity <= 0 {
                return Err(OrderError::InvalidQuantity {
                    cap_id: line.cap_id,
                    quantity: line.quantity,
                });
            }

            let cap = caps
                .get(line.cap_id)
                .await?
                .ok_or(OrderError::CapNotFound(line.cap_id))?;

            if cap.stock_quantity < line.quantity {
                return Err(OrderError::InsufficientStock {
                    cap_id: line.cap_id,
                    requested: line.quantity,
                    available: cap.stock_quantity,
                });
            }
        }

        // Commit pass: the conditional decrement is the first statement per
        // line, so the transaction takes its write lock up front and the
        // stock check and decrement are one atomic step.
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let mut total_amount = Decimal::ZERO;
        let mut lines = Vec::with_capacity(new_order.items.len());

        for line in new_order.items {
            let decremented = db::try_decrement_stock(&mut *tx, line.cap_id, line.quantity).await?;

            if !decremented {
                // Lost a race since the validation pass. Dropping the
                // transaction rolls back every decrement made so far.
                let available = db::stock_available(&mut *tx, line.cap_id)
                    .await?
                    .ok_or(OrderError::CapNotFound(line.cap_id))?;

                return Err(OrderError::InsufficientStock {
                    cap_id: line.cap_id,
                    requested: line.quantity,
                    available,
                });
            }

            let (_name, unit_price) = db::line_snapshot(&mut *tx, line.cap_id).await?;
            total_amount += unit_price * Decimal::from(line.quantity);
            lines.push((line.cap_id, line.quantity, unit_price));
        }

        let order_id = db::insert_order(
            &mut *tx,
            user_id,
            total_amount,
            new_order.shipping_address,
            new_order.phone,
            Utc::now(),
        )
        .await?;

        for (cap_id, quantity, unit_price) in lines {
            db::insert_order_item(&mut *tx, order_id, cap_id, quantity, unit_price).await?;
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        let orders = OrderRepository::new(self.pool);
        orders
            .get_with_items(order_id)
            .await?
            .ok_or(OrderError::Repository(RepositoryError::NotFound))
    }

    /// List a user's orders, newest first, with their line items.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        let orders = OrderRepository::new(self.pool);
        Ok(orders.list_for_user(user_id).await?)
    }
}
