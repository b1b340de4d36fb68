//! Order repository.
//!
//! Reads go through [`OrderRepository`]. The write path of order placement
//! is a set of helpers over a [`SqliteConnection`] so the order service can
//! compose them inside a single transaction: the stock decrement, the price
//! snapshot, and the order/item inserts either all land or none do.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};

use caps_store_core::{CapId, OrderId, OrderItemId, OrderStatus, UserId};

use super::{RepositoryError, parse_decimal};
use crate::models::{Order, OrderItem};

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    total_amount: String,
    status: String,
    shipping_address: String,
    phone: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
        let total_amount = parse_decimal(&self.total_amount, "orders.total_amount")?;
        let status: OrderStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            total_amount,
            status,
            shipping_address: self.shipping_address,
            phone: self.phone,
            created_at: self.created_at,
            items,
        })
    }
}

/// Internal row type for order item queries (cap name joined for display).
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    cap_id: i64,
    quantity: i64,
    price: String,
    cap_name: String,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let price = parse_decimal(&row.price, "order_items.price")?;

        Ok(Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            cap_id: CapId::new(row.cap_id),
            quantity: row.quantity,
            price,
            cap_name: row.cap_name,
        })
    }
}

/// Repository for order read operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's orders, newest first, each with its items and the
    /// referenced cap names joined for display.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let order_rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_amount, status, shipping_address, phone, created_at
            FROM orders
            WHERE user_id = ?
            ORDER BY id DESC
            ",
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT oi.id, oi.order_id, oi.cap_id, oi.quantity, oi.price,
                   c.name AS cap_name
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN caps c ON c.id = oi.cap_id
            WHERE o.user_id = ?
            ORDER BY oi.id ASC
            ",
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            let order_id = row.order_id;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(row.try_into()?);
        }

        order_rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }

    /// Get a single order with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_with_items(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_amount, status, shipping_address, phone, created_at
            FROM orders
            WHERE id = ?
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT oi.id, oi.order_id, oi.cap_id, oi.quantity, oi.price,
                   c.name AS cap_name
            FROM order_items oi
            JOIN caps c ON c.id = oi.cap_id
            WHERE oi.order_id = ?
            ORDER BY oi.id ASC
            ",
        )
        .bind(id.as_i64())
        .fetch_all(self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(OrderItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Some(row.into_order(items)).transpose()
    }
}

// =============================================================================
// Transaction helpers for the order placement commit pass
// =============================================================================

/// Atomically decrement a cap's stock if enough is available.
///
/// Returns `true` if the decrement happened. A `false` return means the
/// conditional matched no row - the cap is gone or the stock ran short
/// since the validation pass - and the caller must abort the transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn try_decrement_stock(
    conn: &mut SqliteConnection,
    cap_id: CapId,
    quantity: i64,
) -> Result<bool, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE caps
        SET stock_quantity = stock_quantity - ?
        WHERE id = ? AND stock_quantity >= ?
        ",
    )
    .bind(quantity)
    .bind(cap_id.as_i64())
    .bind(quantity)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Read a cap's current stock inside the transaction, to distinguish a
/// missing cap from an insufficient one after a failed decrement.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn stock_available(
    conn: &mut SqliteConnection,
    cap_id: CapId,
) -> Result<Option<i64>, RepositoryError> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT stock_quantity FROM caps WHERE id = ?")
        .bind(cap_id.as_i64())
        .fetch_optional(conn)
        .await?;

    Ok(row.map(|(stock,)| stock))
}

/// Snapshot a cap's name and unit price inside the transaction.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the cap does not exist.
/// Returns `RepositoryError::Database` if the query fails.
pub async fn line_snapshot(
    conn: &mut SqliteConnection,
    cap_id: CapId,
) -> Result<(String, Decimal), RepositoryError> {
    let row: Option<(String, String)> = sqlx::query_as("SELECT name, price FROM caps WHERE id = ?")
        .bind(cap_id.as_i64())
        .fetch_optional(conn)
        .await?;

    let (name, price) = row.ok_or(RepositoryError::NotFound)?;
    Ok((name, parse_decimal(&price, "caps.price")?))
}

/// Insert the order row with status `pending`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_order(
    conn: &mut SqliteConnection,
    user_id: UserId,
    total_amount: Decimal,
    shipping_address: &str,
    phone: &str,
    created_at: DateTime<Utc>,
) -> Result<OrderId, RepositoryError> {
    let (id,): (i64,) = sqlx::query_as(
        r"
        INSERT INTO orders (user_id, total_amount, status, shipping_address, phone, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        ",
    )
    .bind(user_id.as_i64())
    .bind(total_amount.to_string())
    .bind(OrderStatus::Pending.as_str())
    .bind(shipping_address)
    .bind(phone)
    .bind(created_at)
    .fetch_one(conn)
    .await?;

    Ok(OrderId::new(id))
}

/// Insert one line item with its snapshotted unit price.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_order_item(
    conn: &mut SqliteConnection,
    order_id: OrderId,
    cap_id: CapId,
    quantity: i64,
    price: Decimal,
) -> Result<OrderItemId, RepositoryError> {
    let (id,): (i64,) = sqlx::query_as(
        r"
        INSERT INTO order_items (order_id, cap_id, quantity, price)
        VALUES (?, ?, ?, ?)
        RETURNING id
        ",
    )
    .bind(order_id.as_i64())
    .bind(cap_id.as_i64())
    .bind(quantity)
    .bind(price.to_string())
    .fetch_one(conn)
    .await?;

    Ok(OrderItemId::new(id))
}
