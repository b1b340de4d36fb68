//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use caps_store_core::{CapId, OrderId, OrderItemId, OrderStatus, UserId};

/// A placed order with its line items.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Sum of `price * quantity` over `items`; derived, never set directly.
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A single line of an order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub cap_id: CapId,
    /// Positive unit count.
    pub quantity: i64,
    /// Unit price captured at placement time. Later catalog price changes
    /// do not alter historical orders.
    pub price: Decimal,
    /// Cap name joined at read time for display; not stored on the item.
    pub cap_name: String,
}
