//! Cap (product) domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use caps_store_core::CapId;

/// A catalog entry.
///
/// Created by the seed process; the only mutation in scope is the stock
/// decrement performed by order placement.
#[derive(Debug, Clone)]
pub struct Cap {
    pub id: CapId,
    pub name: String,
    /// Arabic name.
    pub name_ar: String,
    pub description: String,
    /// Arabic description.
    pub description_ar: String,
    /// Non-negative unit price.
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub brand: String,
    pub color: String,
    pub size: String,
    /// Available units; never negative.
    pub stock_quantity: i64,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a catalog entry (seed process).
#[derive(Debug, Clone)]
pub struct NewCap {
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub brand: String,
    pub color: String,
    pub size: String,
    pub stock_quantity: i64,
    pub is_featured: bool,
}
