//! Order placement and history handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caps_store_core::CapId;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::{Order, OrderItem};
use crate::services::{NewOrder, NewOrderLine, OrderService};
use crate::state::AppState;

/// One requested line in an order placement.
#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub cap_id: i64,
    pub quantity: i64,
}

/// Order placement request body.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub shipping_address: String,
    pub phone: String,
    pub items: Vec<OrderItemRequest>,
}

/// One line of a placed order.
#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: i64,
    pub cap_id: i64,
    pub cap_name: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id.as_i64(),
            cap_id: item.cap_id.as_i64(),
            cap_name: item.cap_name,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// A placed order with its line items.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: String,
    pub shipping_address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.as_i64(),
            user_id: order.user_id.as_i64(),
            total_amount: order.total_amount,
            status: order.status.as_str().to_owned(),
            shipping_address: order.shipping_address,
            phone: order.phone,
            created_at: order.created_at,
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// `POST /api/orders` - Place an order for the authenticated user.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let lines: Vec<NewOrderLine> = body
        .items
        .iter()
        .map(|item| NewOrderLine {
            cap_id: CapId::new(item.cap_id),
            quantity: item.quantity,
        })
        .collect();

    let service = OrderService::new(state.pool());

    let order = service
        .place_order(
            user.id,
            NewOrder {
                shipping_address: &body.shipping_address,
                phone: &body.phone,
                items: &lines,
            },
        )
        .await?;

    tracing::info!(order_id = %order.id, user_id = %user.id, "order placed");

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// `GET /api/orders` - List the authenticated user's orders, newest first.
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let service = OrderService::new(state.pool());

    let orders = service.list_for_user(user.id).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
