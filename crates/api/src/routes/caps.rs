//! Catalog browsing handlers.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caps_store_core::CapId;

use crate::error::AppError;
use crate::models::Cap;
use crate::services::CatalogService;
use crate::state::AppState;

/// Query parameters for the cap listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Public view of a catalog cap.
#[derive(Debug, Serialize)]
pub struct CapResponse {
    pub id: i64,
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub brand: String,
    pub color: String,
    pub size: String,
    pub stock_quantity: i64,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Cap> for CapResponse {
    fn from(cap: Cap) -> Self {
        Self {
            id: cap.id.as_i64(),
            name: cap.name,
            name_ar: cap.name_ar,
            description: cap.description,
            description_ar: cap.description_ar,
            price: cap.price,
            image_url: cap.image_url,
            category: cap.category,
            brand: cap.brand,
            color: cap.color,
            size: cap.size,
            stock_quantity: cap.stock_quantity,
            is_featured: cap.is_featured,
            created_at: cap.created_at,
        }
    }
}

/// `GET /api/caps` - List caps with pagination and optional category filter.
pub async fn index(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<ListQuery>,
) -> Result<Json<Vec<CapResponse>>, AppError> {
    let catalog = CatalogService::new(state.pool());

    let caps = catalog
        .list(query.skip, query.limit, query.category.as_deref())
        .await?;

    Ok(Json(caps.into_iter().map(Into::into).collect()))
}

/// `GET /api/caps/featured` - List featured caps.
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<CapResponse>>, AppError> {
    let catalog = CatalogService::new(state.pool());

    let caps = catalog.list_featured().await?;

    Ok(Json(caps.into_iter().map(Into::into).collect()))
}

/// `GET /api/caps/{id}` - Fetch a single cap.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CapResponse>, AppError> {
    let catalog = CatalogService::new(state.pool());

    let cap = catalog.get(CapId::new(id)).await?;

    Ok(Json(cap.into()))
}
