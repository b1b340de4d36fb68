//! Cap (product) repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use caps_store_core::CapId;

use super::{RepositoryError, parse_decimal};
use crate::models::Cap;
use crate::models::cap::NewCap;

/// Internal row type for cap queries.
#[derive(Debug, sqlx::FromRow)]
struct CapRow {
    id: i64,
    name: String,
    name_ar: String,
    description: String,
    description_ar: String,
    price: String,
    image_url: String,
    category: String,
    brand: String,
    color: String,
    size: String,
    stock_quantity: i64,
    is_featured: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<CapRow> for Cap {
    type Error = RepositoryError;

    fn try_from(row: CapRow) -> Result<Self, Self::Error> {
        let price = parse_decimal(&row.price, "caps.price")?;

        Ok(Self {
            id: CapId::new(row.id),
            name: row.name,
            name_ar: row.name_ar,
            description: row.description,
            description_ar: row.description_ar,
            price,
            image_url: row.image_url,
            category: row.category,
            brand: row.brand,
            color: row.color,
            size: row.size,
            stock_quantity: row.stock_quantity,
            is_featured: row.is_featured,
            created_at: row.created_at,
        })
    }
}

const SELECT_CAP: &str = r"
    SELECT id, name, name_ar, description, description_ar, price, image_url,
           category, brand, color, size, stock_quantity, is_featured, created_at
    FROM caps
";

/// Repository for catalog database operations.
pub struct CapRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CapRepository<'a> {
    /// Create a new cap repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List caps in ascending-id order with offset/limit pagination and an
    /// optional exact-match category filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        category: Option<&str>,
    ) -> Result<Vec<Cap>, RepositoryError> {
        let rows = if let Some(category) = category {
            sqlx::query_as::<_, CapRow>(&format!(
                "{SELECT_CAP} WHERE category = ? ORDER BY id ASC LIMIT ? OFFSET ?"
            ))
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as::<_, CapRow>(&format!(
                "{SELECT_CAP} ORDER BY id ASC LIMIT ? OFFSET ?"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?
        };

        rows.into_iter().map(Cap::try_from).collect()
    }

    /// List up to `limit` featured caps in ascending-id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_featured(&self, limit: i64) -> Result<Vec<Cap>, RepositoryError> {
        let rows = sqlx::query_as::<_, CapRow>(&format!(
            "{SELECT_CAP} WHERE is_featured = 1 ORDER BY id ASC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Cap::try_from).collect()
    }

    /// Get a cap by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get(&self, id: CapId) -> Result<Option<Cap>, RepositoryError> {
        let row = sqlx::query_as::<_, CapRow>(&format!("{SELECT_CAP} WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        row.map(Cap::try_from).transpose()
    }

    /// Insert a new catalog entry. Used by the seed process; no HTTP
    /// endpoint creates caps.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, cap: &NewCap) -> Result<Cap, RepositoryError> {
        let row = sqlx::query_as::<_, CapRow>(
            r"
            INSERT INTO caps (name, name_ar, description, description_ar, price,
                              image_url, category, brand, color, size,
                              stock_quantity, is_featured, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, name_ar, description, description_ar, price,
                      image_url, category, brand, color, size, stock_quantity,
                      is_featured, created_at
            ",
        )
        .bind(&cap.name)
        .bind(&cap.name_ar)
        .bind(&cap.description)
        .bind(&cap.description_ar)
        .bind(cap.price.to_string())
        .bind(&cap.image_url)
        .bind(&cap.category)
        .bind(&cap.brand)
        .bind(&cap.color)
        .bind(&cap.size)
        .bind(cap.stock_quantity)
        .bind(cap.is_featured)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Count all caps. The seed process skips seeding a populated catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM caps")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
