//! Catalog browsing service.

use sqlx::SqlitePool;

use caps_store_core::CapId;

use crate::db::{CapRepository, RepositoryError};
use crate::error::AppError;
use crate::models::Cap;

/// Default page size when the caller does not ask for one.
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on page size, regardless of what the caller asks for.
const MAX_PAGE_SIZE: i64 = 100;

/// Number of caps returned by the featured listing.
const FEATURED_LIMIT: i64 = 10;

/// Catalog browsing service.
pub struct CatalogService<'a> {
    caps: CapRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            caps: CapRepository::new(pool),
        }
    }

    /// List caps in stable insertion order, optionally filtered by category.
    ///
    /// `skip` is clamped to zero; `limit` is clamped to `0..=MAX_PAGE_SIZE`
    /// and defaults to `DEFAULT_PAGE_SIZE` when absent. An explicit zero
    /// limit yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list(
        &self,
        skip: Option<i64>,
        limit: Option<i64>,
        category: Option<&str>,
    ) -> Result<Vec<Cap>, AppError> {
        let offset = skip.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(0, MAX_PAGE_SIZE);

        Ok(self.caps.list(offset, limit, category).await?)
    }

    /// List the featured caps.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list_featured(&self) -> Result<Vec<Cap>, AppError> {
        Ok(self.caps.list_featured(FEATURED_LIMIT).await?)
    }

    /// Fetch a single cap by ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no cap has the given ID.
    pub async fn get(&self, id: CapId) -> Result<Cap, AppError> {
        match self.caps.get(id).await {
            Ok(Some(cap)) => Ok(cap),
            Ok(None) | Err(RepositoryError::NotFound) => {
                Err(AppError::NotFound(format!("Cap with id {id} not found")))
            }
            Err(e) => Err(e.into()),
        }
    }
}
