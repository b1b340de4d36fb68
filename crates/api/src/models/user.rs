//! User domain type.

use chrono::{DateTime, Utc};

use caps_store_core::{Email, UserId};

/// A registered account.
///
/// The password hash is deliberately absent: it stays inside the `db`
/// layer (`UserRepository::get_password_hash`) and is never attached to
/// the domain object that flows through handlers and responses.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (unique across the system).
    pub email: Email,
    /// Display name.
    pub full_name: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Optional default address.
    pub address: Option<String>,
    /// Activity flag; accounts are never deleted.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
