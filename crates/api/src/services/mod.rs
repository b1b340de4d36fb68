//! Business logic, between the HTTP handlers and the repositories.

pub mod auth;
pub mod catalog;
pub mod orders;

pub use auth::{AuthError, AuthService, NewUser, TokenSigner};
pub use catalog::CatalogService;
pub use orders::{NewOrder, NewOrderLine, OrderError, OrderService};
