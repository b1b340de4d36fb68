//! Domain models.
//!
//! These are validated domain objects, separate from database row types
//! (which live inside the `db` modules) and from API payloads (which live
//! alongside the route handlers).

pub mod cap;
pub mod order;
pub mod user;

pub use cap::{Cap, NewCap};
pub use order::{Order, OrderItem};
pub use user::User;
