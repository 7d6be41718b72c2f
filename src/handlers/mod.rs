//! API handlers for the loan platform backend

pub mod auth;
pub mod loan;
pub mod payment;
pub mod user;

pub use auth::*;
pub use loan::*;
pub use payment::*;
pub use user::*;

// Re-export the auth extractors for handler use
pub use crate::middleware::auth::{AdminUser, AuthenticatedUser};
