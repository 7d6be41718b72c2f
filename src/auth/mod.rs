//! Authentication module for LoanDesk
//!
//! Credentials-based identity:
//! - bcrypt password hashing and verification
//! - JWT access-token issuance and validation
//! - Account registration, login, and profile management

mod jwt;
mod password;
mod service;

pub use jwt::{generate_access_token, verify_token, Claims, JwtError};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AuthError, AuthService};
