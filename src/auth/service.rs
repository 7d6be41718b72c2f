//! Authentication service
//!
//! Registration, login, and account lookups over the users table, plus the
//! JWT secret needed by the request extractors.

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AuthResponse, RegisterRequest, User, UserRole};

use super::jwt::{generate_access_token, JwtError};
use super::password::{hash_password, verify_password, PasswordError};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Token error: {0}")]
    Token(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        AuthError::Database(e.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Hash(e.to_string())
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::Token(e.to_string())
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
    jwt_secret: String,
    token_ttl_seconds: i64,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(db_pool: PgPool, jwt_secret: String, token_ttl_seconds: i64) -> Self {
        Self {
            db_pool,
            jwt_secret,
            token_ttl_seconds,
        }
    }

    /// Register a new customer account and issue a token.
    ///
    /// New accounts are always `customer`; the registration payload carries
    /// no role, so callers cannot self-elevate.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AuthError> {
        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&req.email)
            .fetch_optional(&self.db_pool)
            .await?;

        if existing.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&req.password)?;
        let now = Utc::now();

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, phone, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&password_hash)
        .bind(UserRole::Customer)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            // Two concurrent registrations can both pass the pre-check; the
            // unique index on email settles the race.
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::from(e)
            }
        })?;

        tracing::info!(user_id = %user.id, "New account registered");

        let token = generate_access_token(&user, &self.jwt_secret, self.token_ttl_seconds)?;

        Ok(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.into(),
        })
    }

    /// Authenticate with email/password and issue a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let user: User = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_access_token(&user, &self.jwt_secret, self.token_ttl_seconds)?;

        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: user.into(),
        })
    }

    /// Get a user by id.
    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<User, AuthError> {
        sqlx::query_as(
            r#"
            SELECT id, name, email, phone, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AuthError::UserNotFound)
    }

    /// Update the caller's own name and/or phone.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        phone: Option<String>,
    ) -> Result<User, AuthError> {
        sqlx::query_as(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, email, phone, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AuthError::UserNotFound)
    }

    /// List every account, newest first (admin view).
    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let users = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, password_hash, role, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(users)
    }

    /// Get JWT secret (for the auth extractors)
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
