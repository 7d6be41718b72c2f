//! Payment service layer - Records EMI payments and advances the schedule

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::loan::Loan;
use crate::payment::{Payment, PaymentStatus};

/// Payment service errors
#[derive(Error, Debug)]
pub enum PaymentServiceError {
    #[error("Loan not found")]
    LoanNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for PaymentServiceError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => PaymentServiceError::LoanNotFound,
            other => PaymentServiceError::Database(other.to_string()),
        }
    }
}

/// Payment service for EMI collection
#[derive(Clone)]
pub struct PaymentService {
    db_pool: PgPool,
}

impl PaymentService {
    /// Create a new payment service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Record a successful payment against a loan and mark the earliest
    /// pending installment paid.
    ///
    /// The loan row is locked so concurrent payments against the same loan
    /// serialize and each one consumes a distinct installment. A payment is
    /// accepted even when no installment is pending; the schedule is simply
    /// left untouched.
    pub async fn record_payment(
        &self,
        loan_id: Uuid,
        payer_id: Uuid,
        amount: i64,
        gateway_ref: Option<String>,
    ) -> Result<Payment, PaymentServiceError> {
        let mut tx = self.db_pool.begin().await?;

        let mut loan: Loan = sqlx::query_as("SELECT * FROM loans WHERE id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PaymentServiceError::LoanNotFound)?;

        let payment: Payment = sqlx::query_as(
            r#"
            INSERT INTO payments (id, loan_id, payer_id, amount, status, gateway_ref, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(loan.id)
        .bind(payer_id)
        .bind(amount)
        .bind(PaymentStatus::Success)
        .bind(&gateway_ref)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if let Some(month) = loan.mark_next_installment_paid() {
            loan.updated_at = Utc::now();

            sqlx::query("UPDATE loans SET emi_schedule = $1, updated_at = $2 WHERE id = $3")
                .bind(&loan.emi_schedule)
                .bind(loan.updated_at)
                .bind(loan.id)
                .execute(&mut *tx)
                .await?;

            tracing::debug!(
                loan_id = %loan.id,
                installment_month = month,
                "Installment marked paid"
            );
        } else {
            tracing::debug!(
                loan_id = %loan.id,
                "No pending installment; payment recorded without schedule change"
            );
        }

        tx.commit().await?;

        tracing::info!(
            payment_id = %payment.id,
            loan_id = %loan_id,
            payer_id = %payer_id,
            amount = amount,
            "Payment recorded"
        );

        Ok(payment)
    }

    /// Payments made by one user, newest first.
    pub async fn history_for(&self, payer_id: Uuid) -> Result<Vec<Payment>, PaymentServiceError> {
        let payments =
            sqlx::query_as("SELECT * FROM payments WHERE payer_id = $1 ORDER BY created_at DESC")
                .bind(payer_id)
                .fetch_all(&self.db_pool)
                .await?;

        Ok(payments)
    }

    /// Every payment on the platform, newest first (admin view).
    pub async fn list_all(&self) -> Result<Vec<Payment>, PaymentServiceError> {
        let payments = sqlx::query_as("SELECT * FROM payments ORDER BY created_at DESC")
            .fetch_all(&self.db_pool)
            .await?;

        Ok(payments)
    }
}
