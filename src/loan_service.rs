//! Loan service layer - Business logic for the loan lifecycle

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::loan::{
    compute_admin_stats, AdminStats, ApplyLoanRequest, Loan, LoanDecision,
};

/// Loan service errors
#[derive(Error, Debug)]
pub enum LoanServiceError {
    #[error("Loan not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for LoanServiceError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => LoanServiceError::NotFound,
            other => LoanServiceError::Database(other.to_string()),
        }
    }
}

/// Loan service for managing the application lifecycle
#[derive(Clone)]
pub struct LoanService {
    db_pool: PgPool,
    annual_rate_percent: f64,
}

impl LoanService {
    /// Create a new loan service instance
    pub fn new(db_pool: PgPool, annual_rate_percent: f64) -> Self {
        Self {
            db_pool,
            annual_rate_percent,
        }
    }

    /// Submit a new loan application for the given borrower.
    ///
    /// The platform rate in force right now is stamped onto the loan, so a
    /// later rate change never rewrites an application already in flight.
    pub async fn apply(
        &self,
        borrower_id: Uuid,
        request: ApplyLoanRequest,
    ) -> Result<Loan, LoanServiceError> {
        let loan = Loan::new_application(
            borrower_id,
            request.amount,
            request.tenure,
            self.annual_rate_percent,
            request.reason,
            request.documents,
            chrono::Utc::now(),
        );

        sqlx::query(
            r#"
            INSERT INTO loans (
                id, borrower_id, amount, tenure_months, annual_rate_percent,
                reason, documents, status, admin_remarks,
                total_payable, total_interest, emi_schedule,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(loan.id)
        .bind(loan.borrower_id)
        .bind(loan.amount)
        .bind(loan.tenure_months)
        .bind(loan.annual_rate_percent)
        .bind(&loan.reason)
        .bind(&loan.documents)
        .bind(loan.status)
        .bind(&loan.admin_remarks)
        .bind(loan.total_payable)
        .bind(loan.total_interest)
        .bind(&loan.emi_schedule)
        .bind(loan.created_at)
        .bind(loan.updated_at)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(
            loan_id = %loan.id,
            borrower_id = %borrower_id,
            amount = loan.amount,
            tenure_months = loan.tenure_months,
            "Loan application submitted"
        );

        Ok(loan)
    }

    /// Get a loan by id.
    pub async fn get_loan(&self, loan_id: Uuid) -> Result<Loan, LoanServiceError> {
        sqlx::query_as("SELECT * FROM loans WHERE id = $1")
            .bind(loan_id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(LoanServiceError::NotFound)
    }

    /// List every loan, newest first (admin view).
    pub async fn list_all(&self) -> Result<Vec<Loan>, LoanServiceError> {
        let loans = sqlx::query_as("SELECT * FROM loans ORDER BY created_at DESC")
            .fetch_all(&self.db_pool)
            .await?;

        Ok(loans)
    }

    /// List the loans belonging to one borrower, newest first.
    pub async fn list_for_borrower(&self, borrower_id: Uuid) -> Result<Vec<Loan>, LoanServiceError> {
        let loans =
            sqlx::query_as("SELECT * FROM loans WHERE borrower_id = $1 ORDER BY created_at DESC")
                .bind(borrower_id)
                .fetch_all(&self.db_pool)
                .await?;

        Ok(loans)
    }

    /// Approve or reject a loan application.
    ///
    /// The row is locked for the duration of the transaction so two admins
    /// deciding the same loan serialize; approval generates the repayment
    /// schedule exactly once.
    pub async fn decide(
        &self,
        loan_id: Uuid,
        decision: LoanDecision,
        admin_remarks: Option<String>,
    ) -> Result<Loan, LoanServiceError> {
        let mut tx = self.db_pool.begin().await?;

        let mut loan: Loan = sqlx::query_as("SELECT * FROM loans WHERE id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LoanServiceError::NotFound)?;

        loan.decide(decision, admin_remarks, chrono::Utc::now());

        sqlx::query(
            r#"
            UPDATE loans
            SET status = $1,
                admin_remarks = $2,
                total_payable = $3,
                total_interest = $4,
                emi_schedule = $5,
                updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(loan.status)
        .bind(&loan.admin_remarks)
        .bind(loan.total_payable)
        .bind(loan.total_interest)
        .bind(&loan.emi_schedule)
        .bind(loan.updated_at)
        .bind(loan.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            loan_id = %loan.id,
            status = ?loan.status,
            "Loan decision recorded"
        );

        Ok(loan)
    }

    /// Portfolio-wide aggregates for the admin dashboard.
    pub async fn admin_stats(&self) -> Result<AdminStats, LoanServiceError> {
        let loans = self.list_all().await?;
        Ok(compute_admin_stats(&loans))
    }
}
