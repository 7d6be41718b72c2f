//! Loan model and approval state machine
//!
//! A loan is created `Pending` with no schedule. An admin decision moves it
//! to `Approved` (generating the EMI schedule and totals exactly once) or
//! `Rejected`. Payments retire installments through
//! [`Loan::mark_next_installment_paid`]. The transitions here are pure; the
//! service layer wraps them in row-locked transactions.

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use crate::emi::{self, Installment, InstallmentStatus};

/// Loan status enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
}

/// Outcome of an admin review. Restricting the decision to these two values
/// keeps `Pending` out of the decide operation entirely.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoanDecision {
    Approved,
    Rejected,
}

impl From<LoanDecision> for LoanStatus {
    fn from(decision: LoanDecision) -> Self {
        match decision {
            LoanDecision::Approved => LoanStatus::Approved,
            LoanDecision::Rejected => LoanStatus::Rejected,
        }
    }
}

/// Loan model
///
/// The EMI schedule is embedded with the loan (JSONB column) so the status
/// and schedule always move together under a single row lock.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: Uuid,
    pub borrower_id: Uuid,
    /// Principal in whole currency units.
    pub amount: i64,
    pub tenure_months: i32,
    /// Nominal annual rate stamped onto the loan at application time.
    pub annual_rate_percent: f64,
    pub reason: String,
    /// URLs of supporting documents; immutable after creation.
    pub documents: Vec<String>,
    pub status: LoanStatus,
    pub admin_remarks: String,
    pub total_payable: Option<i64>,
    pub total_interest: Option<i64>,
    pub emi_schedule: Json<Vec<Installment>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Loan {
    /// Build a fresh pending application. No schedule, no totals.
    pub fn new_application(
        borrower_id: Uuid,
        amount: i64,
        tenure_months: i32,
        annual_rate_percent: f64,
        reason: String,
        documents: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Loan {
            id: Uuid::new_v4(),
            borrower_id,
            amount,
            tenure_months,
            annual_rate_percent,
            reason,
            documents,
            status: LoanStatus::Pending,
            admin_remarks: String::new(),
            total_payable: None,
            total_interest: None,
            emi_schedule: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an admin decision to this loan.
    ///
    /// Sets the status and, when remarks are provided, overwrites the admin
    /// remarks. Approval generates the EMI schedule and totals only if no
    /// schedule exists yet, so re-approving an already-scheduled loan is a
    /// no-op on the schedule. Rejection never touches the schedule.
    pub fn decide(&mut self, decision: LoanDecision, remarks: Option<String>, now: DateTime<Utc>) {
        self.status = decision.into();
        if let Some(remarks) = remarks {
            self.admin_remarks = remarks;
        }

        if decision == LoanDecision::Approved && self.emi_schedule.is_empty() {
            let months = self.tenure_months as u32;
            let totals = emi::payment_totals(self.amount, self.annual_rate_percent, months);
            self.emi_schedule = Json(emi::generate_schedule(
                self.amount,
                self.annual_rate_percent,
                months,
                now,
            ));
            self.total_payable = Some(totals.total_payable);
            self.total_interest = Some(totals.total_interest);
        }

        self.updated_at = now;
    }

    /// Mark the earliest pending installment as paid.
    ///
    /// The schedule is ordered by `month` from construction and never
    /// reordered, so a front-to-back scan finds the lowest pending month.
    /// Returns the month that was marked, or `None` when every installment
    /// is already paid (or no schedule exists); in that case the schedule
    /// is left untouched.
    pub fn mark_next_installment_paid(&mut self) -> Option<u32> {
        let next = self
            .emi_schedule
            .0
            .iter_mut()
            .find(|inst| inst.status == InstallmentStatus::Pending)?;
        next.status = InstallmentStatus::Paid;
        Some(next.month)
    }
}

/// Summary statistics over the loan collection for the admin dashboard.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_applications: i64,
    pub approved_loans: i64,
    pub pending_loans: i64,
    /// Sum of principal over approved loans (not payments collected).
    pub total_amount_disbursed: i64,
}

/// Derive the admin dashboard statistics from the full loan collection.
/// Pure read-only aggregation, recomputed per request.
pub fn compute_admin_stats(loans: &[Loan]) -> AdminStats {
    let approved = loans.iter().filter(|l| l.status == LoanStatus::Approved);

    AdminStats {
        total_applications: loans.len() as i64,
        approved_loans: approved.clone().count() as i64,
        pending_loans: loans
            .iter()
            .filter(|l| l.status == LoanStatus::Pending)
            .count() as i64,
        total_amount_disbursed: approved.map(|l| l.amount).sum(),
    }
}

/// Request to apply for a loan
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyLoanRequest {
    /// Principal in whole currency units. The cap keeps the derived totals
    /// (`emi * tenure`) inside i64 at any accepted tenure and rate.
    #[validate(range(min = 1, max = 1_000_000_000, message = "amount must be between 1 and 1,000,000,000"))]
    pub amount: i64,
    /// Term in whole months.
    #[validate(range(min = 1, max = 600, message = "tenure must be between 1 and 600 months"))]
    pub tenure: i32,
    #[validate(length(min = 1, message = "reason is required"))]
    pub reason: String,
    #[serde(default)]
    pub documents: Vec<String>,
}

/// Request to decide a loan's status (admin only)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideLoanRequest {
    pub status: LoanDecision,
    pub admin_remarks: Option<String>,
}
