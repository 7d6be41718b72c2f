//! EMI calculation and repayment schedule generation
//!
//! The pricing core of LoanDesk: computes the fixed Equal Monthly
//! Installment (EMI) for a loan, the aggregate payable/interest totals, and
//! the dated schedule of installment obligations. All functions here are
//! pure; the caller supplies the schedule start instant.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Status of a single installment. One-way: `Pending` -> `Paid`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    Pending,
    Paid,
}

/// One scheduled installment of an approved loan.
///
/// Stored as an element of the loan's embedded `emi_schedule` list, ordered
/// by `month` (1-based, contiguous up to the loan tenure). Every installment
/// of a loan carries the same flat EMI amount.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub month: u32,
    pub due_date: DateTime<Utc>,
    pub amount: i64,
    pub status: InstallmentStatus,
}

/// Aggregate cost of a loan over its full term.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    pub emi_amount: i64,
    pub total_payable: i64,
    pub total_interest: i64,
}

/// Compute the fixed monthly installment for a loan.
///
/// Uses the standard EMI formula with a monthly rate derived from the
/// nominal annual percentage rate:
///
/// ```text
/// r = annual_rate_percent / 12 / 100
/// emi = principal * r * (1 + r)^months / ((1 + r)^months - 1)
/// ```
///
/// The formula is undefined at `r = 0` (the denominator vanishes), so a
/// zero rate falls back to straight-line division of the principal. The
/// result is rounded to the nearest whole currency unit; the rounding drift
/// accumulated over the term is accepted rather than corrected with a final
/// balloon installment.
pub fn monthly_installment(principal: i64, annual_rate_percent: f64, months: u32) -> i64 {
    let monthly_rate = annual_rate_percent / 12.0 / 100.0;

    if monthly_rate == 0.0 {
        return (principal as f64 / months as f64).round() as i64;
    }

    let growth = (1.0 + monthly_rate).powi(months as i32);
    let emi = principal as f64 * monthly_rate * growth / (growth - 1.0);
    emi.round() as i64
}

/// Compute the total payable and total interest over the full term.
///
/// Both figures derive from the rounded EMI, so `total_payable` is exactly
/// `emi_amount * months` and `total_interest` is the excess over principal.
pub fn payment_totals(principal: i64, annual_rate_percent: f64, months: u32) -> PaymentTotals {
    let emi_amount = monthly_installment(principal, annual_rate_percent, months);
    let total_payable = emi_amount * months as i64;

    PaymentTotals {
        emi_amount,
        total_payable,
        total_interest: total_payable - principal,
    }
}

/// Generate the dated installment schedule for a loan.
///
/// Produces exactly `months` entries with `month` running 1..=months, each
/// due one calendar month after the previous (a running cursor from
/// `start`, so month-end clamping accumulates sequentially: Jan 31 ->
/// Feb 28 -> Mar 28). Every entry carries the same EMI amount and starts
/// out `Pending`.
pub fn generate_schedule(
    principal: i64,
    annual_rate_percent: f64,
    months: u32,
    start: DateTime<Utc>,
) -> Vec<Installment> {
    let emi_amount = monthly_installment(principal, annual_rate_percent, months);

    let mut schedule = Vec::with_capacity(months as usize);
    let mut due_date = start;

    for month in 1..=months {
        due_date = due_date + Months::new(1);
        schedule.push(Installment {
            month,
            due_date,
            amount: emi_amount,
            status: InstallmentStatus::Pending,
        });
    }

    schedule
}
