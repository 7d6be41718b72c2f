//! EMI Formula and Schedule Generation Tests
//!
//! These tests validate the installment pricing math and the dated schedule
//! builder across rate edge cases, calendar boundaries, and long terms.

use chrono::{Datelike, TimeZone, Utc};

use loandesk_server::emi::{
    generate_schedule, monthly_installment, payment_totals, InstallmentStatus,
};

// ============================================================================
// Installment Formula Tests
// ============================================================================

#[test]
fn test_reference_loan_prices_exactly() {
    // 120,000 principal, 8% nominal annual, 12 months.
    assert_eq!(monthly_installment(120_000, 8.0, 12), 10_439);
}

#[test]
fn test_higher_rate_increases_installment() {
    let at_8 = monthly_installment(120_000, 8.0, 12);
    let at_12 = monthly_installment(120_000, 12.0, 12);
    let at_18 = monthly_installment(120_000, 18.0, 12);

    assert!(at_8 < at_12, "Raising the rate must raise the EMI");
    assert!(at_12 < at_18, "Raising the rate must raise the EMI");
}

#[test]
fn test_longer_tenure_decreases_installment() {
    let over_6 = monthly_installment(120_000, 8.0, 6);
    let over_12 = monthly_installment(120_000, 8.0, 12);
    let over_24 = monthly_installment(120_000, 8.0, 24);

    assert!(over_6 > over_12, "Stretching the term must lower the EMI");
    assert!(over_12 > over_24, "Stretching the term must lower the EMI");
}

#[test]
fn test_installment_scales_with_principal() {
    let small = monthly_installment(10_000, 8.0, 12);
    let large = monthly_installment(1_000_000, 8.0, 12);

    assert!(large > small);
    // Rounding breaks exact proportionality, but a 100x principal stays
    // within one unit per month of 100x the small EMI.
    assert!((large - small * 100).abs() <= 100);
}

#[test]
fn test_zero_rate_is_straight_line_division() {
    assert_eq!(monthly_installment(120_000, 0.0, 12), 10_000);
    assert_eq!(monthly_installment(100, 0.0, 3), 33);
}

#[test]
fn test_single_month_tenure_repays_whole_principal() {
    let emi = monthly_installment(50_000, 12.0, 1);
    // One installment covers principal plus one month of interest.
    assert_eq!(emi, 50_500);
}

#[test]
fn test_long_mortgage_style_term() {
    // 30-year style term keeps returning a sane, finite EMI.
    let emi = monthly_installment(5_000_000, 7.5, 360);
    assert!(emi > 5_000_000 / 360, "EMI must exceed interest-free share");
    assert!(emi < 5_000_000, "EMI must stay below the principal");
}

// ============================================================================
// Totals Tests
// ============================================================================

#[test]
fn test_totals_identity_holds() {
    let totals = payment_totals(120_000, 8.0, 12);

    assert_eq!(totals.total_payable, totals.emi_amount * 12);
    assert_eq!(totals.total_interest, totals.total_payable - 120_000);
}

#[test]
fn test_totals_identity_across_terms() {
    let cases: &[(i64, f64, u32)] = &[
        (120_000, 8.0, 12),
        (50_000, 12.0, 24),
        (1_000_000, 7.5, 360),
        (999, 0.0, 7),
    ];

    for &(principal, rate, months) in cases {
        let totals = payment_totals(principal, rate, months);
        assert_eq!(
            totals.total_payable,
            totals.emi_amount * months as i64,
            "total_payable must be emi * months for principal={}",
            principal
        );
        assert_eq!(
            totals.total_interest,
            totals.total_payable - principal,
            "total_interest must be total_payable - principal for principal={}",
            principal
        );
    }
}

#[test]
fn test_positive_rate_accrues_positive_interest() {
    let totals = payment_totals(120_000, 8.0, 12);
    assert!(totals.total_interest > 0);
}

// ============================================================================
// Schedule Generation Tests
// ============================================================================

#[test]
fn test_schedule_months_are_contiguous_from_one() {
    let start = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
    let schedule = generate_schedule(120_000, 8.0, 12, start);

    assert_eq!(schedule.len(), 12);
    for (i, inst) in schedule.iter().enumerate() {
        assert_eq!(inst.month, (i + 1) as u32, "Months must run 1..=tenure");
    }
}

#[test]
fn test_schedule_every_installment_pending_with_flat_amount() {
    let start = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
    let schedule = generate_schedule(120_000, 8.0, 12, start);
    let emi = monthly_installment(120_000, 8.0, 12);

    for inst in &schedule {
        assert_eq!(inst.status, InstallmentStatus::Pending);
        assert_eq!(inst.amount, emi, "Every installment carries the same EMI");
    }
}

#[test]
fn test_first_due_date_is_one_month_after_start() {
    let start = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
    let schedule = generate_schedule(120_000, 8.0, 12, start);

    assert_eq!(
        schedule[0].due_date,
        Utc.with_ymd_and_hms(2025, 7, 15, 10, 0, 0).unwrap()
    );
}

#[test]
fn test_due_dates_cross_year_boundary() {
    let start = Utc.with_ymd_and_hms(2025, 11, 10, 0, 0, 0).unwrap();
    let schedule = generate_schedule(60_000, 8.0, 4, start);

    assert_eq!(schedule[0].due_date.month(), 12);
    assert_eq!(schedule[0].due_date.year(), 2025);
    assert_eq!(schedule[1].due_date.month(), 1);
    assert_eq!(schedule[1].due_date.year(), 2026);
    assert_eq!(schedule[3].due_date.month(), 3);
    assert_eq!(schedule[3].due_date.year(), 2026);
}

#[test]
fn test_month_end_start_clamps_and_stays_clamped() {
    // Starting Jan 31 the cursor clamps to Feb 28 and subsequent months
    // inherit the 28th, because each due date advances the previous one.
    let start = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
    let schedule = generate_schedule(60_000, 0.0, 4, start);

    let days: Vec<u32> = schedule.iter().map(|i| i.due_date.day()).collect();
    assert_eq!(days, vec![28, 28, 28, 28]);
}

#[test]
fn test_leap_year_february_keeps_day_29() {
    // 2028 is a leap year: Jan 29 fits in February unchanged.
    let start = Utc.with_ymd_and_hms(2028, 1, 29, 0, 0, 0).unwrap();
    let schedule = generate_schedule(60_000, 0.0, 2, start);

    assert_eq!(
        schedule[0].due_date,
        Utc.with_ymd_and_hms(2028, 2, 29, 0, 0, 0).unwrap()
    );
    assert_eq!(
        schedule[1].due_date,
        Utc.with_ymd_and_hms(2028, 3, 29, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_due_dates_strictly_increase_over_long_terms() {
    let start = Utc.with_ymd_and_hms(2025, 1, 31, 13, 45, 0).unwrap();
    let schedule = generate_schedule(1_000_000, 7.5, 120, start);

    assert_eq!(schedule.len(), 120);
    for pair in schedule.windows(2) {
        assert!(
            pair[0].due_date < pair[1].due_date,
            "Due dates must strictly increase (month {} vs {})",
            pair[0].month,
            pair[1].month
        );
    }
}

// ============================================================================
// Persisted Wire Shape Tests
// ============================================================================

#[test]
fn test_installment_serializes_with_camel_case_keys() {
    let start = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
    let schedule = generate_schedule(120_000, 8.0, 1, start);

    let json = serde_json::to_value(&schedule[0]).unwrap();
    assert_eq!(json["month"], 1);
    assert_eq!(json["amount"], serde_json::json!(monthly_installment(120_000, 8.0, 1)));
    assert_eq!(json["status"], "pending");
    assert!(
        json.get("dueDate").is_some(),
        "due date must serialize as dueDate"
    );
    assert!(json.get("due_date").is_none());
}
