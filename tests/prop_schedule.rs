//! Property-based tests for schedule invariants over random valid loan terms

use mortgage_calculator::{
    calculate_monthly_payment, calculate_total_interest, generate_amortization_schedule, LoanTerms,
    Summary,
};
use proptest::prelude::*;

proptest! {
    /// Schedule length is always years * 12, months ascending from 1.
    #[test]
    fn schedule_length_matches_term(
        principal in 1_000.0f64..2_000_000.0,
        rate in 0.0f64..20.0,
        years in 1i32..=40,
    ) {
        let schedule = generate_amortization_schedule(principal, rate, years).unwrap();

        prop_assert_eq!(schedule.len(), years as usize * 12);
        for (i, entry) in schedule.iter().enumerate() {
            prop_assert_eq!(entry.month as usize, i + 1);
        }
    }

    /// Principal and interest portions add up to the fixed payment.
    #[test]
    fn portions_sum_to_payment(
        principal in 1_000.0f64..2_000_000.0,
        rate in 0.0f64..20.0,
        years in 1i32..=40,
    ) {
        let schedule = generate_amortization_schedule(principal, rate, years).unwrap();
        let payment = schedule.monthly_payment();

        for entry in &schedule {
            prop_assert_eq!(entry.monthly_payment, payment);
            let sum = entry.principal_portion + entry.interest_portion;
            prop_assert!(((sum - payment) / payment).abs() < 1e-6,
                "month {}: {} vs {}", entry.month, sum, payment);
        }
    }

    /// Balance never rises and ends within a currency unit of zero.
    #[test]
    fn balance_declines_to_zero(
        principal in 1_000.0f64..2_000_000.0,
        rate in 0.0f64..20.0,
        years in 1i32..=40,
    ) {
        let schedule = generate_amortization_schedule(principal, rate, years).unwrap();

        let mut previous = principal;
        for entry in &schedule {
            prop_assert!(entry.remaining_balance <= previous,
                "balance rose in month {}", entry.month);
            previous = entry.remaining_balance;
        }
        prop_assert!(schedule.final_balance().abs() < 1.0);
    }

    /// Schedule totals agree with the closed-form aggregate functions.
    #[test]
    fn totals_agree_with_closed_form(
        principal in 1_000.0f64..2_000_000.0,
        rate in 0.0f64..20.0,
        years in 1i32..=40,
    ) {
        let schedule = generate_amortization_schedule(principal, rate, years).unwrap();
        let payment = calculate_monthly_payment(principal, rate, years).unwrap();
        let interest = calculate_total_interest(principal, payment, years);
        let tolerance = principal * 1e-8;

        prop_assert!((schedule.total_principal() - principal).abs() < tolerance);
        prop_assert!((schedule.total_interest() - interest).abs() < tolerance);

        let closed = Summary::from_terms(&LoanTerms::new(principal, rate, years)).unwrap();
        prop_assert!((schedule.summary().total_cost - closed.total_cost).abs() < tolerance);
    }

    /// Zero-rate loans repay in equal straight-line instalments.
    #[test]
    fn zero_rate_is_straight_line(
        principal in 1_000.0f64..2_000_000.0,
        years in 1i32..=40,
    ) {
        let payment = calculate_monthly_payment(principal, 0.0, years).unwrap();
        prop_assert_eq!(payment, principal / (years as f64 * 12.0));
    }

    /// Identical inputs give bit-identical schedules.
    #[test]
    fn generation_is_deterministic(
        principal in 1_000.0f64..2_000_000.0,
        rate in 0.0f64..20.0,
        years in 1i32..=40,
    ) {
        let a = generate_amortization_schedule(principal, rate, years).unwrap();
        let b = generate_amortization_schedule(principal, rate, years).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Out-of-domain inputs are rejected rather than yielding NaN.
    #[test]
    fn invalid_terms_rejected(
        principal in -1_000_000.0f64..=0.0,
        years in -40i32..=0,
    ) {
        prop_assert!(generate_amortization_schedule(principal, 5.0, 30).is_err());
        prop_assert!(generate_amortization_schedule(200_000.0, 5.0, years).is_err());
        prop_assert!(calculate_monthly_payment(200_000.0, 5.0, years).is_err());
    }
}
