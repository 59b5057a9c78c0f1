use proptest::prelude::*;
use revpct::{aggregate, compute_reverse, round, Entry, Session};

#[test]
fn test_round_zero() {
    assert_eq!(round(0.0, 1.0, 2), 0.0);
}

#[test]
fn test_thousand_at_ten_percent() {
    // 1000 * 100 / 110 = 909.0909...; 909.09 * 10 / 100 = 90.909
    let entry = compute_reverse(1000.0, 10.0).unwrap();

    assert_eq!(entry.base, 909.09);
    assert_eq!(entry.amount, 90.91);
}

#[test]
fn test_zero_inputs_have_no_result() {
    assert!(compute_reverse(1000.0, 0.0).is_none());
    assert!(compute_reverse(0.0, 10.0).is_none());
}

#[test]
fn test_aggregate_examples() {
    assert!(aggregate(&[]).is_none());

    let single = aggregate(&[Entry { base: 900.0, rate: 10.0, amount: 90.0 }]).unwrap();
    assert_eq!(single.base_total, 900.0);
    assert_eq!(single.amount_total, 90.0);
    assert_eq!(single.grand_total, 990.0);
}

#[test]
fn test_session_workflow() {
    let mut session = Session::new();

    // Append the default 1000 @ 10%, twice through an input change
    assert!(session.append().is_appended());
    assert!(!session.append().is_appended());
    session.set_rate(10.0);
    assert!(session.append().is_appended());

    let sums = session.aggregate().unwrap();
    assert_eq!(sums.base_total, 1818.18);
    assert_eq!(sums.amount_total, 181.82);
    assert_eq!(sums.grand_total, 2000.0);

    // Entries keep insertion order
    session.set_total(220.0);
    session.append();
    let bases: Vec<f64> = session.entries().iter().map(|e| e.base).collect();
    assert_eq!(bases, vec![909.09, 909.09, 200.0]);

    session.clear();
    assert!(session.entries().is_empty());
    assert!(session.aggregate().is_none());
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: base * (1 + rate / 100) recovers the total within rounding slack.
    #[test]
    fn property_base_recovers_total(
        cents in 1u64..100_000_000u64,
        rate_hundredths in 1u32..=10_000u32,
    ) {
        let total = cents as f64 / 100.0;
        let rate = rate_hundredths as f64 / 100.0;

        let entry = compute_reverse(total, rate).unwrap();
        let recovered = entry.base * (1.0 + rate / 100.0);

        prop_assert!(
            (recovered - total).abs() <= 0.02,
            "total {} rate {} base {} recovered {}",
            total, rate, entry.base, recovered
        );
    }

    /// PROPERTY: the amount is always the rounded percentage of the base.
    #[test]
    fn property_amount_matches_base_and_rate(
        cents in 1u64..100_000_000u64,
        rate_hundredths in 1u32..=10_000u32,
    ) {
        let total = cents as f64 / 100.0;
        let rate = rate_hundredths as f64 / 100.0;

        let entry = compute_reverse(total, rate).unwrap();

        prop_assert_eq!(entry.rate, rate);
        prop_assert!((entry.amount - entry.base * rate / 100.0).abs() <= 0.005 + 1e-9);
    }

    /// PROPERTY: sums of two-decimal entries stay on the two-decimal grid.
    #[test]
    fn property_aggregate_close_to_exact_sum(
        bases in proptest::collection::vec(1u64..10_000_000u64, 1..20),
    ) {
        let entries: Vec<Entry> = bases
            .iter()
            .map(|&cents| {
                let base = cents as f64 / 100.0;
                Entry { base, rate: 10.0, amount: round(base * 0.1, 1.0, 2) }
            })
            .collect();

        let sums = aggregate(&entries).unwrap();
        let exact: f64 = entries.iter().map(|e| e.base).sum();

        prop_assert!((sums.base_total - exact).abs() < 0.01);
        prop_assert!((sums.grand_total - (sums.base_total + sums.amount_total)).abs() < 0.011);
    }
}
