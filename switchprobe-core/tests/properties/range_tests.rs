//! Property tests for threshold range parsing and evaluation

use proptest::prelude::*;
use switchprobe_core::range::{Bound, RangeSpec};

/// Strategy for finite bounds that print and parse back exactly
fn finite() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|v| v as f64),
        -1.0e6f64..1.0e6,
    ]
}

/// Strategy for well-formed range expressions
fn range_text() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        proptest::option::of(finite()),
        proptest::option::of(finite()),
    )
        .prop_map(|(inverted, a, b)| {
            let (lo, hi) = match (a, b) {
                (Some(a), Some(b)) => (Some(a.min(b)), Some(a.max(b))),
                other => other,
            };
            let prefix = if inverted { "@" } else { "" };
            let start = lo.map_or_else(|| "~".to_string(), |v| v.to_string());
            let end = hi.map_or_else(String::new, |v| v.to_string());
            format!("{prefix}{start}:{end}")
        })
}

proptest! {
    /// Property: Rendering a parsed range and parsing it again yields the same range
    #[test]
    fn display_round_trips(text in range_text()) {
        let range = RangeSpec::parse(&text).unwrap();
        let again = RangeSpec::parse(&range.to_string()).unwrap();
        prop_assert_eq!(range, again);
    }

    /// Property: An inverted range alerts exactly where its plain twin does not
    #[test]
    fn inversion_is_complement(text in range_text(), value in finite()) {
        let body = text.trim_start_matches('@');
        let plain = RangeSpec::parse(body).unwrap();
        let inverted = RangeSpec::parse(&format!("@{body}")).unwrap();
        prop_assert_ne!(plain.evaluate(value), inverted.evaluate(value));
    }

    /// Property: A plain range alerts iff the value lies outside its bounds
    #[test]
    fn plain_range_alerts_outside(lo in finite(), width in 0.0f64..1.0e6, value in finite()) {
        let hi = lo + width;
        let range = RangeSpec::parse(&format!("{lo}:{hi}")).unwrap();
        prop_assert_eq!(range.evaluate(value), value < lo || value > hi);
    }

    /// Property: Bounds are inclusive on both ends
    #[test]
    fn bounds_are_inclusive(lo in finite(), width in 0.0f64..1.0e6) {
        let hi = lo + width;
        let range = RangeSpec::parse(&format!("{lo}:{hi}")).unwrap();
        prop_assert!(!range.evaluate(lo));
        prop_assert!(!range.evaluate(hi));
    }

    /// Property: A bare number N behaves like 0:N
    #[test]
    fn bare_number_is_zero_to_n(n in 0u32..1_000_000, value in finite()) {
        let bare = RangeSpec::parse(&n.to_string()).unwrap();
        let explicit = RangeSpec::parse(&format!("0:{n}")).unwrap();
        prop_assert_eq!(bare, explicit);
        prop_assert_eq!(bare.evaluate(value), explicit.evaluate(value));
    }

    /// Property: Reversed finite bounds are always rejected
    #[test]
    fn reversed_bounds_rejected(lo in finite(), gap in 1u32..1000) {
        let hi = lo - f64::from(gap);
        let text = format!("{lo}:{hi}");
        prop_assert!(RangeSpec::parse(&text).is_err(), "accepted {}", text);
    }

    /// Property: Parsed finite bounds keep lower <= upper
    #[test]
    fn parsed_bounds_are_ordered(text in range_text()) {
        let range = RangeSpec::parse(&text).unwrap();
        if let (Bound::Value(lo), Bound::Value(hi)) = (range.lower(), range.upper()) {
            prop_assert!(lo <= hi);
        }
    }

    /// Property: Arbitrary text never panics the parser
    #[test]
    fn parser_never_panics(text in ".{0,24}") {
        let _ = RangeSpec::parse(&text);
    }
}
