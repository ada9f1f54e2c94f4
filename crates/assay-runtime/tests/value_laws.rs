//! Algebraic properties of value comparison and truthiness

use assay_runtime::{Comparison, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::Int),
        (-1000.0f64..1000.0).prop_map(Value::Float),
        "[a-z0-9 .-]{0,6}".prop_map(Value::String),
        (-50i64..50).prop_map(|n| Value::String(n.to_string())),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(2, 12, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::List),
            prop::collection::btree_map("[a-c]", inner, 0..3).prop_map(Value::Map),
        ]
    })
}

proptest! {
    #[test]
    fn loose_equality_is_symmetric(a in value(), b in value()) {
        prop_assert_eq!(a.loose_eq(&b), b.loose_eq(&a));
    }

    #[test]
    fn strict_equality_implies_loose(a in value(), b in value()) {
        if a.strict_eq(&b) {
            prop_assert!(a.loose_eq(&b));
        }
    }

    #[test]
    fn every_value_equals_itself(a in value()) {
        prop_assert!(a.strict_eq(&a));
        prop_assert!(a.loose_eq(&a));
    }

    #[test]
    fn comparison_modes_match_value_methods(a in value(), b in value()) {
        prop_assert_eq!(Comparison::Loose.holds(&a, &b), a.loose_eq(&b));
        prop_assert_eq!(Comparison::Strict.holds(&a, &b), a.strict_eq(&b));
    }

    #[test]
    fn integers_are_truthy_unless_zero(n in any::<i64>()) {
        prop_assert_eq!(Value::Int(n).is_truthy(), n != 0);
    }

    #[test]
    fn integer_text_compares_exactly(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(Value::Int(a).loose_eq(&Value::String(b.to_string())), a == b);
    }

    #[test]
    fn integer_texts_compare_exactly(a in any::<i64>(), b in any::<i64>()) {
        let left = Value::String(a.to_string());
        prop_assert_eq!(left.loose_eq(&Value::String(b.to_string())), a == b);
    }

    #[test]
    fn usize_converts_to_int(n in any::<u32>()) {
        prop_assert_eq!(Value::from(n as usize), Value::Int(i64::from(n)));
    }

    #[test]
    fn integer_equals_its_decimal_text(n in any::<i64>()) {
        prop_assert!(Value::Int(n).loose_eq(&Value::String(n.to_string())));
        prop_assert!(!Value::Int(n).strict_eq(&Value::String(n.to_string())));
    }
}
