use proptest::prelude::*;

use super::*;

#[test]
fn parses_numeric_components() {
    let v = Version::new("1.2.3").unwrap();
    assert_eq!(v.to_string(), "1.2.3");
    assert_eq!(v.len(), 3);
}

#[test]
fn numeric_components_compare_by_value_not_lexically() {
    let a = Version::new("1.9").unwrap();
    let b = Version::new("1.10").unwrap();
    assert!(a < b);
}

#[test]
fn alpha_components_compare_lexically() {
    let a = Version::new("2021a").unwrap();
    let b = Version::new("2021b").unwrap();
    assert!(a < b);
}

#[test]
fn numeric_sorts_below_alpha_at_same_position() {
    let a = Version::new("1.2").unwrap();
    let b = Version::new("1.a").unwrap();
    assert!(a < b);
}

#[test]
fn shorter_prefix_sorts_below_longer() {
    let a = Version::new("1.2").unwrap();
    let b = Version::new("1.2.1").unwrap();
    assert!(a < b);
    assert!(a.is_prefix_of(&b));
}

#[test]
fn rejects_dot_adjacent_empty_components() {
    assert!(Version::new("1..2").is_err());
    assert!(Version::new(".1").is_err());
}

#[test]
fn satisfies_is_equality() {
    let a = Version::new("1.2").unwrap();
    let b = Version::new("1.2").unwrap();
    let c = Version::new("1.3").unwrap();
    assert!(a.satisfies(&b));
    assert!(!a.satisfies(&c));
}

fn arb_version() -> impl Strategy<Value = Version> {
    prop::collection::vec(0u16..64, 1..5).prop_map(|parts| {
        let id = parts.iter().map(ToString::to_string).collect::<Vec<_>>().join(".");
        Version::new(&id).unwrap()
    })
}

proptest! {
    /// §8 property 8 applied to `Version` itself: `Ord` must be a
    /// consistent total order over arbitrary dotted numeric ids, not just
    /// the hand-picked pairs above.
    #[test]
    fn ordering_is_antisymmetric_and_consistent(a in arb_version(), b in arb_version()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        if a.cmp(&b) == std::cmp::Ordering::Equal {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn display_then_parse_round_trips(v in arb_version()) {
        prop_assert_eq!(Version::new(&v.to_string()).unwrap(), v);
    }
}
