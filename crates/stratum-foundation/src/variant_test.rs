use rstest::rstest;

use super::*;

fn m(pairs: &[(&str, Polarity)]) -> VariantMap {
    let mut map = VariantMap::new();
    for (name, polarity) in pairs {
        map.add(Variant::new(*name, *polarity)).unwrap();
    }
    map
}

#[test]
fn displays_sorted_by_name_regardless_of_insertion_order() {
    let map = m(&[
        ("b", Polarity::Enabled),
        ("c", Polarity::Disabled),
        ("a", Polarity::Enabled),
    ]);
    assert_eq!(map.to_string(), "+a+b~c");
}

#[test]
fn duplicate_variant_name_is_an_error() {
    let mut map = VariantMap::new();
    map.add(Variant::new("debug", Polarity::Enabled)).unwrap();
    assert!(map.add(Variant::new("debug", Polarity::Disabled)).is_err());
}

#[test]
fn unset_variant_is_unconstrained_not_disabled() {
    let partial = m(&[("debug", Polarity::Enabled)]);
    let requirement = m(&[("debug", Polarity::Enabled), ("shared", Polarity::Disabled)]);
    // `partial` says nothing about `shared`, so it still satisfies a
    // requirement's *own* view of itself, but it does not satisfy a
    // requirement that names a variant it has no opinion on being checked
    // the other way around.
    assert!(!partial.satisfies(&requirement));
    assert!(requirement.satisfies(&partial));
}

#[test]
fn constrain_merges_and_detects_conflicts() {
    let mut a = m(&[("debug", Polarity::Enabled)]);
    let b = m(&[("shared", Polarity::Disabled)]);
    a.constrain(&b).unwrap();
    assert_eq!(a.to_string(), "+debug~shared");

    let mut conflict = m(&[("debug", Polarity::Enabled)]);
    let other = m(&[("debug", Polarity::Disabled)]);
    assert!(conflict.constrain(&other).is_err());
}

#[rstest]
#[case(&[], &[], true)]
#[case(&[("debug", Polarity::Enabled)], &[], true)]
#[case(&[], &[("debug", Polarity::Enabled)], false)]
#[case(&[("debug", Polarity::Enabled)], &[("debug", Polarity::Enabled)], true)]
#[case(&[("debug", Polarity::Enabled)], &[("debug", Polarity::Disabled)], false)]
#[case(
    &[("debug", Polarity::Enabled), ("shared", Polarity::Disabled)],
    &[("debug", Polarity::Enabled)],
    true
)]
fn satisfies_matches_subset_by_polarity(
    #[case] mine: &[(&str, Polarity)],
    #[case] required: &[(&str, Polarity)],
    #[case] expected: bool,
) {
    assert_eq!(m(mine).satisfies(&m(required)), expected);
}
