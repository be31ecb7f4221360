//! Property-based tests for HybridSet laws.

use hybridset::{HybridSet, IntHybridSet, Multiplicity};
use proptest::prelude::*;

// Small keys so that generated sets share elements.
fn entries() -> impl Strategy<Value = Vec<(u8, Multiplicity)>> {
    prop::collection::vec((0u8..12, -6i64..=6), 0..24)
}

fn hybrid_set() -> impl Strategy<Value = HybridSet<u8>> {
    entries().prop_map(|entries| HybridSet::from_mapping(entries))
}

// =============================================================================
// Normalization
// Description: No stored multiplicity is zero
// =============================================================================

proptest! {
    #[test]
    fn prop_no_zero_entries(entries in entries()) {
        let set = HybridSet::from_mapping(entries.clone());
        prop_assert!(set.iter().all(|(_, m)| m != 0));

        for (key, _) in &entries {
            let expected: Multiplicity = entries
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, m)| m)
                .sum();
            prop_assert_eq!(set.count(key), expected);
        }
    }
}

// =============================================================================
// Decomposition Law
// Description: positive part + negative part = the set itself
// =============================================================================

proptest! {
    #[test]
    fn prop_parts_recombine(x in hybrid_set()) {
        prop_assert_eq!(x.positive_part() + x.negative_part(), x.clone());
        prop_assert!(x.positive_part().iter().all(|(_, m)| m > 0));
        prop_assert!(x.negative_part().iter().all(|(_, m)| m < 0));
    }
}

// =============================================================================
// Cardinality and Weight
// Description: signed and absolute sums, weight >= |cardinality|
// =============================================================================

proptest! {
    #[test]
    fn prop_cardinality_and_weight(x in hybrid_set()) {
        let cardinality: Multiplicity = x.iter().map(|(_, m)| m).sum();
        let weight: Multiplicity = x.iter().map(|(_, m)| m.abs()).sum();
        prop_assert_eq!(x.cardinality(), cardinality);
        prop_assert_eq!(x.weight(), weight);
        prop_assert!(x.weight() >= x.cardinality().abs());
        let mixed = x.is_proper() && !x.positive_part().is_empty();
        prop_assert_eq!(x.weight() == x.cardinality().abs(), !mixed);
    }
}

// =============================================================================
// Sum Laws
// Description: commutative, associative, identity, inverse
// =============================================================================

proptest! {
    #[test]
    fn prop_sum_commutativity(a in hybrid_set(), b in hybrid_set()) {
        prop_assert_eq!(&a + &b, &b + &a);
    }

    #[test]
    fn prop_sum_associativity(a in hybrid_set(), b in hybrid_set(), c in hybrid_set()) {
        prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    }

    #[test]
    fn prop_sum_identity(x in hybrid_set()) {
        let empty = HybridSet::new();
        prop_assert_eq!(&x + &empty, x.clone());
        prop_assert_eq!(&empty + &x, x);
    }

    #[test]
    fn prop_additive_inverse(x in hybrid_set()) {
        prop_assert!((&x + &(&x * -1)).is_empty());
        prop_assert!((&x - &x).is_empty());
    }
}

// =============================================================================
// Scale Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_scale_by_zero_is_empty(x in hybrid_set()) {
        prop_assert_eq!(&x * 0, HybridSet::new());
    }

    #[test]
    fn prop_scale_distributes_over_sum(a in hybrid_set(), b in hybrid_set(), k in -4i64..=4) {
        prop_assert_eq!(&(&a + &b) * k, &(&a * k) + &(&b * k));
    }

    #[test]
    fn prop_double_is_self_sum(x in hybrid_set()) {
        prop_assert_eq!(&x * 2, &x + &x);
    }
}

// =============================================================================
// Inclusion Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_superset_mirrors_subset(a in hybrid_set(), b in hybrid_set()) {
        prop_assert_eq!(a.is_superset_of(&b), b.is_subset_of(&a));
    }

    #[test]
    fn prop_subset_is_reflexive(x in hybrid_set()) {
        prop_assert!(x.is_subset_of(&x));
    }

    #[test]
    fn prop_natural_subset_of_positive_sum(a in hybrid_set(), b in hybrid_set()) {
        let part = a.positive_part();
        let whole = &part + &b.positive_part();
        prop_assert!(part.is_natural_subset_of(&whole));
        prop_assert_eq!(&part.complement_of(&whole) + &part, whole);
    }

    #[test]
    fn prop_proper_sets_are_never_natural_subsets(a in hybrid_set(), b in hybrid_set()) {
        if a.is_proper() {
            prop_assert!(!a.is_natural_subset_of(&b));
            prop_assert!(a.complement_of(&b).is_empty());
        }
    }
}

// =============================================================================
// Hasher Independence
// =============================================================================

proptest! {
    #[test]
    fn prop_no_hash_set_agrees(entries in entries()) {
        let std_set = HybridSet::from_mapping(entries.clone());
        let no_hash: IntHybridSet<u8> = entries.into_iter().collect();
        prop_assert_eq!(no_hash.len(), std_set.len());
        for (key, m) in &std_set {
            prop_assert_eq!(no_hash.count(key), m);
        }
    }
}
