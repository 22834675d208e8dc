use nera_core::fuzzy::{cognate_score, edit_distance, longest_common_substring};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cognate_score_is_symmetric(a in "[a-zA-Zăîșțâ ]{0,16}", b in "[a-zA-Zăîșțâ ]{0,16}") {
        prop_assert_eq!(cognate_score(&a, &b), cognate_score(&b, &a));
    }

    #[test]
    fn cognate_score_never_exceeds_one(a in "[a-z]{1,20}", b in "[a-z]{1,20}") {
        prop_assert!(cognate_score(&a, &b) <= 1.0);
    }

    #[test]
    fn edit_distance_is_symmetric_and_bounded(a in ".{0,24}", b in ".{0,24}") {
        let d = edit_distance(&a, &b);
        prop_assert_eq!(d, edit_distance(&b, &a));
        let (la, lb) = (a.chars().count(), b.chars().count());
        prop_assert!(d <= la.max(lb));
        prop_assert!(d >= la.abs_diff(lb));
    }

    #[test]
    fn edit_distance_to_self_is_zero(a in ".{0,32}") {
        prop_assert_eq!(edit_distance(&a, &a), 0);
    }

    #[test]
    fn lcs_is_symmetric_and_bounded(a in "[abc]{0,20}", b in "[abc]{0,20}") {
        let l = longest_common_substring(&a, &b);
        prop_assert_eq!(l, longest_common_substring(&b, &a));
        prop_assert!(l <= a.chars().count().min(b.chars().count()));
    }

    #[test]
    fn lcs_of_self_is_length(a in ".{0,32}") {
        prop_assert_eq!(longest_common_substring(&a, &a), a.chars().count());
    }
}
