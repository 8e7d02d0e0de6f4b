//! Haplotype collection tests
//!
//! Covers string construction (fail-fast, blank tokens), DRB345 slot
//! aggregation, immutable set/swap/concat semantics and iteration order.

use ferro_hla::{parse_allele, parse_haplotype, Allele, Haplotype, HlaError, Locus};
use rstest::rstest;

#[test]
fn test_create_from_string() {
    let haplotype = parse_haplotype("A*01:01+B*08:01").unwrap();
    assert_eq!(haplotype.alleles().len(), 2);
    assert_eq!(haplotype.to_string(), "A*01:01+B*08:01");
}

#[test]
fn test_create_skips_blank_tokens() {
    let haplotype = parse_haplotype(" A*01:01 ++ B*08:01 + ").unwrap();
    assert_eq!(haplotype.alleles().len(), 2);
    assert_eq!(haplotype.to_string(), "A*01:01+B*08:01");
}

#[test]
fn test_create_from_empty_string() {
    let haplotype = parse_haplotype("").unwrap();
    assert!(haplotype.alleles().is_empty());
    assert_eq!(haplotype.to_string(), "");
}

#[rstest]
#[case("A*01:01+bogus")]
#[case("A*01:01+ZZ*01:01")]
#[case("A*1+B*08:01")]
fn test_create_fails_fast_on_malformed_token(#[case] text: &str) {
    assert!(parse_haplotype(text).is_err());
}

#[test]
fn test_create_reports_first_failure() {
    let err = parse_haplotype("A*01:01+ZZ*01:01+bogus").unwrap_err();
    assert_eq!(
        err,
        HlaError::UnknownLocus {
            code: "ZZ".to_string()
        }
    );
}

#[test]
fn test_drb345_aggregation() {
    let haplotype = parse_haplotype("B3*01:01").unwrap();
    assert_eq!(haplotype.get(Locus::Drb345).unwrap().locus(), Locus::Drb3);
    // Non-exact queries for any DRB sub-locus land on the shared slot
    assert!(haplotype.get(Locus::Drb4).is_some());
    // Exact queries require the stored allele's own locus
    assert!(haplotype.get_exact(Locus::Drb4).is_none());
    assert!(haplotype.get_exact(Locus::Drb3).is_some());
    assert!(haplotype.get_exact(Locus::Drb345).is_none());
}

#[test]
fn test_exact_lookup_on_aggregate_locus_entry() {
    // A negative typing result is carried at the aggregate locus itself
    let haplotype = parse_haplotype("NEGATIVE").unwrap();
    assert_eq!(
        haplotype.get_exact(Locus::Drb345).unwrap().locus(),
        Locus::Drb345
    );
}

#[test]
fn test_drb_sub_loci_share_one_slot() {
    let haplotype = parse_haplotype("B3*01:01+B4*01:03").unwrap();
    assert_eq!(haplotype.alleles().len(), 1);
    assert_eq!(haplotype.to_string(), "DRB4*01:03");
}

#[test]
fn test_duplicate_locus_keeps_last_value_and_first_position() {
    let haplotype = parse_haplotype("A*01:01+B*08:01+A*02:01").unwrap();
    assert_eq!(haplotype.to_string(), "A*02:01+B*08:01");
}

#[test]
fn test_get_by_code_string() {
    let haplotype = parse_haplotype("A*01:01+DRB1*15:01").unwrap();
    assert_eq!(haplotype.get("a").unwrap().to_string(), "A*01:01");
    assert_eq!(haplotype.get("DRB1").unwrap().to_string(), "DRB1*15:01");
    assert!(haplotype.get(Locus::B).is_none());
}

#[test]
#[should_panic(expected = "Unknown HLA locus")]
fn test_get_by_unresolvable_code_panics() {
    let haplotype = parse_haplotype("A*01:01").unwrap();
    let _ = haplotype.get("NOPE");
}

#[test]
fn test_set_is_a_no_op_on_slot_mismatch() {
    let haplotype = parse_haplotype("A*01:01+B*08:01").unwrap();
    let dqb = parse_allele("DQB1*06:02").unwrap();
    let next = haplotype.set(Locus::A, dqb);
    assert_eq!(next, haplotype);
}

#[test]
fn test_set_replaces_matching_slot() {
    let haplotype = parse_haplotype("A*01:01+B*08:01").unwrap();
    let replacement = parse_allele("A*03:01").unwrap();
    let next = haplotype.set(Locus::A, replacement);
    assert_eq!(next.to_string(), "A*03:01+B*08:01");
    // The receiver is untouched
    assert_eq!(haplotype.to_string(), "A*01:01+B*08:01");
}

#[test]
fn test_set_appends_to_an_empty_slot() {
    let haplotype = parse_haplotype("A*01:01").unwrap();
    let b = parse_allele("B*44:02").unwrap();
    let next = haplotype.set(Locus::B, b);
    assert_eq!(next.to_string(), "A*01:01+B*44:02");
}

#[test]
fn test_set_accepts_any_drb_sub_locus_for_the_shared_slot() {
    let haplotype = parse_haplotype("B3*01:01").unwrap();
    let b5 = parse_allele("B5*02:02").unwrap();
    let next = haplotype.set(Locus::Drb4, b5);
    assert_eq!(next.get(Locus::Drb345).unwrap().locus(), Locus::Drb5);
}

#[test]
fn test_has() {
    let haplotype = parse_haplotype("B3*01:01+A*01:01").unwrap();
    assert!(haplotype.has(Locus::A));
    assert!(haplotype.has(Locus::Drb5));
    assert!(!haplotype.has(Locus::Dqb1));
    assert!(haplotype.has_exact(Locus::Drb3));
    assert!(!haplotype.has_exact(Locus::Drb5));
}

#[test]
fn test_swap_exchanges_one_locus() {
    let h1 = parse_haplotype("A*01:01+B*08:01").unwrap();
    let h2 = parse_haplotype("A*02:01+B*44:02").unwrap();

    let (n1, n2) = h1.swap(&h2, Locus::A);
    assert_eq!(n1.get(Locus::A).unwrap().to_string(), "A*02:01");
    assert_eq!(n2.get(Locus::A).unwrap().to_string(), "A*01:01");
    // Other loci are untouched
    assert_eq!(n1.get(Locus::B).unwrap().to_string(), "B*08:01");
    assert_eq!(n2.get(Locus::B).unwrap().to_string(), "B*44:02");
    // The receivers are untouched
    assert_eq!(h1.to_string(), "A*01:01+B*08:01");
    assert_eq!(h2.to_string(), "A*02:01+B*44:02");
}

#[test]
fn test_swap_is_a_no_op_when_either_side_lacks_the_locus() {
    let h1 = parse_haplotype("A*01:01+B*08:01").unwrap();
    let h2 = parse_haplotype("A*02:01").unwrap();

    let (n1, n2) = h1.swap(&h2, Locus::B);
    assert_eq!(n1, h1);
    assert_eq!(n2, h2);
}

#[test]
fn test_swap_all_threads_the_pair() {
    let h1 = parse_haplotype("A*01:01+B*08:01+DRB1*15:01").unwrap();
    let h2 = parse_haplotype("A*02:01+B*44:02+DRB1*03:01").unwrap();

    let (n1, n2) = h1.swap_all(&h2, &[Locus::A, Locus::B]);
    assert_eq!(n1.to_string(), "A*02:01+B*44:02+DRB1*15:01");
    assert_eq!(n2.to_string(), "A*01:01+B*08:01+DRB1*03:01");
}

#[test]
fn test_swap_all_accepts_code_strings() {
    let h1 = parse_haplotype("A*01:01+B*08:01").unwrap();
    let h2 = parse_haplotype("A*02:01+B*44:02").unwrap();

    let (n1, n2) = h1.swap_all(&h2, &["a", "b"]);
    assert_eq!(n1.to_string(), "A*02:01+B*44:02");
    assert_eq!(n2.to_string(), "A*01:01+B*08:01");
}

#[test]
fn test_concat_prefers_the_right_hand_side() {
    let h1 = parse_haplotype("A*01:01+B*08:01").unwrap();
    let h2 = parse_haplotype("A*02:01+DRB1*15:01").unwrap();

    let merged = h1.concat(&h2);
    assert_eq!(merged.to_string(), "A*02:01+B*08:01+DRB1*15:01");
    assert_eq!(h1.to_string(), "A*01:01+B*08:01");
}

#[test]
fn test_new_from_alleles() {
    let alleles = vec![
        parse_allele("A*01:01").unwrap(),
        parse_allele("B*08:01").unwrap(),
    ];
    let haplotype = Haplotype::new(alleles);
    assert_eq!(haplotype.to_string(), "A*01:01+B*08:01");
}

#[test]
fn test_new_applies_last_write_wins() {
    let alleles = vec![
        parse_allele("A*01:01").unwrap(),
        parse_allele("A*02:01").unwrap(),
    ];
    let haplotype = Haplotype::new(alleles);
    assert_eq!(haplotype.alleles().len(), 1);
    assert_eq!(haplotype.to_string(), "A*02:01");
}

#[test]
fn test_collect_from_iterator() {
    let haplotype: Haplotype = ["A*01:01", "B*08:01"]
        .into_iter()
        .map(|token| parse_allele(token).unwrap())
        .collect();
    assert_eq!(haplotype.alleles().len(), 2);
}

#[test]
fn test_iteration() {
    let haplotype = parse_haplotype("A*01:01+B*08:01").unwrap();
    assert_eq!(haplotype.iter().count(), 2);

    let loci: Vec<Locus> = (&haplotype).into_iter().map(Allele::locus).collect();
    assert_eq!(loci, vec![Locus::A, Locus::B]);

    let owned: Vec<Allele> = haplotype.clone().into_iter().collect();
    assert_eq!(owned.len(), 2);
}

#[test]
fn test_clone_is_equal() {
    let haplotype = parse_haplotype("A*01:01+B3*01:01").unwrap();
    assert_eq!(haplotype.clone(), haplotype);
}

#[test]
fn test_serde_round_trip() {
    let haplotype = parse_haplotype("A*01:01+B*08:01+B3*01:01").unwrap();
    let json = serde_json::to_string(&haplotype).unwrap();
    let back: Haplotype = serde_json::from_str(&json).unwrap();
    assert_eq!(back, haplotype);
}
