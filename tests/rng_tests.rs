//! Randomizer tests - 7-bag fairness and determinism

use std::collections::HashSet;

use blockdrop::core::{PieceBag, SimpleRng};
use blockdrop::types::PieceKind;

#[test]
fn test_every_aligned_run_of_seven_is_a_permutation() {
    for seed in [1, 7, 12345, 0xdead_beef] {
        let mut bag = PieceBag::new(seed);
        for _ in 0..50 {
            let run: HashSet<PieceKind> = (0..7).map(|_| bag.draw()).collect();
            assert_eq!(run.len(), 7, "seed {} repeated a kind within a bag", seed);
        }
    }
}

#[test]
fn test_counts_even_out() {
    let mut bag = PieceBag::new(99);
    let mut counts = [0u32; 7];
    for _ in 0..7 * 100 {
        let kind = bag.draw();
        let i = PieceKind::ALL.iter().position(|k| *k == kind).unwrap();
        counts[i] += 1;
    }
    assert!(counts.iter().all(|&c| c == 100));
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = PieceBag::new(2024);
    let mut b = PieceBag::new(2024);
    let seq_a: Vec<_> = (0..70).map(|_| a.draw()).collect();
    let seq_b: Vec<_> = (0..70).map(|_| b.draw()).collect();
    assert_eq!(seq_a, seq_b);
}

#[test]
fn test_different_seeds_usually_differ() {
    let seq = |seed| {
        let mut bag = PieceBag::new(seed);
        (0..21).map(|_| bag.draw()).collect::<Vec<_>>()
    };
    assert_ne!(seq(1), seq(2));
}

#[test]
fn test_remaining_shrinks_then_refills() {
    let mut bag = PieceBag::new(5);
    assert!(bag.remaining().is_empty());

    let first = bag.draw();
    assert_eq!(bag.remaining().len(), 6);
    assert!(!bag.remaining().contains(&first));

    for _ in 0..6 {
        bag.draw();
    }
    assert!(bag.remaining().is_empty());
    bag.draw();
    assert_eq!(bag.remaining().len(), 6);
}

#[test]
fn test_reset_discards_leftovers() {
    let mut bag = PieceBag::new(5);
    bag.draw();
    bag.draw();
    bag.reset();
    assert!(bag.remaining().is_empty());

    let run: HashSet<PieceKind> = (0..7).map(|_| bag.draw()).collect();
    assert_eq!(run.len(), 7);
}

#[test]
fn test_rng_range_bounds() {
    let mut rng = SimpleRng::new(31337);
    for max in 1..20 {
        for _ in 0..200 {
            assert!(rng.next_range(max) < max);
        }
    }
}
