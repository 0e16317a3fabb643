//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece kind (I, O, T, S, Z, J, L) in a shuffled
//! order. Pieces are drawn until the bag is empty, and only then is a fresh bag
//! shuffled, so every aligned run of 7 draws is a permutation of all kinds.
//!
//! A small seeded LCG drives the shuffle so sessions are reproducible from a seed.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce a short cycle
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by multiplication so the result comes from the high bits; the low
    /// bits of a power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Unused kinds of the current permutation; drawn from the end
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create an empty bag; the first draw shuffles a fresh permutation
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Draw the next piece, refilling only once the bag is exhausted
    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        match self.bag.pop() {
            Some(kind) => kind,
            // Unreachable after refill; fall back to the catalog order.
            None => PieceKind::ALL[0],
        }
    }

    /// Discard any leftovers so the next draw starts a new bag.
    ///
    /// The RNG keeps its state, so a restart produces a different sequence.
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// Kinds still in the current bag, next draw last
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }

    /// Current RNG state (a seed that reproduces the upcoming bags)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_shuffle_hits_every_position() {
        // Over many shuffles, every kind should land first at least once.
        let mut rng = SimpleRng::new(99);
        let mut seen_first = [false; 7];
        for _ in 0..500 {
            let mut kinds = PieceKind::ALL;
            rng.shuffle(&mut kinds);
            let idx = PieceKind::ALL.iter().position(|k| *k == kinds[0]).unwrap();
            seen_first[idx] = true;
        }
        assert!(seen_first.iter().all(|s| *s));
    }

    #[test]
    fn test_bag_starts_empty_and_refills_on_draw() {
        let mut bag = PieceBag::new(1);
        assert!(bag.remaining().is_empty());

        bag.draw();
        assert_eq!(bag.remaining().len(), 6);
    }

    #[test]
    fn test_bag_reset_discards_leftovers() {
        let mut bag = PieceBag::new(1);
        bag.draw();
        bag.draw();
        bag.reset();
        assert!(bag.remaining().is_empty());

        let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        drawn.sort_by_key(|k| *k as u8);
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }
}
