//! 7-bag randomizer for piece generation
//!
//! All 7 pieces are shuffled into a bag, then dealt out one at a time before
//! the next bag is shuffled. No identity repeats within a bag.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag {
    /// Pieces left in the current bag, dealt from the back
    pieces: Vec<TetrominoType>,
    rng: ChaCha8Rng,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a bag randomizer with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a bag randomizer with a fixed seed (reproducible sequences)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            pieces: Vec::with_capacity(7),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Produce a freshly shuffled permutation of all seven pieces
    pub fn next_bag(&mut self) -> [TetrominoType; 7] {
        let mut bag = TetrominoType::all();
        // Fisher-Yates, last index down to 1
        for i in (1..bag.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            bag.swap(i, j);
        }
        bag
    }

    /// Take the next piece, refilling when the current bag is exhausted
    pub fn draw(&mut self) -> TetrominoType {
        if let Some(piece) = self.pieces.pop() {
            return piece;
        }
        let [rest @ .., last] = self.next_bag();
        self.pieces.extend(rest);
        last
    }

    /// Pieces left before the next refill
    pub fn remaining(&self) -> usize {
        self.pieces.len()
    }
}
