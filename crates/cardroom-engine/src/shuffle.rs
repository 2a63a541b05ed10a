//! The randomness seam: deck production behind a trait.
//!
//! Shuffling is the engine's only nondeterminism, so it is isolated here.
//! Production uses [`ThreadRngShuffler`]; tests inject [`SeededShuffler`]
//! (or their own implementation) to make whole games reproducible.

use cardroom_protocol::Card;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Produces the shuffled draw pile for a new game.
pub trait DeckShuffler: Send + Sync + 'static {
    /// A uniformly-random permutation of `1..=deck_size`.
    fn shuffled_deck(&self, deck_size: Card) -> Vec<Card>;
}

/// The production shuffler, drawing entropy from the thread RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngShuffler;

impl DeckShuffler for ThreadRngShuffler {
    fn shuffled_deck(&self, deck_size: Card) -> Vec<Card> {
        let mut deck: Vec<Card> = (1..=deck_size).collect();
        deck.shuffle(&mut rand::rng());
        deck
    }
}

/// A deterministic shuffler: equal seeds produce equal decks across runs.
#[derive(Debug, Clone, Copy)]
pub struct SeededShuffler {
    seed: u64,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckShuffler for SeededShuffler {
    fn shuffled_deck(&self, deck_size: Card) -> Vec<Card> {
        let mut deck: Vec<Card> = (1..=deck_size).collect();
        deck.shuffle(&mut StdRng::seed_from_u64(self.seed));
        deck
    }
}
