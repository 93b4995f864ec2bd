//! RNG module - piece selection
//!
//! The default [`UniformRandomizer`] draws every piece uniformly from the
//! selection pool with replacement, independent of history. Long streaks of
//! the same kind are possible and intended. [`BagRandomizer`] is the opt-in
//! 7-bag alternative.
//!
//! Both sit on a seeded LCG so a game replays exactly from its seed.

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
        // Avoid 0 seed which would produce all zeros
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
    /// Uses the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Which randomizer a game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomizerKind {
    #[default]
    Uniform,
    Bag,
}

impl RandomizerKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Some(RandomizerKind::Uniform),
            "bag" | "7bag" | "7-bag" => Some(RandomizerKind::Bag),
            _ => None,
        }
    }
}

/// Source of the next piece kind.
pub trait PieceSource {
    /// Pick the next kind from `pool`. The pool is never empty once the game
    /// has left its init phase.
    fn draw(&mut self, pool: &[PieceKind]) -> PieceKind;
}

/// Uniform draw with replacement.
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: SimpleRng,
}

impl UniformRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformRandomizer {
    fn draw(&mut self, pool: &[PieceKind]) -> PieceKind {
        debug_assert!(!pool.is_empty(), "draw from an empty pool");
        let idx = self.rng.next_range(pool.len().max(1) as u32) as usize;
        pool.get(idx).copied().unwrap_or(PieceKind::I)
    }
}

/// Every kind of the pool once per shuffled bag.
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    bag: Vec<PieceKind>,
    rng: SimpleRng,
}

impl BagRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: Vec::with_capacity(PieceKind::ALL.len()),
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for BagRandomizer {
    fn draw(&mut self, pool: &[PieceKind]) -> PieceKind {
        if self.bag.is_empty() {
            self.bag.extend_from_slice(pool);
            self.rng.shuffle(&mut self.bag);
        }
        self.bag.pop().unwrap_or(PieceKind::I)
    }
}

/// The randomizer a [`GameState`](crate::GameState) owns.
#[derive(Debug, Clone)]
pub enum Randomizer {
    Uniform(UniformRandomizer),
    Bag(BagRandomizer),
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        match kind {
            RandomizerKind::Uniform => Randomizer::Uniform(UniformRandomizer::new(seed)),
            RandomizerKind::Bag => Randomizer::Bag(BagRandomizer::new(seed)),
        }
    }

    pub fn kind(&self) -> RandomizerKind {
        match self {
            Randomizer::Uniform(_) => RandomizerKind::Uniform,
            Randomizer::Bag(_) => RandomizerKind::Bag,
        }
    }
}

impl PieceSource for Randomizer {
    fn draw(&mut self, pool: &[PieceKind]) -> PieceKind {
        match self {
            Randomizer::Uniform(r) => r.draw(pool),
            Randomizer::Bag(r) => r.draw(pool),
        }
    }
}
