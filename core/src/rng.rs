//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through DecisionRng instances derived
//! from the single master seed handed to the DecisionEngine.
//!
//! Each (slot, stream index) pair gets its own RNG, seeded from
//! master_seed XOR a mix of both. This means:
//!   - Opening another session never changes earlier sessions' streams.
//!   - Application ids and resolution draws never share a stream.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single stream.
pub struct DecisionRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl DecisionRng {
    pub fn new(master_seed: u64, slot_index: u64, stream: u64) -> Self {
        let derived_seed = master_seed
            ^ slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ stream.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Convenience constructor for tests and one-off draws.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(seed, 0, 0)
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Sixteen random bytes, used to mint application ids.
    pub fn next_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        bytes
    }
}

/// Hands out RNG streams for a single engine, all derived from one seed.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// The RNG for `slot` within stream `stream` (one stream per session).
    pub fn for_stream(&self, slot: RngSlot, stream: u64) -> DecisionRng {
        DecisionRng::new(self.master_seed, slot as u64, stream).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    Resolution = 0,
    Identity   = 1,
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolution => "resolution",
            Self::Identity   => "identity",
        }
    }
}
