//! Hash based random numbers for independent per pixel / per sample streams
//!
//! **Note: This code is only available with the `sequences` feature**

/// Number of mixing rounds [`hash_seed`] is usually called with
pub const DEFAULT_HASH_ROUNDS: u32 = 16;

const GOLDEN_RATIO_INCREMENT: u32 = 0x9e37_79b9;
const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

/// Mixes two integers into a well distributed seed. This is a few rounds of the tiny encryption
/// algorithm (TEA). Use it to derive a seed from e.g. the pixel index and the frame number.
///
/// The result only depends on the inputs.
#[must_use]
pub fn hash_seed(a: u32, b: u32, rounds: u32) -> u32 {
    let mut v0 = a;
    let mut v1 = b;
    let mut sum = 0u32;
    for _ in 0..rounds {
        sum = sum.wrapping_add(GOLDEN_RATIO_INCREMENT);
        v0 = v0.wrapping_add(
            (v1 << 4).wrapping_add(0xa341_316c)
                ^ v1.wrapping_add(sum)
                ^ (v1 >> 5).wrapping_add(0xc801_3ea4),
        );
        v1 = v1.wrapping_add(
            (v0 << 4).wrapping_add(0xad90_777d)
                ^ v0.wrapping_add(sum)
                ^ (v0 >> 5).wrapping_add(0x7e95_761e),
        );
    }
    v0
}

/// A linear congruential generator. Every logical sample stream owns exactly one of these.
#[derive(Debug, PartialEq, Eq)]
pub struct SampleRng {
    state: u32,
}

impl SampleRng {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seeds the stream with [`hash_seed`] using [`DEFAULT_HASH_ROUNDS`]
    #[must_use]
    pub fn from_hash(a: u32, b: u32) -> Self {
        Self::new(hash_seed(a, b, DEFAULT_HASH_ROUNDS))
    }

    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advances the stream and returns a number in `[0, 1)` built from the low 24 bits of the
    /// new state
    pub fn next_uniform(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state & 0x00ff_ffff) / f64::from(0x0100_0000u32)
    }

    /// Two consecutive draws, e.g. for the 2D sampling routines in [`crate::sampling`]
    pub fn next_vec2(&mut self) -> crate::Vec2d {
        let x = self.next_uniform();
        let y = self.next_uniform();
        crate::Vec2d::new(x, y)
    }
}
