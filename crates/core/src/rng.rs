//! RNG module - deterministic randomness for the simulation
//!
//! A small LCG keeps every run reproducible from its seed: the slide
//! direction of each new block and the pitch jitter of the place cue are the
//! only random inputs to the game.

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

/// 32-bit linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 is remapped to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Fair coin flip from the top bit; the low bits of an LCG alternate.
    pub fn next_bool(&mut self) -> bool {
        self.next_u32() & 0x8000_0000 != 0
    }

    /// Uniform float in [0, 1) built from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
