//! Scripted random source for deterministic combat runs
//!
//! Every combat check draws `rng.gen::<f32>()`, so a queue of unit-interval
//! values is enough to steer the pipeline down a chosen branch.

use rand::{Error, RngCore};

/// Replays a fixed cycle of draws in [0, 1)
///
/// `gen::<f32>()` on this generator returns each scripted value (to 24
/// bits of precision) in order, then starts over.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    /// Build from unit-interval values; values are clamped into [0, 1)
    pub fn new(values: &[f32]) -> Self {
        let draws = if values.is_empty() {
            vec![0]
        } else {
            values.iter().map(|v| Self::encode(*v)).collect()
        };
        Self { draws, cursor: 0 }
    }

    /// Map a unit value onto the 32-bit word `gen::<f32>()` decodes back to it
    fn encode(value: f32) -> u32 {
        let clamped = value.clamp(0.0, 0.999_999);
        ((clamped * (1u32 << 24) as f32) as u32) << 8
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
