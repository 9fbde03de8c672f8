// Per-worker random stream for the photon detection model.
//
// PCG-LCG generator with the RXS-M-XS output permutation. The LCG increment
// selects the stream: every worker gets its own odd increment, so two
// workers never walk the same sequence even when their states coincide.

use rand::{RngCore, SeedableRng};

const PCG_MULTIPLIER: u64 = 6364136223846793005;
/// Increment of stream 0
const DEFAULT_INCREMENT: u64 = 1442695040888963407;
const RXS_M_XS_MULTIPLIER: u64 = 12605985483714917081;
/// 2^-53
const UNIT_53: f64 = 1.0 / (1u64 << 53) as f64;

/// PCG random stream owned by a single worker.
///
/// Reference: Melissa E. O'Neill, "PCG: A Family of Simple Fast Space-Efficient
/// Statistically Good Algorithms for Random Number Generation"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastRng {
    state: u64,
    increment: u64,
}

impl FastRng {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed,
            increment: DEFAULT_INCREMENT,
        }
    }

    /// Stream for `worker_id` under the run seed. The same pair always
    /// gives the same sequence.
    pub fn for_worker(seed: u64, worker_id: usize) -> Self {
        let stream = split_mix(worker_id as u64);
        Self {
            state: split_mix(seed ^ stream),
            increment: (stream << 1) | 1,
        }
    }

    /// Uniform f64 in [0, 1), from the top 53 bits of the next output
    #[inline(always)]
    pub fn random(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * UNIT_53
    }

    /// Restart at `seed`, keeping the stream.
    #[inline]
    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
    }
}

fn split_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

impl SeedableRng for FastRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }
}

impl RngCore for FastRng {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(PCG_MULTIPLIER)
            .wrapping_add(self.increment);
        let s = self.state;
        let word = ((s >> ((s >> 59) + 5)) ^ s).wrapping_mul(RXS_M_XS_MULTIPLIER);
        (word >> 43) ^ word
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
