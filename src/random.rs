use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the randomness that spreads tags across the canvas.
///
/// Each layout run owns its source; substitute a seeded [XorShiftRng] to make
/// runs reproducible.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// A uniform integer in `[0, n)`; always 0 when `n` is 0
    fn next_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        (self.next_u64() % n as u64) as u32
    }

    /// True once in `odds` draws on average; never true when `odds` is 0
    fn one_in(&mut self, odds: u32) -> bool {
        odds > 0 && self.next_below(odds) == odds - 1
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// xorshift64* generator. Small and fast; not suitable for anything but layout
/// jitter.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u64,
}

impl XorShiftRng {
    pub fn new(seed: u64) -> XorShiftRng {
        // a zero state would stay zero forever
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        XorShiftRng { state }
    }

    /// Seed from the process' hash randomness mixed with the clock, so that
    /// successive layouts differ
    pub fn from_entropy() -> XorShiftRng {
        let mut hasher = RandomState::new().build_hasher();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        hasher.write_u128(nanos);
        XorShiftRng::new(hasher.finish())
    }
}

impl RandomSource for XorShiftRng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}
