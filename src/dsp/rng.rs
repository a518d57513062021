/// Park–Miller "minimal standard" generator: `x' = 16807 · x mod (2³¹ − 1)`.
///
/// The state is never zero; a zero seed is promoted to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkMiller {
    state: u32,
}

impl ParkMiller {
    const MULTIPLIER: u64 = 16_807;
    const MODULUS: u64 = 0x7FFF_FFFF;

    pub fn new(seed: u32) -> Self {
        let state = (seed as u64 % Self::MODULUS) as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = ((self.state as u64 * Self::MULTIPLIER) % Self::MODULUS) as u32;
        self.state
    }

    /// Low 16 bits of the next state, reinterpreted as a signed sample.
    pub fn next_i16(&mut self) -> i16 {
        self.next_u32() as u16 as i16
    }

    /// Current state; feeding it back to [`ParkMiller::new`] resumes the sequence.
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for ParkMiller {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_minimal_standard_sequence() {
        let mut rng = ParkMiller::new(1);
        assert_eq!(rng.next_u32(), 16_807);
        assert_eq!(rng.next_u32(), 282_475_249);
        assert_eq!(rng.next_u32(), 1_622_650_073);
    }

    #[test]
    fn zero_seed_is_promoted() {
        assert_eq!(ParkMiller::new(0), ParkMiller::new(1));
    }

    #[test]
    fn resuming_from_seed_continues_sequence() {
        let mut a = ParkMiller::new(42);
        a.next_u32();
        let mut b = ParkMiller::new(a.seed());
        assert_eq!(a.next_u32(), b.next_u32());
    }
}
