use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Hands out one deterministic ChaCha8 stream per named consumer.
///
/// Stream seeds are derived by folding the consumer name into the master
/// seed, so a system gets the same stream no matter when it first asks,
/// and adding a system never perturbs the draws of the others.
pub struct RngManager {
    seed: u64,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            streams: HashMap::new(),
        }
    }

    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let seed = self.seed;
        let inner = self
            .streams
            .entry(name.to_string())
            .or_insert_with_key(|key| ChaCha8Rng::seed_from_u64(derive_seed(seed, key)));
        SystemRng { inner }
    }
}

fn derive_seed(master: u64, name: &str) -> u64 {
    let mut hash = master ^ 0x9e37_79b9_7f4a_7c15;
    for byte in name.bytes() {
        hash = (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Borrowed view of a named stream; systems only ever see this.
pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl RngCore for SystemRng<'_> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn streams_are_stable_across_request_order() {
        let mut a = RngManager::new(11);
        let mut b = RngManager::new(11);

        let first_a: f64 = a.stream("fish").gen();
        let _ignored: f64 = b.stream("sources").gen();
        let first_b: f64 = b.stream("fish").gen();

        assert_eq!(first_a, first_b);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RngManager::new(1);
        let mut b = RngManager::new(2);
        let va: u64 = a.stream("fish").next_u64();
        let vb: u64 = b.stream("fish").next_u64();
        assert_ne!(va, vb);
    }
}
