// Proof of work - the brute-force puzzle run before a block is accepted.
// Miners search for a nonce such that the double hash of value + nonce has
// enough trailing zero bits; acceptors re-check the digest with
// `verify_hash` and never search.

use crate::error::{LedgerError, Result};
use crate::utils::double_hash;
use num_bigint::BigUint;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default alphabet for nonce generation. The nonce length equals the
/// alphabet length, so the default yields 16-character hex-looking nonces.
pub const NONCE_POOL: &str = "0123456789ABCDEF";

/// How many attempts run between cancellation checks in the cancellable
/// search.
const CANCEL_CHECK_INTERVAL: u64 = 512;

/// Hash candidate for a (value, nonce) pair.
pub fn generate_hash(value: &str, nonce: &str) -> String {
    double_hash(&format!("{value}{nonce}"))
}

/// True iff the digest, read as a big integer, ends with `difficulty`
/// consecutive zero bits in its binary representation. No search happens
/// here; block acceptors call this directly.
pub fn verify_hash(hash: &str, difficulty: u32) -> bool {
    let value = match BigUint::parse_bytes(hash.as_bytes(), 16) {
        Some(value) => value,
        None => return false,
    };
    if difficulty == 0 {
        return true;
    }
    match value.trailing_zeros() {
        Some(zeros) => zeros >= u64::from(difficulty),
        None => false,
    }
}

fn draw_nonce<R: Rng>(rng: &mut R, pool: &[char]) -> String {
    (0..pool.len()).map(|_| pool[rng.gen_range(0..pool.len())]).collect()
}

/// Unbounded Monte-Carlo search over the default pool. Expected attempts
/// grow as 2^difficulty; callers needing bounded latency use the
/// cancellable variant on a worker instead.
pub fn find_nonce(value: &str, difficulty: u32) -> String {
    find_nonce_with_pool(value, difficulty, NONCE_POOL)
}

/// Unbounded search with an explicit nonce alphabet.
pub fn find_nonce_with_pool(value: &str, difficulty: u32, pool: &str) -> String {
    let pool: Vec<char> = pool.chars().collect();
    let mut rng = rand::thread_rng();
    let mut cycle: u64 = 1;
    loop {
        let nonce = draw_nonce(&mut rng, &pool);
        if verify_hash(&generate_hash(value, &nonce), difficulty) {
            log::info!("Found nonce after {cycle} cycles");
            return nonce;
        }
        cycle += 1;
    }
}

/// Cancellable search: the token is checked every few hundred attempts so
/// a host application can run the miner on a dedicated worker and stop it
/// externally. Raising the flag fails the search with a mining error.
pub fn find_nonce_cancellable(
    value: &str,
    difficulty: u32,
    pool: &str,
    cancel: &AtomicBool,
) -> Result<String> {
    let pool: Vec<char> = pool.chars().collect();
    let mut rng = rand::thread_rng();
    let mut cycle: u64 = 1;
    loop {
        if cycle % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
            return Err(LedgerError::Mining(format!(
                "Nonce search cancelled after {cycle} cycles"
            )));
        }
        let nonce = draw_nonce(&mut rng, &pool);
        if verify_hash(&generate_hash(value, &nonce), difficulty) {
            log::info!("Found nonce after {cycle} cycles");
            return Ok(nonce);
        }
        cycle += 1;
    }
}
