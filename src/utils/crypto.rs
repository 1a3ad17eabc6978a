use data_encoding::HEXLOWER;
use ring::digest::{Context, SHA256};
use ripemd::{Digest as RipemdDigest, Ripemd160};

use crate::error::{LedgerError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// UTC timestamp in whole seconds. Block and transaction timestamps use
/// second resolution so recomputed hashes stay stable.
pub fn current_timestamp() -> Result<i64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| LedgerError::Crypto(format!("System time error: {e}")))?
        .as_secs();

    if duration > i64::MAX as u64 {
        return Err(LedgerError::Crypto("Timestamp overflow".to_string()));
    }

    Ok(duration as i64)
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// Double hash primitive used for block addressing and proof-of-work.
///
/// The value is hashed, the digest is rendered as a lowercase hex string,
/// and that hex string is hashed again. Hashing the hex rendering (rather
/// than the raw digest bytes) is part of the addressing format: every
/// stored address and every golden value depends on it.
pub fn double_hash(value: &str) -> String {
    let first = HEXLOWER.encode(sha256_digest(value.as_bytes()).as_slice());
    HEXLOWER.encode(sha256_digest(first.as_bytes()).as_slice())
}

pub fn ripemd160_digest(data: &[u8]) -> Vec<u8> {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

pub fn base58_decode(data: &str) -> Result<Vec<u8>> {
    bs58::decode(data)
        .into_vec()
        .map_err(|e| LedgerError::Wallet(format!("Invalid base58 encoding: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_hash_golden_value() {
        assert_eq!(
            double_hash("Foo"),
            "37a543fa670200f6171cf29f5d4cae79f7a2b90f1a9b1d4f7be4613532d37f72"
        );
    }

    #[test]
    fn test_double_hash_deterministic() {
        assert_eq!(double_hash("lattice"), double_hash("lattice"));
    }

    #[test]
    fn test_double_hash_avalanche() {
        // One changed byte must change the digest; the exact value is
        // unpredictable so only inequality is checked.
        assert_ne!(double_hash("Foo"), double_hash("FoO"));
        assert_ne!(double_hash("Foo"), double_hash("Foo "));
    }

    #[test]
    fn test_double_hash_empty_value() {
        assert_eq!(
            double_hash(""),
            "cd372fb85148700fa88095e3492d3f9f5beb43e555e5ff26d95f5a6adc36f8e6"
        );
    }

    #[test]
    fn test_base58_round_trip() {
        let payload = b"lattice-chain payload";
        let encoded = base58_encode(payload);
        let decoded = base58_decode(&encoded).unwrap();
        assert_eq!(decoded.as_slice(), payload);
    }

    #[test]
    fn test_base58_decode_invalid() {
        assert!(base58_decode("0OIl not base58").is_err());
    }
}
