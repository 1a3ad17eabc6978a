// A wallet is a thin wrapper over the elliptic-curve primitive: it holds
// one ECDSA P-256 key pair and derives the address string that the ledger
// uses as a lock-script token.

use crate::error::{LedgerError, Result};
use crate::utils::{base58_decode, base58_encode, ripemd160_digest, sha256_digest};
use ring::rand::SystemRandom;
use ring::signature::{EcdsaKeyPair, KeyPair, ECDSA_P256_SHA256_FIXED_SIGNING};
use serde::{Deserialize, Serialize};

const ADDRESS_VERSION: u8 = 0x00;
pub const ADDRESS_CHECKSUM_LEN: usize = 4;

#[derive(Clone, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Wallet {
    pkcs8: Vec<u8>,
    public_key: Vec<u8>,
}

impl Wallet {
    pub fn new() -> Result<Wallet> {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &rng)
            .map_err(|e| LedgerError::Crypto(format!("Failed to generate ECDSA key pair: {e}")))?
            .as_ref()
            .to_vec();
        let key_pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &pkcs8, &rng)
            .map_err(|e| {
                LedgerError::Crypto(format!("Failed to create key pair from PKCS8: {e}"))
            })?;
        let public_key = key_pair.public_key().as_ref().to_vec();
        Ok(Wallet { pkcs8, public_key })
    }

    /// Address derived from the public key: version byte, ripemd160 of the
    /// sha256 of the key, 4-byte checksum, base58-encoded.
    pub fn get_address(&self) -> String {
        let pub_key_hash = hash_pub_key(&self.public_key);
        let mut payload = vec![ADDRESS_VERSION];
        payload.extend(pub_key_hash);
        let checksum = checksum(&payload);
        payload.extend(checksum);
        base58_encode(&payload)
    }

    pub fn get_public_key(&self) -> &[u8] {
        self.public_key.as_slice()
    }
}

pub fn hash_pub_key(pub_key: &[u8]) -> Vec<u8> {
    ripemd160_digest(&sha256_digest(pub_key))
}

fn checksum(payload: &[u8]) -> Vec<u8> {
    let digest = sha256_digest(&sha256_digest(payload));
    digest[..ADDRESS_CHECKSUM_LEN].to_vec()
}

/// Structural address check: decodes, splits off the checksum and
/// recomputes it over the versioned key hash.
pub fn validate_address(address: &str) -> bool {
    let payload = match base58_decode(address) {
        Ok(payload) => payload,
        Err(_) => return false,
    };
    if payload.len() < ADDRESS_CHECKSUM_LEN + 1 {
        return false;
    }
    let (versioned_hash, actual_checksum) = payload.split_at(payload.len() - ADDRESS_CHECKSUM_LEN);
    checksum(versioned_hash) == actual_checksum
}
