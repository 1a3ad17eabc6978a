//! Utility functions and helpers
//!
//! Cryptographic primitives (the double-hash at the heart of block
//! addressing and proof-of-work), encodings, timestamps, and the bincode
//! wrappers used for wallet persistence.

pub mod crypto;
pub mod serialization;

pub use crypto::{
    base58_decode, base58_encode, current_timestamp, double_hash, ripemd160_digest, sha256_digest,
};

pub use serialization::{deserialize, serialize};
