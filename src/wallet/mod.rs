//! Wallet key management
//!
//! Key pair generation, address derivation and the file-persisted keyring.
//! Addresses double as the lock-script tokens used by the ledger core.

#[allow(clippy::module_inception)]
pub mod wallet;
pub mod wallets;

pub use wallet::{hash_pub_key, validate_address, Wallet, ADDRESS_CHECKSUM_LEN};
pub use wallets::{Wallets, WALLET_FILE};
