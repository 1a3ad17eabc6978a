//! # Lattice Chain - a minimal distributed-ledger engine
//!
//! An append-only chain of blocks carrying UTXO-model value transfers,
//! secured by content hashing and a brute-force proof-of-work puzzle.
//!
//! ## How the pieces fit together
//! - `core/`: the engine itself - blocks and chain validation, the
//!   transaction/UTXO model, the proof-of-work search, and the
//!   wallet-facing ledger view with spend selection
//! - `wallet/`: key pair generation, address derivation, persisted keyring
//! - `network/`: the JSON message envelope nodes exchange (no transport)
//! - `config/`: process configuration from a toml file
//! - `utils/`: the double-hash primitive, encodings, timestamps
//! - `cli/`: command-line parsing for the node binary
//!
//! ## Key design decisions
//! - Everything is addressed by a double SHA-256 over string-rendered
//!   fields, so every node recomputes identical addresses from content
//! - Transactions freeze their hash at construction; mutation afterwards
//!   is what validation detects
//! - Monetary amounts are fixed-precision decimals, never floats
//! - The chain is an in-memory value; persistence and transport belong to
//!   collaborators outside the core

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod network;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use crate::cli::{Command, Opt};
pub use crate::config::{Settings, GLOBAL_CONFIG};
pub use crate::core::{
    Block, Blockchain, Coin, Data, Input, Ledger, LockScript, Output, Transaction, UnlockScript,
};
pub use crate::error::{LedgerError, Result};
pub use crate::network::{decode_message, encode_message, Message};
pub use crate::utils::{current_timestamp, double_hash};
pub use crate::wallet::{validate_address, Wallet, Wallets};
