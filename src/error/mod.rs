//! Error handling for the ledger engine
//!
//! This module provides the error types for all ledger operations. The
//! taxonomy follows the validation design: construction/shape errors,
//! integrity errors, resource errors. Lookups that find nothing return
//! `Option` instead of an error.

use rust_decimal::Decimal;
use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error types for ledger operations
#[derive(Debug, Clone)]
pub enum LedgerError {
    /// Wrong or unparseable value container payload
    Data(String),
    /// Transaction construction or validation errors
    Transaction(String),
    /// Block construction or shape errors
    InvalidBlock(String),
    /// Candidate block does not link to the chain tail
    ParentLinkage { expected: String, found: String },
    /// Candidate block index does not continue the chain
    BlockIndex { expected: u64, found: u64 },
    /// First block of the chain is not the known genesis block
    CorruptGenesis(String),
    /// Block address does not match the recomputed header hash
    AddressMismatch { expected: String, found: String },
    /// Insufficient funds for a requested spend
    InsufficientFunds { required: Decimal, available: Decimal },
    /// Proof-of-work search errors (e.g. external cancellation)
    Mining(String),
    /// Wallet operation errors
    Wallet(String),
    /// Cryptographic operation errors
    Crypto(String),
    /// Configuration errors
    Config(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// File I/O errors
    Io(String),
    /// Node message envelope errors
    Message(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Data(msg) => write!(f, "Data error: {msg}"),
            LedgerError::Transaction(msg) => write!(f, "Transaction error: {msg}"),
            LedgerError::InvalidBlock(msg) => write!(f, "Invalid block: {msg}"),
            LedgerError::ParentLinkage { expected, found } => {
                write!(
                    f,
                    "Wrong address for the previous block: expected {expected}, found {found}"
                )
            }
            LedgerError::BlockIndex { expected, found } => {
                write!(
                    f,
                    "Index of block does not continue the chain: expected {expected}, found {found}"
                )
            }
            LedgerError::CorruptGenesis(found) => {
                write!(
                    f,
                    "Blockchain does not start with the known genesis block: {found}"
                )
            }
            LedgerError::AddressMismatch { expected, found } => {
                write!(
                    f,
                    "Block address does not match the calculated value: expected {expected}, found {found}"
                )
            }
            LedgerError::InsufficientFunds {
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient funds: required {required}, available {available}"
                )
            }
            LedgerError::Mining(msg) => write!(f, "Mining error: {msg}"),
            LedgerError::Wallet(msg) => write!(f, "Wallet error: {msg}"),
            LedgerError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            LedgerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::Io(msg) => write!(f, "I/O error: {msg}"),
            LedgerError::Message(msg) => write!(f, "Message error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for LedgerError {
    fn from(err: bincode::error::EncodeError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for LedgerError {
    fn from(err: bincode::error::DecodeError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}
