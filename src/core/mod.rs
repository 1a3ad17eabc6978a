//! Core ledger functionality
//!
//! The block and chain data structures, the transaction/UTXO model, the
//! proof-of-work search, and the wallet-facing UTXO view with spend
//! selection.

pub mod block;
pub mod blockchain;
pub mod ledger;
pub mod proof_of_work;
pub mod script;
pub mod transaction;
pub mod value;

pub use block::{format_block_data, generate_block_address, Block, BLOCK_VERSION, MAX_BLOCK_SIZE};
pub use blockchain::{
    generate_genesis_block, generate_new_block, validate_block, Blockchain, BLOCKCHAIN_VERSION,
    GENESIS_BLOCK_ADDRESS, GENESIS_BLOCK_PAYLOAD,
};
pub use ledger::{rebuild_index, utxo_reference, Ledger};
pub use proof_of_work::{
    find_nonce, find_nonce_cancellable, find_nonce_with_pool, generate_hash, verify_hash,
    NONCE_POOL,
};
pub use script::{LockScript, ScriptEngine, TokenEquality, UnlockScript};
pub use transaction::{
    generate_transaction_hash, validate_transaction, validate_transaction_in_chain, Input, Output,
    Transaction, COINBASE_TX_HASH, TRANSACTION_VERSION,
};
pub use value::{Coin, Data, COIN_PRECISION};
