// The chain itself - an append-only sequence of blocks rooted at a
// hard-coded genesis block. Every append re-validates the linkage, the
// index continuity, the genesis root and the candidate's own address, and
// either mutates the chain or leaves it untouched.
//
// The chain is a plain in-memory value with no interior locking. Appends
// take `&mut self`, so concurrent writers need external mutual exclusion
// (validate-then-push is one critical section); readers scanning the chain
// while another thread appends must hold the same lock or accept a stale
// snapshot.

use crate::core::block::{generate_block_address, Block};
use crate::core::script::UnlockScript;
use crate::core::transaction::{Input, Transaction, COINBASE_TX_HASH};
use crate::core::value::Data;
use crate::error::{LedgerError, Result};
use crate::utils::current_timestamp;
use log::info;
use serde::{Deserialize, Serialize};

pub const BLOCKCHAIN_VERSION: &str = "1.0";

/// Address of the hard-coded first block. Re-verified on every append as a
/// chain-wide tamper check.
pub const GENESIS_BLOCK_ADDRESS: &str =
    "f4a3ea59c413e6b470ed12757f3758ad70a4e9bff2954263f22be091871cb499";

/// Fixed textual payload carried by the genesis pseudo-transaction.
pub const GENESIS_BLOCK_PAYLOAD: &str =
    "NY-Times on 7.04.2017: U.S. Strikes Syria Over Chemical Attack";

const GENESIS_TIMESTAMP: i64 = 1491580980;

/// The very first block of every chain: fixed timestamp, no parent, one
/// pseudo-transaction whose sole input carries the genesis payload, and a
/// pre-supplied address.
pub fn generate_genesis_block() -> Block {
    let input = Input::new(
        Data::Raw(GENESIS_BLOCK_PAYLOAD.to_string()),
        UnlockScript::new(None),
        COINBASE_TX_HASH,
        0,
    );
    let transaction = Transaction::genesis(vec![input], GENESIS_TIMESTAMP);
    Block::new(
        0,
        GENESIS_TIMESTAMP,
        None,
        vec![transaction],
        Some(GENESIS_BLOCK_ADDRESS.to_string()),
    )
    .expect("genesis block construction is infallible")
}

/// Build the next block for the given chain: index and parent follow the
/// chain tail, the timestamp is the current UTC time, the address is
/// computed fresh. The block still has to be appended (and thereby
/// validated) to enter the chain.
pub fn generate_new_block(blockchain: &Blockchain, data: Vec<Transaction>) -> Result<Block> {
    let end = blockchain.end();
    let index = end.get_index() + 1;
    let timestamp = current_timestamp()?;
    let parent = end.get_address().to_string();
    Block::new(index, timestamp, Some(parent), data, None)
}

/// Check whether the candidate extends the chain. Always validated against
/// the last block; each failure raises its own integrity error and no check
/// runs after the first failure.
pub fn validate_block(blockchain: &Blockchain, block: &Block) -> Result<()> {
    let last_block = blockchain.end();

    // The candidate must link to the last block of the chain.
    let expected_parent = last_block.get_address();
    if block.get_parent() != Some(expected_parent) {
        return Err(LedgerError::ParentLinkage {
            expected: expected_parent.to_string(),
            found: block.get_parent().unwrap_or("None").to_string(),
        });
    }

    let expected_index = last_block.get_index() + 1;
    if block.get_index() != expected_index {
        return Err(LedgerError::BlockIndex {
            expected: expected_index,
            found: block.get_index(),
        });
    }

    let genesis_address = blockchain.blocks[0].get_address();
    if genesis_address != GENESIS_BLOCK_ADDRESS {
        return Err(LedgerError::CorruptGenesis(genesis_address.to_string()));
    }

    // The address must match the recomputation from the candidate's own
    // header fields.
    let expected_address = generate_block_address(
        block.get_index(),
        block.get_timestamp(),
        block.get_parent(),
        &block.data_string(),
    );
    if block.get_address() != expected_address {
        return Err(LedgerError::AddressMismatch {
            expected: expected_address,
            found: block.get_address().to_string(),
        });
    }

    Ok(())
}

/// Append-only chain of blocks, starting at the genesis block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blockchain {
    blocks: Vec<Block>,
    version: String,
}

impl Blockchain {
    pub fn new() -> Blockchain {
        Blockchain {
            blocks: vec![generate_genesis_block()],
            version: BLOCKCHAIN_VERSION.to_string(),
        }
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }

    /// The last block of the chain.
    pub fn end(&self) -> &Block {
        self.blocks
            .last()
            .expect("blockchain always contains the genesis block")
    }

    /// Number of blocks in the chain.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get_blocks(&self) -> &[Block] {
        self.blocks.as_slice()
    }

    /// Validate-then-push. On validation failure the chain is left
    /// unchanged and the integrity error propagates.
    pub fn append(&mut self, block: Block) -> Result<()> {
        validate_block(self, &block)?;
        info!(
            "Appended block {} at height {}",
            block.get_address(),
            block.get_index()
        );
        self.blocks.push(block);
        Ok(())
    }

    /// Linear scan across all blocks for a transaction by hash. A missing
    /// hash is an explicit not-found, never an error.
    pub fn get_transaction(&self, hash: &str) -> Option<&Transaction> {
        for block in &self.blocks {
            for transaction in block.get_data() {
                if transaction.get_hash() == hash {
                    return Some(transaction);
                }
            }
        }
        None
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}
