// A block is the container data structure holding transactions for
// inclusion in the chain. The header links to the previous block by
// address and carries the mining-related fields; the address itself is a
// double hash over the header material and doubles as tamper evidence.

use crate::core::transaction::Transaction;
use crate::error::{LedgerError, Result};
use crate::utils::double_hash;
use serde::{Deserialize, Serialize};

pub const BLOCK_VERSION: &str = "1.0";

/// Max length of the `data` sequence within a block. A count of
/// transactions, not a byte limit.
pub const MAX_BLOCK_SIZE: usize = 256;

/// Double hash over the string-concatenated header fields. Recomputable
/// from header values alone, independent of any object identity; an absent
/// parent renders as `None`.
pub fn generate_block_address(index: u64, timestamp: i64, parent: Option<&str>, data: &str) -> String {
    let parent = parent.unwrap_or("None");
    double_hash(&format!("{index}{timestamp}{parent}{data}"))
}

/// String form of a transaction list as it enters the address material:
/// the bracketed, single-quoted join of the transaction hashes. Depends
/// only on content, so every node recomputes the same block address.
pub fn format_block_data(data: &[Transaction]) -> String {
    let hashes: Vec<String> = data
        .iter()
        .map(|tx| format!("'{}'", tx.get_hash()))
        .collect();
    format!("[{}]", hashes.join(", "))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    version: String,
    timestamp: i64,
    // Unset until the proof-of-work search has run for this block.
    difficulty: Option<u32>,
    nonce: Option<String>,
    parent: Option<String>,
    // Merkle summarization is deliberately absent; the header slot stays.
    merkle_root: Option<String>,
    index: u64,
    data: Vec<Transaction>,
    address: String,
}

impl Block {
    /// Build a block from header fields and transaction data.
    ///
    /// The address is assigned here, once: pre-supplied for the genesis
    /// block, freshly computed for everything else. Shape violations
    /// (empty or oversized data) fail immediately.
    pub fn new(
        index: u64,
        timestamp: i64,
        parent: Option<String>,
        data: Vec<Transaction>,
        address: Option<String>,
    ) -> Result<Block> {
        if data.is_empty() {
            return Err(LedgerError::InvalidBlock(
                "Block data must not be empty".to_string(),
            ));
        }
        if data.len() > MAX_BLOCK_SIZE {
            return Err(LedgerError::InvalidBlock(format!(
                "Block data must not be longer than {MAX_BLOCK_SIZE}"
            )));
        }

        let address = match address {
            Some(address) => address,
            None => {
                generate_block_address(index, timestamp, parent.as_deref(), &format_block_data(&data))
            }
        };

        Ok(Block {
            version: BLOCK_VERSION.to_string(),
            timestamp,
            difficulty: None,
            nonce: None,
            parent,
            merkle_root: None,
            index,
            data,
            address,
        })
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_difficulty(&self) -> Option<u32> {
        self.difficulty
    }

    pub fn get_nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    pub fn get_parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_data(&self) -> &[Transaction] {
        self.data.as_slice()
    }

    pub fn get_address(&self) -> &str {
        &self.address
    }

    /// Record the outcome of the proof-of-work search. The nonce and
    /// difficulty are not part of the address material, so this does not
    /// re-address the block.
    pub fn set_proof_of_work(&mut self, difficulty: u32, nonce: String) {
        self.difficulty = Some(difficulty);
        self.nonce = Some(nonce);
    }

    /// Address material of this block's transaction list.
    pub fn data_string(&self) -> String {
        format_block_data(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::script::{LockScript, UnlockScript};
    use crate::core::transaction::{Input, Output, COINBASE_TX_HASH};
    use crate::core::value::{Coin, Data};

    fn sample_transaction() -> Transaction {
        let input = Input::new(
            Data::Coin(Coin::new("10").unwrap()),
            UnlockScript::new(Some("alice")),
            COINBASE_TX_HASH,
            0,
        );
        let output = Output::new(Data::Coin(Coin::new("10").unwrap()), LockScript::new("bob"));
        Transaction::with_timestamp(vec![input], vec![output], 1483272000).unwrap()
    }

    #[test]
    fn test_generate_block_address_golden_value() {
        // Known (index, timestamp, parent, data) tuple and its address.
        let address = generate_block_address(1, 1483272000, Some("parent"), "['My data']");
        assert_eq!(
            address,
            "27edb13573987de43e061a400f89bbb10992b3b88c5356deaad2344ae2e77c6b"
        );
    }

    #[test]
    fn test_generate_block_address_is_pure() {
        let a = generate_block_address(7, 1491580980, Some("abc"), "['x']");
        let b = generate_block_address(7, 1491580980, Some("abc"), "['x']");
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_block_address_missing_parent() {
        let with_none = generate_block_address(0, 1, None, "[]");
        let with_literal = double_hash("01None[]");
        assert_eq!(with_none, with_literal);
    }

    #[test]
    fn test_block_address_assigned_at_construction() {
        let tx = sample_transaction();
        let block = Block::new(1, 1483272000, Some("parent".to_string()), vec![tx.clone()], None)
            .unwrap();
        let expected = generate_block_address(
            1,
            1483272000,
            Some("parent"),
            &format_block_data(&[tx]),
        );
        assert_eq!(block.get_address(), expected);
    }

    #[test]
    fn test_block_rejects_empty_data() {
        let result = Block::new(1, 1483272000, None, vec![], None);
        assert!(result.is_err());
    }

    #[test]
    fn test_block_rejects_oversized_data() {
        let data: Vec<Transaction> = (0..MAX_BLOCK_SIZE + 1)
            .map(|_| sample_transaction())
            .collect();
        let result = Block::new(1, 1483272000, None, data, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_block_accepts_max_size_data() {
        let data: Vec<Transaction> = (0..MAX_BLOCK_SIZE).map(|_| sample_transaction()).collect();
        assert!(Block::new(1, 1483272000, None, data, None).is_ok());
    }

    #[test]
    fn test_format_block_data() {
        let tx = sample_transaction();
        let expected = format!("['{}']", tx.get_hash());
        assert_eq!(format_block_data(&[tx]), expected);
    }

    #[test]
    fn test_proof_of_work_fields_start_unset() {
        let block = Block::new(1, 1483272000, None, vec![sample_transaction()], None).unwrap();
        assert!(block.get_difficulty().is_none());
        assert!(block.get_nonce().is_none());
    }

    #[test]
    fn test_set_proof_of_work_keeps_address() {
        let mut block = Block::new(1, 1483272000, None, vec![sample_transaction()], None).unwrap();
        let address = block.get_address().to_string();
        block.set_proof_of_work(4, "553F5ED82A079C7A".to_string());
        assert_eq!(block.get_address(), address);
        assert_eq!(block.get_difficulty(), Some(4));
        assert_eq!(block.get_nonce(), Some("553F5ED82A079C7A"));
    }
}
