// The transaction system - how value moves through the ledger. Transactions
// follow the UTXO model: each one consumes previously created outputs and
// creates new ones. Integrity comes from a content hash frozen at
// construction time, not from signatures.

use crate::core::blockchain::Blockchain;
use crate::core::script::{LockScript, UnlockScript};
use crate::core::value::{Coin, Data};
use crate::error::{LedgerError, Result};
use crate::utils::double_hash;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TRANSACTION_VERSION: &str = "1.0";

/// Sentinel referenced by inputs that have no real predecessor.
pub const COINBASE_TX_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

// This represents a transaction input - it references one prior output by
// (transaction hash, output index), like "spend output #2 of tx ABC".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    data: Data,
    script: UnlockScript,
    tx_hash: String,
    utxo_index: usize,
    coinbase_script: Option<String>,
}

impl Input {
    pub fn new(data: Data, script: UnlockScript, tx_hash: &str, utxo_index: usize) -> Input {
        Input {
            data,
            script,
            tx_hash: tx_hash.to_string(),
            utxo_index,
            coinbase_script: None,
        }
    }

    /// An input that introduces new value instead of spending an existing
    /// output. It points at the all-zero sentinel and carries a coinbase
    /// script (random filler when the miner supplies none).
    pub fn coinbase(data: Data, coinbase_script: Option<&str>) -> Input {
        let script = match coinbase_script {
            Some(script) => script.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        Input {
            data,
            script: UnlockScript::new(None),
            tx_hash: COINBASE_TX_HASH.to_string(),
            utxo_index: 0,
            coinbase_script: Some(script),
        }
    }

    pub fn get_data(&self) -> &Data {
        &self.data
    }

    pub fn get_script(&self) -> &UnlockScript {
        &self.script
    }

    pub fn get_tx_hash(&self) -> &str {
        &self.tx_hash
    }

    pub fn get_utxo_index(&self) -> usize {
        self.utxo_index
    }

    pub fn get_coinbase_script(&self) -> Option<&str> {
        self.coinbase_script.as_deref()
    }

    pub fn is_coinbase(&self) -> bool {
        self.coinbase_script.is_some() && self.tx_hash == COINBASE_TX_HASH
    }
}

// A transaction output - a value placed under a spending condition.
// "Pay this amount to whoever can satisfy the lock script."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    data: Data,
    script: LockScript,
}

impl Output {
    pub fn new(data: Data, script: LockScript) -> Output {
        Output { data, script }
    }

    pub fn get_data(&self) -> &Data {
        &self.data
    }

    pub fn get_script(&self) -> &LockScript {
        &self.script
    }
}

/// A transfer of value from inputs to outputs.
///
/// Exactly five fields. The hash is computed over the other four at
/// construction time and never updated: any later mutation desynchronizes
/// it, which is what the integrity check detects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    version: String,
    timestamp: i64,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    hash: String,
}

impl Transaction {
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Result<Transaction> {
        let timestamp = crate::utils::current_timestamp()?;
        Self::with_timestamp(inputs, outputs, timestamp)
    }

    /// Same shape as `new` but with a caller-supplied timestamp, so hash
    /// material is reproducible in tests and golden-value checks.
    pub fn with_timestamp(
        inputs: Vec<Input>,
        outputs: Vec<Output>,
        timestamp: i64,
    ) -> Result<Transaction> {
        if inputs.is_empty() {
            return Err(LedgerError::Transaction(
                "Transaction must have at least one input".to_string(),
            ));
        }
        if outputs.is_empty() {
            return Err(LedgerError::Transaction(
                "Transaction must have at least one output".to_string(),
            ));
        }
        Ok(Self::assemble(inputs, outputs, timestamp))
    }

    /// Coinbase-style transaction introducing `reward` for `to`.
    pub fn new_coinbase(
        to: &str,
        reward: Coin,
        coinbase_script: Option<&str>,
    ) -> Result<Transaction> {
        let input = Input::coinbase(Data::Coin(reward), coinbase_script);
        let output = Output::new(Data::Coin(reward), LockScript::new(to));
        Transaction::new(vec![input], vec![output])
    }

    /// The genesis pseudo-transaction is the one construction allowed to
    /// carry no outputs; it exists only inside the hard-coded first block.
    pub(crate) fn genesis(inputs: Vec<Input>, timestamp: i64) -> Transaction {
        Self::assemble(inputs, vec![], timestamp)
    }

    fn assemble(inputs: Vec<Input>, outputs: Vec<Output>, timestamp: i64) -> Transaction {
        let mut transaction = Transaction {
            version: TRANSACTION_VERSION.to_string(),
            timestamp,
            inputs,
            outputs,
            hash: String::new(),
        };
        transaction.hash = generate_transaction_hash(&transaction);
        transaction
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_inputs(&self) -> &[Input] {
        self.inputs.as_slice()
    }

    pub fn get_outputs(&self) -> &[Output] {
        self.outputs.as_slice()
    }

    pub fn get_hash(&self) -> &str {
        &self.hash
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].is_coinbase()
    }
}

/// Content hash over every field except the hash itself.
///
/// The concatenation order is fixed: timestamp, version, then per input its
/// value, script token, referenced hash and index, then per output its
/// value and lock token. Reordering inputs or outputs changes the hash.
pub fn generate_transaction_hash(transaction: &Transaction) -> String {
    let mut material = String::new();
    material.push_str(&transaction.timestamp.to_string());
    material.push_str(&transaction.version);
    for input in &transaction.inputs {
        material.push_str(&input.data.value_string());
        material.push_str(&input.script.token_string());
        material.push_str(&input.tx_hash);
        material.push_str(&input.utxo_index.to_string());
    }
    for output in &transaction.outputs {
        material.push_str(&output.data.value_string());
        material.push_str(output.script.token());
    }
    double_hash(&material)
}

/// Structural validation: an ordered battery of checks, stopping at the
/// first failure and logging which check failed.
pub fn validate_transaction(transaction: &Transaction) -> bool {
    let checks: [(&str, fn(&Transaction) -> bool); 3] = [
        ("syntax", check_syntax),
        ("io", check_io),
        ("hash", check_hash),
    ];
    for (name, check) in checks {
        if !check(transaction) {
            log::error!("Validation {name} of transaction failed");
            return false;
        }
    }
    log::debug!("Validation of transaction successful");
    true
}

/// Structural validation plus referenced-output existence against a chain:
/// every non-coinbase input must point at a transaction the chain can
/// locate. Whether that output is already spent elsewhere is not tracked.
pub fn validate_transaction_in_chain(transaction: &Transaction, blockchain: &Blockchain) -> bool {
    if !validate_transaction(transaction) {
        return false;
    }
    for input in transaction.get_inputs() {
        if input.is_coinbase() {
            continue;
        }
        if blockchain.get_transaction(input.get_tx_hash()).is_none() {
            log::error!(
                "Validation of transaction failed: referenced transaction {} not found",
                input.get_tx_hash()
            );
            return false;
        }
    }
    true
}

// The shape of a Rust struct is fixed at compile time, so the closest
// enforceable analogue of "exactly the canonical fields are present" is
// the version tag carried in the first field.
fn check_syntax(transaction: &Transaction) -> bool {
    transaction.version == TRANSACTION_VERSION
}

fn check_io(transaction: &Transaction) -> bool {
    !transaction.inputs.is_empty() && !transaction.outputs.is_empty()
}

fn check_hash(transaction: &Transaction) -> bool {
    transaction.hash == generate_transaction_hash(transaction)
}
