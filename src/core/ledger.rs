// The wallet-facing view of the chain: which outputs look spendable, what
// they add up to, and how to turn a requested amount into a concrete
// transaction with change.

use crate::core::blockchain::Blockchain;
use crate::core::script::{LockScript, UnlockScript};
use crate::core::transaction::{Input, Output, Transaction};
use crate::core::value::{Coin, Data};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Composite reference to one output: `"<tx_hash>.<index>"`. The dotted
/// string is also the index key, so iteration order is ascending by
/// reference.
pub fn utxo_reference(tx_hash: &str, index: usize) -> String {
    format!("{tx_hash}.{index}")
}

fn split_reference(reference: &str) -> Result<(&str, usize)> {
    let (tx_hash, index) = reference.split_once('.').ok_or_else(|| {
        LedgerError::Transaction(format!("Malformed UTXO reference: {reference}"))
    })?;
    let index = index.parse::<usize>().map_err(|e| {
        LedgerError::Transaction(format!("Malformed UTXO reference {reference}: {e}"))
    })?;
    Ok((tx_hash, index))
}

/// Full scan over an immutable chain snapshot, producing the UTXO index:
/// everything that looks spendable, and the subset locked to one of the
/// given addresses. Re-invocable; no hidden state. Outputs consumed
/// elsewhere are NOT filtered out - spent tracking is outside this design.
pub fn rebuild_index(
    blockchain: &Blockchain,
    addresses: &[String],
) -> (BTreeMap<String, Data>, BTreeMap<String, Data>) {
    let mut global_utxo = BTreeMap::new();
    let mut utxo = BTreeMap::new();
    for block in blockchain.get_blocks() {
        for transaction in block.get_data() {
            for (index, output) in transaction.get_outputs().iter().enumerate() {
                let reference = utxo_reference(transaction.get_hash(), index);
                global_utxo.insert(reference.clone(), output.get_data().clone());
                if addresses
                    .iter()
                    .any(|address| output.get_script().unlock(address))
                {
                    utxo.insert(reference, output.get_data().clone());
                }
            }
        }
    }
    (global_utxo, utxo)
}

/// UTXO view over a chain for one key-owning party.
///
/// Built once by a full linear scan over the borrowed chain snapshot; a
/// chain that has grown since needs a fresh `Ledger` (construction is the
/// same full scan `rebuild_index` performs). The restricted map only holds
/// outputs whose lock script unlocks under one of the caller's addresses.
pub struct Ledger<'a> {
    blockchain: &'a Blockchain,
    addresses: Vec<String>,
    global_utxo: BTreeMap<String, Data>,
    utxo: BTreeMap<String, Data>,
}

impl<'a> Ledger<'a> {
    pub fn new(blockchain: &'a Blockchain, addresses: Vec<String>) -> Ledger<'a> {
        let (global_utxo, utxo) = rebuild_index(blockchain, &addresses);
        Ledger {
            blockchain,
            addresses,
            global_utxo,
            utxo,
        }
    }

    pub fn get_addresses(&self) -> &[String] {
        self.addresses.as_slice()
    }

    /// All spendable-looking outputs across the whole chain.
    pub fn get_global_utxo(&self) -> &BTreeMap<String, Data> {
        &self.global_utxo
    }

    /// Spendable-looking outputs locked to the caller's addresses.
    pub fn get_utxo(&self) -> &BTreeMap<String, Data> {
        &self.utxo
    }

    /// Sum of the coin entries in the caller's UTXO set. Non-coin data has
    /// no balance contribution.
    pub fn balance(&self) -> Decimal {
        self.utxo
            .values()
            .filter_map(Data::as_coin)
            .map(Coin::value)
            .sum()
    }

    /// Build a transaction transferring `data` to `address`.
    ///
    /// Only coin payloads can be transferred. A UTXO is indivisible: if it
    /// is larger than the requested amount it is still consumed whole and
    /// the difference comes back as a change output locked to the owner of
    /// the last consumed UTXO. Consumption walks the restricted map in
    /// ascending reference order, so the composition is reproducible.
    pub fn get_transaction(&self, data: &Data, address: &str) -> Result<Transaction> {
        let requested = data.as_coin().ok_or_else(|| {
            LedgerError::Transaction(format!(
                "Cannot build a transaction for data {} to {address}",
                data.value_string()
            ))
        })?;

        let available = self.balance();
        if requested.value() > available {
            return Err(LedgerError::InsufficientFunds {
                required: requested.value(),
                available,
            });
        }

        let mut inputs = vec![];
        let mut total = Decimal::ZERO;
        let mut change_address: Option<String> = None;
        for (reference, entry) in &self.utxo {
            let coin = match entry.as_coin() {
                Some(coin) => coin,
                None => continue,
            };
            let (tx_hash, index) = split_reference(reference)?;
            let transaction = self.blockchain.get_transaction(tx_hash).ok_or_else(|| {
                LedgerError::Transaction(format!(
                    "Indexed transaction {tx_hash} not found in the chain"
                ))
            })?;
            let output = transaction.get_outputs().get(index).ok_or_else(|| {
                LedgerError::Transaction(format!(
                    "Output index {index} of transaction {tx_hash} out of range"
                ))
            })?;
            let owner = output.get_script().token().to_string();

            total += coin.value();
            inputs.push(Input::new(
                Data::Coin(*coin),
                UnlockScript::new(Some(owner.as_str())),
                tx_hash,
                index,
            ));
            change_address = Some(owner);
            if total >= requested.value() {
                break;
            }
        }

        let mut outputs = vec![];
        let change = total - requested.value();
        if change > Decimal::ZERO {
            let owner = change_address.ok_or_else(|| {
                LedgerError::Transaction("No UTXO was consumed for the change output".to_string())
            })?;
            outputs.push(Output::new(
                Data::Coin(Coin::from_decimal(change)?),
                LockScript::new(&owner),
            ));
        }
        outputs.push(Output::new(data.clone(), LockScript::new(address)));

        Transaction::new(inputs, outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::blockchain::generate_new_block;

    const ALICE: &str = "alice-address";
    const BOB: &str = "bob-address";

    fn coin(amount: &str) -> Coin {
        Coin::new(amount).unwrap()
    }

    /// Chain with one mined block paying `amounts` to `to`, one output per
    /// amount.
    fn chain_paying(to: &str, amounts: &[&str]) -> Blockchain {
        let mut blockchain = Blockchain::new();
        let input = Input::coinbase(Data::Coin(coin(amounts[0])), Some("test reward"));
        let outputs = amounts
            .iter()
            .map(|amount| Output::new(Data::Coin(coin(amount)), LockScript::new(to)))
            .collect();
        let transaction = Transaction::new(vec![input], outputs).unwrap();
        let block = generate_new_block(&blockchain, vec![transaction]).unwrap();
        blockchain.append(block).unwrap();
        blockchain
    }

    #[test]
    fn test_balance_on_genesis_only_chain_is_zero() {
        let blockchain = Blockchain::new();
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);
        assert_eq!(ledger.balance(), Decimal::ZERO);
        assert!(ledger.get_utxo().is_empty());
    }

    #[test]
    fn test_balance_sums_owned_outputs() {
        let blockchain = chain_paying(ALICE, &["1000", "2000", "1000"]);
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);
        assert_eq!(ledger.balance(), Decimal::from(4000));
    }

    #[test]
    fn test_balance_ignores_foreign_outputs() {
        let blockchain = chain_paying(BOB, &["6000"]);
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);
        assert_eq!(ledger.balance(), Decimal::ZERO);
        assert_eq!(ledger.get_global_utxo().len(), 1);
    }

    #[test]
    fn test_rebuild_index_fills_both_maps() {
        let blockchain = chain_paying(ALICE, &["1000", "2000"]);
        let (global_utxo, utxo) = rebuild_index(&blockchain, &[ALICE.to_string()]);
        assert_eq!(global_utxo.len(), 2);
        assert_eq!(utxo.len(), 2);
        let (global_utxo, empty) = rebuild_index(&blockchain, &[BOB.to_string()]);
        assert_eq!(global_utxo.len(), 2);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_get_transaction_single_utxo_with_change() {
        let blockchain = chain_paying(ALICE, &["1000"]);
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);

        let tx = ledger
            .get_transaction(&Data::Coin(coin("1")), BOB)
            .unwrap();

        assert_eq!(tx.get_inputs().len(), 1);
        assert_eq!(tx.get_outputs().len(), 2);
        let change = &tx.get_outputs()[0];
        let spent = &tx.get_outputs()[1];
        assert_eq!(change.get_data(), &Data::Coin(coin("999")));
        assert_eq!(change.get_script().token(), ALICE);
        assert_eq!(spent.get_data(), &Data::Coin(coin("1")));
        assert_eq!(spent.get_script().token(), BOB);
    }

    #[test]
    fn test_get_transaction_accumulates_utxos() {
        let blockchain = chain_paying(ALICE, &["1000", "1000", "1000", "1000"]);
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);

        let tx = ledger
            .get_transaction(&Data::Coin(coin("1001")), BOB)
            .unwrap();

        // Two 1000-coin outputs settle the request; their sum minus the
        // requested amount comes back as change.
        assert_eq!(tx.get_inputs().len(), 2);
        assert_eq!(tx.get_outputs().len(), 2);
        assert_eq!(tx.get_outputs()[0].get_data(), &Data::Coin(coin("999")));
        assert_eq!(tx.get_outputs()[1].get_data(), &Data::Coin(coin("1001")));
    }

    #[test]
    fn test_get_transaction_exact_amount_omits_change() {
        let blockchain = chain_paying(ALICE, &["1000"]);
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);

        let tx = ledger
            .get_transaction(&Data::Coin(coin("1000")), BOB)
            .unwrap();

        assert_eq!(tx.get_inputs().len(), 1);
        assert_eq!(tx.get_outputs().len(), 1);
        assert_eq!(tx.get_outputs()[0].get_data(), &Data::Coin(coin("1000")));
    }

    #[test]
    fn test_get_transaction_is_deterministic() {
        let blockchain = chain_paying(ALICE, &["500", "700", "900"]);
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);

        let first = ledger
            .get_transaction(&Data::Coin(coin("600")), BOB)
            .unwrap();
        let second = ledger
            .get_transaction(&Data::Coin(coin("600")), BOB)
            .unwrap();

        assert_eq!(first.get_inputs(), second.get_inputs());
        assert_eq!(first.get_outputs(), second.get_outputs());
    }

    #[test]
    fn test_get_transaction_insufficient_funds() {
        let blockchain = chain_paying(ALICE, &["1000", "1000", "1000", "1000"]);
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);

        let result = ledger.get_transaction(&Data::Coin(coin("4001")), BOB);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_get_transaction_rejects_raw_data() {
        let blockchain = chain_paying(ALICE, &["1000"]);
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);

        let result = ledger.get_transaction(&Data::Raw("Foobar".to_string()), BOB);
        assert!(matches!(result, Err(LedgerError::Transaction(_))));
    }

    #[test]
    fn test_new_ledger_sees_appended_blocks() {
        let mut blockchain = chain_paying(ALICE, &["1000"]);
        {
            let input = Input::coinbase(Data::Coin(coin("500")), Some("second reward"));
            let output = Output::new(Data::Coin(coin("500")), LockScript::new(ALICE));
            let transaction = Transaction::new(vec![input], vec![output]).unwrap();
            let block = generate_new_block(&blockchain, vec![transaction]).unwrap();
            blockchain.append(block).unwrap();
        }
        let ledger = Ledger::new(&blockchain, vec![ALICE.to_string()]);
        assert_eq!(ledger.balance(), Decimal::from(1500));
    }
}
