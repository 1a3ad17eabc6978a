// Entry point for the lattice-chain CLI. Wallet management works against
// the persisted keyring; the demo command exercises the whole engine on a
// fresh in-memory chain.

use clap::Parser;
use lattice_chain::core::{
    find_nonce, generate_hash, generate_new_block, verify_hash, Blockchain, Coin, Data, Ledger,
    Transaction,
};
use lattice_chain::wallet::{Wallet, Wallets};
use lattice_chain::{Command, LedgerError, Opt, GLOBAL_CONFIG};
use log::{error, LevelFilter};
use std::process;

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Createwallet => {
            let mut wallets = Wallets::open(&GLOBAL_CONFIG.wallet_path())?;
            let address = wallets.create_wallet()?;
            println!("Your new address: {address}");
        }
        Command::ListAddresses => {
            let wallets = Wallets::open(&GLOBAL_CONFIG.wallet_path())?;
            for address in wallets.get_addresses() {
                println!("{address}");
            }
        }
        Command::Demo { amount, difficulty } => {
            run_demo(&amount, difficulty)?;
        }
    }
    Ok(())
}

// Fund a throwaway wallet, transfer part of the balance to a second one,
// and mine both blocks with the configured difficulty.
fn run_demo(amount: &str, difficulty: u32) -> Result<(), Box<dyn std::error::Error>> {
    let alice = Wallet::new()?;
    let bob = Wallet::new()?;
    let alice_address = alice.get_address();
    let bob_address = bob.get_address();

    let mut blockchain = Blockchain::new();
    println!("Started a fresh chain at genesis block {}", blockchain.end().get_address());

    let funding =
        Transaction::new_coinbase(&alice_address, Coin::new("1000")?, Some("demo funding"))?;
    mine_and_append(&mut blockchain, vec![funding], difficulty)?;

    let ledger = Ledger::new(&blockchain, vec![alice_address.clone()]);
    println!("Balance of {alice_address}: {}", ledger.balance());

    let payment = ledger.get_transaction(&Data::Coin(Coin::new(amount)?), &bob_address)?;
    println!(
        "Built transaction {} with {} input(s) and {} output(s)",
        payment.get_hash(),
        payment.get_inputs().len(),
        payment.get_outputs().len()
    );
    for output in payment.get_outputs() {
        println!(
            "  {} -> {}",
            output.get_data().value_string(),
            output.get_script().token()
        );
    }

    mine_and_append(&mut blockchain, vec![payment], difficulty)?;

    let bob_ledger = Ledger::new(&blockchain, vec![bob_address.clone()]);
    println!("Balance of {bob_address}: {}", bob_ledger.balance());
    println!("Chain length: {}", blockchain.len());
    Ok(())
}

fn mine_and_append(
    blockchain: &mut Blockchain,
    data: Vec<Transaction>,
    difficulty: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut block = generate_new_block(blockchain, data)?;
    let nonce = find_nonce(block.get_address(), difficulty);
    // Acceptor-side re-check before the block enters the chain.
    if !verify_hash(&generate_hash(block.get_address(), &nonce), difficulty) {
        return Err(Box::new(LedgerError::Mining(
            "Mined nonce failed verification".to_string(),
        )));
    }
    block.set_proof_of_work(difficulty, nonce);
    println!("Mined block {} at height {}", block.get_address(), block.get_index());
    blockchain.append(block)?;
    Ok(())
}
