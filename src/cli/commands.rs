use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "lattice-chain")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "createwallet", about = "Create a new wallet key pair")]
    Createwallet,
    #[command(name = "listaddresses", about = "Print local wallet addresses")]
    ListAddresses,
    #[command(
        name = "demo",
        about = "Run an end-to-end transfer on a fresh in-memory chain"
    )]
    Demo {
        #[arg(help = "Amount of coins to transfer", default_value = "1")]
        amount: String,
        #[arg(
            long,
            help = "Trailing zero bits required by the proof of work",
            default_value_t = 8
        )]
        difficulty: u32,
    },
}
