// The keyring: a collection of wallets persisted to a single file so
// addresses survive process restarts. The ledger core never touches this;
// it only sees the address strings.

use crate::error::Result;
use crate::utils::{deserialize, serialize};
use crate::wallet::Wallet;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const WALLET_FILE: &str = "wallet.dat";

pub struct Wallets {
    path: PathBuf,
    wallets: HashMap<String, Wallet>,
}

impl Wallets {
    /// Open the keyring stored at `path`, or start an empty one if the
    /// file does not exist yet.
    pub fn open(path: &Path) -> Result<Wallets> {
        let wallets = if path.exists() {
            let bytes = fs::read(path)?;
            deserialize(&bytes)?
        } else {
            HashMap::new()
        };
        Ok(Wallets {
            path: path.to_path_buf(),
            wallets,
        })
    }

    /// Generate a new key pair, add it to the keyring and persist. Returns
    /// the new address.
    pub fn create_wallet(&mut self) -> Result<String> {
        let wallet = Wallet::new()?;
        let address = wallet.get_address();
        self.wallets.insert(address.clone(), wallet);
        self.save()?;
        Ok(address)
    }

    pub fn get_addresses(&self) -> Vec<String> {
        self.wallets.keys().cloned().collect()
    }

    pub fn get_wallet(&self, address: &str) -> Option<&Wallet> {
        self.wallets.get(address)
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    fn save(&self) -> Result<()> {
        let bytes = serialize(&self.wallets)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let wallets = Wallets::open(&dir.path().join(WALLET_FILE)).unwrap();
        assert!(wallets.is_empty());
    }

    #[test]
    fn test_create_wallet_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(WALLET_FILE);

        let address = {
            let mut wallets = Wallets::open(&path).unwrap();
            wallets.create_wallet().unwrap()
        };

        let reloaded = Wallets::open(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get_wallet(&address).is_some());
        assert_eq!(reloaded.get_addresses(), vec![address]);
    }

    #[test]
    fn test_get_wallet_unknown_address() {
        let dir = tempdir().unwrap();
        let wallets = Wallets::open(&dir.path().join(WALLET_FILE)).unwrap();
        assert!(wallets.get_wallet("unknown").is_none());
    }
}
