use crate::error::{LedgerError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Process-wide settings, loaded once. The config file path comes from the
/// `LATTICE_CONFIG` environment variable, falling back to `lattice.toml`
/// in the working directory; a missing file is created with defaults.
pub static GLOBAL_CONFIG: Lazy<Settings> = Lazy::new(Settings::load_global);

const CONFIG_PATH_KEY: &str = "LATTICE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "lattice.toml";
const DEFAULT_PORT: u16 = 7353;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Listen for incoming requests on this address; `*` means all.
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerSettings {
    /// First peer to connect to.
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSettings {
    /// Path of the persisted keyring.
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub peer: PeerSettings,
    pub wallet: WalletSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings {
                bind: "*".to_string(),
                port: DEFAULT_PORT,
            },
            peer: PeerSettings {
                host: "localhost".to_string(),
                port: DEFAULT_PORT,
            },
            wallet: WalletSettings {
                file: crate::wallet::WALLET_FILE.to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a toml file. A missing file is written out with
    /// the default configuration first, so a fresh node starts with a
    /// config it can edit.
    pub fn load(path: &Path) -> Result<Settings> {
        if !path.exists() {
            let settings = Settings::default();
            settings.write(path)?;
            return Ok(settings);
        }
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| LedgerError::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let raw = toml::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to render settings: {e}")))?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Address the node server listens on.
    pub fn node_server_address(&self) -> String {
        format!("tcp://{}:{}", self.server.bind, self.server.port)
    }

    pub fn wallet_path(&self) -> PathBuf {
        PathBuf::from(&self.wallet.file)
    }

    fn load_global() -> Settings {
        let path = env::var(CONFIG_PATH_KEY).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        match Settings::load(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not load configuration from {path}: {e}; using defaults");
                Settings::default()
            }
        }
    }
}
