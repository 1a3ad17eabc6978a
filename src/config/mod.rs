//! Configuration management
//!
//! Process configuration loaded from a toml file with sensible defaults.

pub mod settings;

pub use settings::{PeerSettings, ServerSettings, Settings, WalletSettings, GLOBAL_CONFIG};
