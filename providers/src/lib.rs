//! Wallet connection wiring for the launchpad frontend.
//!
//! - `config` - the static wallet configuration (chains, transports, app identity)
//! - `state` - wallet connection state and cookie hydration
//! - `query` - the shared data-fetching client and its defaults
//! - `tree` - the provider tree wrapping application children

pub mod chain;
pub mod config;
pub mod error;
pub mod query;
pub mod state;
mod storage;
pub mod tree;

pub use config::{WalletConfig, config};
pub use error::{ConfigError, CookieError};
pub use query::{QueryClient, query_client};
pub use state::{ConnectionStatus, WalletState, cookie_to_initial_state};
pub use tree::{ProviderTree, providers};
