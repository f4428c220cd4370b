use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::WalletConfig;
use crate::error::CookieError;
use crate::storage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    #[default]
    Disconnected,
    Reconnecting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub uid: String,
}

/// An authorized wallet session on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub accounts: Vec<String>,
    pub chain_id: u64,
    pub connector: Connector,
}

/// Wallet connection state shared through the provider tree.
///
/// Only `chain_id`, `connections` and `current` are persisted; `status`
/// is derived again on hydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    pub chain_id: u64,
    /// Keyed by connector uid.
    #[serde(default, serialize_with = "storage::serialize_tagged_map")]
    pub connections: BTreeMap<String, Connection>,
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default, skip_serializing)]
    pub status: ConnectionStatus,
}

#[derive(Serialize, Deserialize)]
struct PersistedStore {
    state: WalletState,
    #[serde(default)]
    version: u32,
}

/// Version written by [`WalletState::to_cookie`].
const STORE_VERSION: u32 = 2;

impl WalletState {
    /// Disconnected, on the first configured chain.
    pub fn default_for(config: &WalletConfig) -> Self {
        WalletState {
            chain_id: config.default_chain().id,
            connections: BTreeMap::new(),
            current: None,
            status: ConnectionStatus::Disconnected,
        }
    }

    /// Turns persisted state into the state a freshly mounted tree starts
    /// from.
    ///
    /// Unknown chains fall back to the default chain and a dangling
    /// `current` is dropped. A surviving `current` connection starts in
    /// `Reconnecting`; anything else is `Disconnected`.
    pub fn hydrate(config: &WalletConfig, initial: Option<WalletState>) -> Self {
        let Some(mut state) = initial else {
            return Self::default_for(config);
        };

        if config.chain(state.chain_id).is_none() {
            tracing::debug!(chain_id = state.chain_id, "persisted chain is not configured");
            state.chain_id = config.default_chain().id;
        }

        if state
            .current
            .as_ref()
            .is_some_and(|uid| !state.connections.contains_key(uid))
        {
            state.current = None;
        }

        state.status = if state.current.is_some() {
            ConnectionStatus::Reconnecting
        } else {
            ConnectionStatus::Disconnected
        };

        state
    }

    pub fn current_connection(&self) -> Option<&Connection> {
        self.connections.get(self.current.as_ref()?)
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// `name=value` pair that [`cookie_to_initial_state`] reads back.
    pub fn to_cookie(&self, config: &WalletConfig) -> Result<String, CookieError> {
        let store = PersistedStore {
            state: self.clone(),
            version: STORE_VERSION,
        };
        Ok(format!("{}={}", config.store_cookie_name(), serde_json::to_string(&store)?))
    }
}

/// Extracts the persisted wallet state from a request's cookie header.
///
/// `Ok(None)` when there is no cookie or it carries no wallet store.
pub fn cookie_to_initial_state(
    config: &WalletConfig,
    cookie: Option<&str>,
) -> Result<Option<WalletState>, CookieError> {
    let Some(cookie) = cookie.filter(|cookie| !cookie.trim().is_empty()) else {
        return Ok(None);
    };

    let Some(raw) = storage::parse_cookie(cookie, &config.store_cookie_name()) else {
        return Ok(None);
    };

    let store: PersistedStore = storage::deserialize(raw)?;
    tracing::debug!(version = store.version, "wallet store read from cookie");

    Ok(Some(store.state))
}
