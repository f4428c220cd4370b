use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use serde::Serialize;
use url::Url;

use crate::chain::{BASE_SEPOLIA, Chain};
use crate::error::ConfigError;

pub const APP_NAME: &str = "EARN Launchpad";

/// Stand-in shipped in source. Real deployments set
/// `WALLETCONNECT_PROJECT_ID` at build time.
pub const PLACEHOLDER_PROJECT_ID: &str = "YOUR_WALLETCONNECT_PROJECT_ID";

pub const PROJECT_ID: &str = match option_env!("WALLETCONNECT_PROJECT_ID") {
    Some(id) => id,
    None => PLACEHOLDER_PROJECT_ID,
};

/// Prefix of the persisted store cookie (`<key>.store`).
pub const DEFAULT_STORAGE_KEY: &str = "wagmi";

static CONFIG: LazyLock<WalletConfig> = LazyLock::new(WalletConfig::launchpad);

/// The launchpad's wallet configuration. Built on first use and shared for
/// the life of the process, so every caller sees the same instance.
pub fn config() -> &'static WalletConfig {
    &CONFIG
}

/// How requests for a chain reach an RPC node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Transport {
    /// JSON-RPC over HTTP. `None` uses the chain's public RPC url.
    Http { url: Option<String> },
}

impl Transport {
    pub fn http() -> Self {
        Transport::Http { url: None }
    }

    pub fn http_with_url(url: impl Into<String>) -> Self {
        Transport::Http { url: Some(url.into()) }
    }

    pub fn endpoint<'a>(&'a self, chain: &'a Chain) -> &'a str {
        match self {
            Transport::Http { url: Some(url) } => url,
            Transport::Http { url: None } => chain.rpc_url,
        }
    }
}

/// Wallets offered in the connect modal, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WalletId {
    Rainbow,
    Coinbase,
    MetaMask,
    WalletConnect,
}

pub const DEFAULT_WALLETS: [WalletId; 4] = [
    WalletId::Rainbow,
    WalletId::Coinbase,
    WalletId::MetaMask,
    WalletId::WalletConnect,
];

/// Immutable wallet connection settings.
///
/// Always holds at least one chain and a transport for every chain: the
/// only ways to obtain one are [`config`] and [`WalletConfigBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    app_name: String,
    project_id: String,
    chains: Vec<Chain>,
    transports: BTreeMap<u64, Transport>,
    storage_key: String,
    wallets: Vec<WalletId>,
}

impl WalletConfig {
    fn launchpad() -> Self {
        if PROJECT_ID == PLACEHOLDER_PROJECT_ID {
            tracing::warn!("WalletConnect project id is the placeholder value");
        }

        WalletConfig {
            app_name: APP_NAME.to_owned(),
            project_id: PROJECT_ID.to_owned(),
            chains: vec![BASE_SEPOLIA],
            transports: BTreeMap::from([(BASE_SEPOLIA.id, Transport::http())]),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            wallets: DEFAULT_WALLETS.to_vec(),
        }
    }

    pub fn builder(app_name: impl Into<String>, project_id: impl Into<String>) -> WalletConfigBuilder {
        WalletConfigBuilder {
            config: WalletConfig {
                app_name: app_name.into(),
                project_id: project_id.into(),
                chains: Vec::new(),
                transports: BTreeMap::new(),
                storage_key: DEFAULT_STORAGE_KEY.to_owned(),
                wallets: DEFAULT_WALLETS.to_vec(),
            },
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn has_placeholder_project_id(&self) -> bool {
        self.project_id == PLACEHOLDER_PROJECT_ID
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// First configured chain, used when no other chain is known.
    pub fn default_chain(&self) -> &Chain {
        &self.chains[0]
    }

    pub fn chain(&self, id: u64) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.id == id)
    }

    pub fn transport(&self, chain_id: u64) -> Option<&Transport> {
        self.transports.get(&chain_id)
    }

    pub fn wallets(&self) -> &[WalletId] {
        &self.wallets
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Name of the cookie holding the persisted wallet store.
    pub fn store_cookie_name(&self) -> String {
        format!("{}.store", self.storage_key)
    }

    /// RPC endpoint for `chain_id`, or `None` for an unconfigured chain.
    pub fn rpc_url(&self, chain_id: u64) -> Option<Result<Url, ConfigError>> {
        let chain = self.chain(chain_id)?;
        let transport = self.transport(chain_id)?;
        let endpoint = transport.endpoint(chain);

        Some(Url::parse(endpoint).map_err(|source| ConfigError::InvalidRpcUrl {
            chain_id,
            url: endpoint.to_owned(),
            source,
        }))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::EmptyAppName);
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::EmptyProjectId);
        }
        if self.chains.is_empty() {
            return Err(ConfigError::NoChains);
        }

        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.id) {
                return Err(ConfigError::DuplicateChain(chain.id));
            }
            if !self.transports.contains_key(&chain.id) {
                return Err(ConfigError::MissingTransport(chain.id));
            }
        }

        for chain in &self.chains {
            if let Some(Err(err)) = self.rpc_url(chain.id) {
                return Err(err);
            }
        }

        Ok(())
    }
}

pub struct WalletConfigBuilder {
    config: WalletConfig,
}

impl WalletConfigBuilder {
    pub fn chain(mut self, chain: Chain, transport: Transport) -> Self {
        self.config.transports.insert(chain.id, transport);
        self.config.chains.push(chain);
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    pub fn wallets(mut self, wallets: impl IntoIterator<Item = WalletId>) -> Self {
        self.config.wallets = wallets.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<WalletConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launchpad_config_is_valid() {
        let config = config();
        config.validate().unwrap();

        assert_eq!(config.app_name(), "EARN Launchpad");
        assert_eq!(config.chains(), &[BASE_SEPOLIA]);
        assert_eq!(config.default_chain().id, 84532);
        assert_eq!(config.transport(84532), Some(&Transport::http()));
        assert_eq!(config.store_cookie_name(), "wagmi.store");
    }

    #[test]
    fn config_is_built_once() {
        assert!(std::ptr::eq(config(), config()));
    }

    #[test]
    fn placeholder_project_id_is_flagged() {
        let placeholder = WalletConfig::builder("app", PLACEHOLDER_PROJECT_ID)
            .chain(BASE_SEPOLIA, Transport::http())
            .build()
            .unwrap();
        assert!(placeholder.has_placeholder_project_id());

        let real = WalletConfig::builder("app", "3f1c0ffee")
            .chain(BASE_SEPOLIA, Transport::http())
            .build()
            .unwrap();
        assert!(!real.has_placeholder_project_id());
    }

    #[test]
    fn http_transport_defaults_to_chain_rpc() {
        let url = config().rpc_url(84532).unwrap().unwrap();
        assert_eq!(url.as_str(), "https://sepolia.base.org/");
        assert!(config().rpc_url(1).is_none());

        let custom = WalletConfig::builder("app", "id")
            .chain(BASE_SEPOLIA, Transport::http_with_url("https://rpc.example/base"))
            .build()
            .unwrap();
        assert_eq!(
            custom.rpc_url(84532).unwrap().unwrap().as_str(),
            "https://rpc.example/base"
        );
    }

    #[test]
    fn builder_rejects_invalid_configs() {
        assert!(matches!(
            WalletConfig::builder("app", "id").build(),
            Err(ConfigError::NoChains)
        ));
        assert!(matches!(
            WalletConfig::builder(" ", "id").chain(BASE_SEPOLIA, Transport::http()).build(),
            Err(ConfigError::EmptyAppName)
        ));
        assert!(matches!(
            WalletConfig::builder("app", "").chain(BASE_SEPOLIA, Transport::http()).build(),
            Err(ConfigError::EmptyProjectId)
        ));
        assert!(matches!(
            WalletConfig::builder("app", "id")
                .chain(BASE_SEPOLIA, Transport::http())
                .chain(BASE_SEPOLIA, Transport::http())
                .build(),
            Err(ConfigError::DuplicateChain(84532))
        ));
        assert!(matches!(
            WalletConfig::builder("app", "id")
                .chain(BASE_SEPOLIA, Transport::http_with_url("not a url"))
                .build(),
            Err(ConfigError::InvalidRpcUrl { chain_id: 84532, .. })
        ));
    }
}
