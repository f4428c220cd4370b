use crate::config::{WalletConfig, config};
use crate::query::{QueryClient, query_client};
use crate::state::{WalletState, cookie_to_initial_state};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalSize {
    #[default]
    Wide,
    Compact,
}

/// Presentation options of the connect modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub theme: Theme,
    pub modal_size: ModalSize,
    /// `None` follows the browser locale.
    pub locale: Option<String>,
}

/// Outermost layer: wallet configuration and connection state.
#[derive(Debug)]
pub struct WalletProvider<C> {
    config: &'static WalletConfig,
    state: WalletState,
    child: C,
}

/// Middle layer: the data-fetching client.
#[derive(Debug)]
pub struct QueryClientProvider<C> {
    client: &'static QueryClient,
    child: C,
}

/// Innermost layer: the connect modal and its presentation.
#[derive(Debug)]
pub struct UiKitProvider<C> {
    options: UiOptions,
    child: C,
}

pub type ProviderTree<C> = WalletProvider<QueryClientProvider<UiKitProvider<C>>>;

/// Wraps `children` in the launchpad's providers.
///
/// Wallet state is pre-hydrated from `cookie` when it carries a wallet
/// store. A store that cannot be read is logged and ignored, so the tree
/// starts disconnected instead.
pub fn providers<C>(children: C, cookie: Option<&str>) -> ProviderTree<C> {
    providers_with(config(), query_client(), UiOptions::default(), children, cookie)
}

pub fn providers_with<C>(
    config: &'static WalletConfig,
    client: &'static QueryClient,
    options: UiOptions,
    children: C,
    cookie: Option<&str>,
) -> ProviderTree<C> {
    let initial = cookie_to_initial_state(config, cookie).unwrap_or_else(|err| {
        tracing::warn!("ignoring wallet cookie: {err}");
        None
    });

    WalletProvider {
        config,
        state: WalletState::hydrate(config, initial),
        child: QueryClientProvider {
            client,
            child: UiKitProvider { options, child: children },
        },
    }
}

impl<C> WalletProvider<C> {
    pub fn config(&self) -> &'static WalletConfig {
        self.config
    }

    pub fn wallet_state(&self) -> &WalletState {
        &self.state
    }

    pub fn child(&self) -> &C {
        &self.child
    }
}

impl<C> QueryClientProvider<C> {
    pub fn client(&self) -> &'static QueryClient {
        self.client
    }

    pub fn child(&self) -> &C {
        &self.child
    }
}

impl<C> UiKitProvider<C> {
    pub fn options(&self) -> &UiOptions {
        &self.options
    }

    pub fn child(&self) -> &C {
        &self.child
    }
}

impl<C> ProviderTree<C> {
    pub fn query_client(&self) -> &'static QueryClient {
        self.child.client
    }

    pub fn ui_options(&self) -> &UiOptions {
        &self.child.child.options
    }

    pub fn children(&self) -> &C {
        &self.child.child.child
    }

    pub fn into_children(self) -> C {
        self.child.child.child
    }
}
