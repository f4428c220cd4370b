use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockExplorer {
    pub name: &'static str,
    pub url: &'static str,
}

/// An EVM network the wallet can connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub id: u64,
    pub name: &'static str,
    pub native_currency: NativeCurrency,
    /// Public RPC endpoint used when a transport has no explicit url.
    pub rpc_url: &'static str,
    pub block_explorer: Option<BlockExplorer>,
    pub testnet: bool,
}

pub const BASE_SEPOLIA: Chain = Chain {
    id: 84532,
    name: "Base Sepolia",
    native_currency: NativeCurrency {
        name: "Sepolia Ether",
        symbol: "ETH",
        decimals: 18,
    },
    rpc_url: "https://sepolia.base.org",
    block_explorer: Some(BlockExplorer {
        name: "Basescan",
        url: "https://sepolia.basescan.org",
    }),
    testnet: true,
};
