use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one chain must be configured")]
    NoChains,
    #[error("chain {0} is configured more than once")]
    DuplicateChain(u64),
    #[error("chain {0} has no transport")]
    MissingTransport(u64),
    #[error("app name must not be empty")]
    EmptyAppName,
    #[error("project id must not be empty")]
    EmptyProjectId,
    #[error("invalid RPC url `{url}` for chain {chain_id}: {source}")]
    InvalidRpcUrl {
        chain_id: u64,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("malformed wallet store: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed Map entry in wallet store")]
    InvalidMap,
    #[error("bigint `{0}` is not a 64-bit integer")]
    InvalidBigInt(String),
}
