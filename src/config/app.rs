use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use launchpad_core::config::{ConfigBuilder, var_opt, var_or};
use tokio::sync::OnceCell;

pub const DEFAULT_PORT: u16 = 3001;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

static APP: OnceCell<AppConfig> = OnceCell::const_new();

/// Origins allowed by the CORS layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub cors_origins: CorsOrigins,
}

impl ConfigBuilder for AppConfig {
    fn build_from<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var_or(&lookup, "PORT", DEFAULT_PORT) {
            0 => {
                tracing::warn!("`PORT` is 0. defaulting to {DEFAULT_PORT}");
                DEFAULT_PORT
            }
            port => port,
        };

        let host = var_or(&lookup, "HOST", DEFAULT_HOST);

        let database_url = var_opt(&lookup, "DATABASE_URL");
        if database_url.is_none() {
            tracing::warn!("cannot read `DATABASE_URL`, the database will not be registered");
        }

        let database_max_connections = var_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        if database_max_connections == 0 {
            anyhow::bail!("`DATABASE_MAX_CONNECTIONS` must be at least 1");
        }

        let cors_origins = var_opt(&lookup, "CORS_ORIGIN")
            .map(|raw| CorsOrigins::parse(&raw))
            .unwrap_or(CorsOrigins::Any);

        Ok(AppConfig {
            host,
            port,
            database_url,
            database_max_connections,
            cors_origins,
        })
    }
}

impl AppConfig {
    /// Process-wide configuration, read from the environment on first use.
    pub async fn get() -> anyhow::Result<&'static AppConfig> {
        APP.get_or_try_init(|| async { AppConfig::build() }).await
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn build(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let env: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::build_from(|key| env.get(key).map(|value| value.to_string()))
    }

    #[test]
    fn port_defaults_to_3001_when_unset() {
        assert_eq!(build(&[]).unwrap().port, 3001);
    }

    #[test]
    fn port_is_read_from_env() {
        assert_eq!(build(&[("PORT", "8080")]).unwrap().port, 8080);
        assert_eq!(build(&[("PORT", " 8080 ")]).unwrap().port, 8080);
    }

    #[test]
    fn unusable_port_falls_back_to_default() {
        for raw in ["not-a-number", "", "0", "70000", "-1", "80.5"] {
            assert_eq!(build(&[("PORT", raw)]).unwrap().port, DEFAULT_PORT, "PORT={raw:?}");
        }
    }

    #[test]
    fn binds_all_interfaces_by_default() {
        let config = build(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn database_is_optional() {
        let config = build(&[]).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 10);

        let config = build(&[
            ("DATABASE_URL", "postgres://localhost/launchpad"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/launchpad"));
        assert_eq!(config.database_max_connections, 4);
    }

    #[test]
    fn zero_max_connections_is_rejected() {
        assert!(build(&[("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
    }

    #[test]
    fn cors_origin_wildcard_or_list() {
        assert_eq!(build(&[]).unwrap().cors_origins, CorsOrigins::Any);
        assert_eq!(build(&[("CORS_ORIGIN", "*")]).unwrap().cors_origins, CorsOrigins::Any);
        assert_eq!(
            build(&[("CORS_ORIGIN", "https://a.example, https://b.example")])
                .unwrap()
                .cors_origins,
            CorsOrigins::List(vec!["https://a.example".into(), "https://b.example".into()])
        );
    }
}
