use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::AppConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens the connection pool when a database is configured.
///
/// A configured but unreachable database is a startup failure.
pub async fn connect(config: &AppConfig) -> anyhow::Result<Option<DatabaseConnection>> {
    let Some(url) = config.database_url.as_deref() else {
        return Ok(None);
    };

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(config.database_max_connections)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .context("cannot connect to the database")?;

    tracing::info!(
        max_connections = config.database_max_connections,
        "database connection pool ready"
    );

    Ok(Some(db))
}

pub async fn ping(db: &DatabaseConnection) -> bool {
    match db.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("database ping failed: {err}");
            false
        }
    }
}

/// Closes the pool. Failures are logged and otherwise ignored since the
/// process is already on its way out.
pub async fn disconnect(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => tracing::info!("database connection pool closed"),
        Err(err) => tracing::error!("cannot close the database connection pool: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::config::ConfigBuilder;

    #[tokio::test]
    async fn no_url_means_no_connection() {
        let config = AppConfig::build_from(|_| None).unwrap();
        assert!(connect(&config).await.unwrap().is_none());
    }
}
