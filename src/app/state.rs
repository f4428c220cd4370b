use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: Option<DatabaseConnection>,
    started_at: Instant,
}

impl AppState {
    /// `started_at` is the process start, taken before any startup work.
    pub fn new(db: Option<DatabaseConnection>, started_at: Instant) -> Self {
        Self { db, started_at }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_counts_from_the_given_start() {
        let started_at = Instant::now() - Duration::from_secs(10);
        let state = AppState::new(None, started_at);

        assert!(state.uptime() >= Duration::from_secs(10));
        assert!(AppState::default().uptime() < state.uptime());
    }
}
