use std::sync::LazyLock;
use std::time::Duration;

const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

static QUERY_CLIENT: LazyLock<QueryClient> = LazyLock::new(QueryClient::default);

/// The data-fetching client shared by every provider tree.
pub fn query_client() -> &'static QueryClient {
    &QUERY_CLIENT
}

/// Defaults applied to every query unless overridden per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefaults {
    /// How long fetched data counts as fresh.
    pub stale_time: Duration,
    /// How long unused data stays cached.
    pub gc_time: Duration,
    pub retry: u32,
    pub refetch_on_window_focus: bool,
    pub refetch_on_reconnect: bool,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        QueryDefaults {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(5 * 60),
            retry: 3,
            refetch_on_window_focus: true,
            refetch_on_reconnect: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct QueryClient {
    defaults: QueryDefaults,
}

impl QueryClient {
    pub fn new(defaults: QueryDefaults) -> Self {
        QueryClient { defaults }
    }

    pub fn defaults(&self) -> &QueryDefaults {
        &self.defaults
    }

    /// Whether a query that has failed `failure_count` times is tried again.
    pub fn should_retry(&self, failure_count: u32) -> bool {
        failure_count < self.defaults.retry
    }

    /// Exponential backoff: one second doubled per failure, capped at 30s.
    pub fn retry_delay(failure_count: u32) -> Duration {
        2u32.checked_pow(failure_count)
            .and_then(|factor| Duration::from_secs(1).checked_mul(factor))
            .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
    }
}
