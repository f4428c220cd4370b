mod app;

pub use app::{AppConfig, CorsOrigins};
