use std::process::ExitCode;
use std::time::Instant;

mod app;
mod bootstrap;
mod config;
mod docs;
mod routes;

const OPENAPI_FILE: &str = "api.json";

#[tokio::main]
async fn main() -> ExitCode {
    let started_at = Instant::now();
    bootstrap::init_base().await;

    let result = if std::env::args().skip(1).any(|arg| arg == "--openapi") {
        docs::generate_docs(OPENAPI_FILE).await
    } else {
        bootstrap::init_server(started_at).await
    };

    bootstrap::exit_code(result)
}
