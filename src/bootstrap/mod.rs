use std::process::ExitCode;

pub mod database;
mod env;
mod server;
mod tracing;

pub use server::init_server;

pub async fn init_base() {
    env::init_env().await;
    tracing::init_tracing().await;
}

/// Logs a failed run and maps it to the process exit status.
pub fn exit_code(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ::tracing::error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_error_exits_with_failure() {
        let err = anyhow::anyhow!("Address already in use").context("cannot listen on 0.0.0.0:3001");
        assert_eq!(exit_code(Err(err)), ExitCode::FAILURE);
    }

    #[test]
    fn clean_shutdown_exits_with_success() {
        assert_eq!(exit_code(Ok(())), ExitCode::SUCCESS);
    }
}
