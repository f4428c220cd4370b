use tokio::io::AsyncWriteExt;
use utoipa::OpenApi;

use crate::app::controller::HealthControllerApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "EARN Launchpad API", description = "API Docs"),
    tags((name = "HealthController", description = "Liveness and readiness probes"))
)]
pub struct MainApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut docs = MainApiDoc::openapi();
    docs.merge(HealthControllerApi::openapi());
    docs
}

/// Writes the OpenAPI document to `path`, replacing any previous copy.
pub async fn generate_docs(path: &str) -> anyhow::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await?;

    let docs = openapi().to_pretty_json()?;

    file.write_all(docs.as_bytes()).await?;
    file.flush().await?;

    tracing::info!("OpenAPI document written to {path}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_both_probes() {
        let docs = openapi();
        assert!(docs.paths.paths.contains_key("/health"));
        assert!(docs.paths.paths.contains_key("/health/ready"));
    }
}
