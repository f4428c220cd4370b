use axum::{Json, extract::State};
use launchpad_core::response::ProbeResponse;
use launchpad_macros::{controller, get, utoipa_response};

use crate::app::response::{HealthResponse, ReadyChecks, ReadyResponse};
use crate::app::state::AppState;
use crate::bootstrap::database;

pub struct HealthController;

#[controller(state = AppState)]
impl HealthController {
    #[get("/health")]
    #[utoipa_response(status = 200, body = HealthResponse, description = "Service is alive")]
    pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".to_owned(),
            uptime: state.uptime().as_secs_f64(),
        })
    }

    #[get("/health/ready")]
    #[utoipa_response(status = 200, body = ReadyResponse, description = "Dependencies are reachable")]
    #[utoipa_response(status = 503, body = ReadyResponse, description = "A dependency is unreachable")]
    pub async fn ready(State(state): State<AppState>) -> ProbeResponse<ReadyResponse> {
        let database = match &state.db {
            Some(db) => Some(database::ping(db).await),
            None => None,
        };
        let ok = database.unwrap_or(true);

        ProbeResponse::from_check(
            ok,
            ReadyResponse {
                status: if ok { "ok" } else { "degraded" }.to_owned(),
                checks: ReadyChecks {
                    service: "ok".to_owned(),
                    database: database.map(|up| if up { "ok" } else { "unavailable" }.to_owned()),
                },
            },
        )
    }
}
