use axum::{
    Json, Router,
    http::{HeaderValue, Method},
    routing::get,
};
use launchpad_core::controller::Controller;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::app::controller::HealthController;
use crate::app::state::AppState;
use crate::config::CorsOrigins;
use crate::docs;

pub fn routes(state: AppState, cors_origins: &CorsOrigins) -> Router {
    Router::new()
        .merge(HealthController::router())
        .route("/api-doc/openapi.json", get(|| async { Json(docs::openapi()) }))
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Same methods the browser-facing CORS plugin allows by default.
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        tracing::warn!("ignoring invalid CORS origin `{origin}`: {err}");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new().allow_origin(allow_origin).allow_methods([
        Method::GET,
        Method::HEAD,
        Method::PUT,
        Method::PATCH,
        Method::POST,
        Method::DELETE,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt as _;

    fn app() -> Router {
        routes(AppState::default(), &CorsOrigins::Any)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_status_and_uptime() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn wildcard_cors_header_on_every_route() {
        let response = app()
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://launchpad.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn preflight_is_answered() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/health")
                    .header(header::ORIGIN, "https://launchpad.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn listed_origins_are_echoed_only_when_allowed() {
        let app = routes(
            AppState::default(),
            &CorsOrigins::List(vec!["https://launchpad.example".into()]),
        );

        let allowed = app
            .clone()
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://launchpad.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://launchpad.example"
        );

        let denied = app
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn readiness_and_docs_are_routed() {
        let ready = app()
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ready.status(), StatusCode::OK);
        assert_eq!(json_body(ready).await["checks"]["service"], "ok");

        let docs = app()
            .oneshot(Request::get("/api-doc/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(docs.status(), StatusCode::OK);
        assert!(json_body(docs).await["paths"]["/health"].is_object());
    }

    #[tokio::test]
    async fn readiness_is_degraded_when_database_is_down() {
        let state = AppState::new(Some(sea_orm::DatabaseConnection::default()), std::time::Instant::now());
        let response = routes(state, &CorsOrigins::Any)
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["database"], "unavailable");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
