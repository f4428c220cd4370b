use axum::{Json, http::StatusCode, response::IntoResponse};

/// Outcome of a probe endpoint.
///
/// Both variants carry the same body so callers can always report which
/// checks passed; only the status line differs.
#[derive(Debug)]
pub enum ProbeResponse<T>
where
    T: serde::Serialize,
{
    Ready(T),
    Unavailable(T),
}

impl<T> ProbeResponse<T>
where
    T: serde::Serialize,
{
    pub fn from_check(ok: bool, body: T) -> Self {
        if ok {
            Self::Ready(body)
        } else {
            Self::Unavailable(body)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ready(_) => StatusCode::OK,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl<T> IntoResponse for ProbeResponse<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match self {
            Self::Ready(body) | Self::Unavailable(body) => (status, Json(body)).into_response(),
        }
    }
}
