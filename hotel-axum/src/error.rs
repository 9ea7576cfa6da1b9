use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hotel_core::{HotelError, ServiceMethodKind};

/// A pipeline error plus the operation summary shown to the client,
/// e.g. "Error Creating Room".
#[derive(Debug)]
pub struct HotelAxumError {
    pub error: anyhow::Error,
    pub summary: String,
}

impl HotelAxumError {
    pub fn new(method: ServiceMethodKind, label: &str, error: anyhow::Error) -> Self {
        Self {
            error,
            summary: format!("Error {} {label}", method.verb()),
        }
    }

    pub fn bad_request(method: ServiceMethodKind, label: &str, detail: impl Into<String>) -> Self {
        Self::new(method, label, HotelError::bad_request(detail).into_anyhow())
    }
}

impl IntoResponse for HotelAxumError {
    fn into_response(self) -> Response {
        let hotel = HotelError::normalize(self.error);
        let status = StatusCode::from_u16(hotel.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        tracing::debug!(status = status.as_u16(), summary = %self.summary, error = %hotel.detail, "error response");

        (status, Json(hotel.to_json(&self.summary))).into_response()
    }
}
