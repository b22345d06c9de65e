//! HTTP handlers: thin (de)serialization and delegation to
//! [`AdmissionService`]. All decision logic lives in `admission.rs`; the
//! handlers below only parse path/query/body and translate results to
//! wire shapes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::address::Address;
use crate::admission::AdmissionService;
use crate::error::Error;

use super::dto::{ClaimRequest, ErrorResponse, HealthResponse, IpResponse, StatsResponse};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InsufficientDifficulty { .. } => StatusCode::FORBIDDEN,
            Error::BackendWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::BackendRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// `GET /health`.
pub async fn health(State(service): State<AdmissionService>) -> impl IntoResponse {
    let _ = service.health();
    Json(HealthResponse { status: "ok" })
}

/// `GET /api/ip/{address}`.
pub async fn get_ip(
    State(service): State<AdmissionService>,
    Path(address): Path<String>,
) -> Response {
    let address: Address = match address.parse() {
        Ok(a) => a,
        Err(_) => return Error::BadRequest(format!("invalid address: {address}")).into_response(),
    };
    match service.get_ip(address) {
        Ok(info) => (StatusCode::OK, Json(IpResponse::from(info))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /api/subnet/{address}/{prefix}`.
pub async fn get_subnet(
    State(service): State<AdmissionService>,
    Path((address, prefix)): Path<(String, u8)>,
) -> Response {
    let address: Address = match address.parse() {
        Ok(a) => a,
        Err(_) => return Error::BadRequest(format!("invalid address: {address}")).into_response(),
    };
    let stats = service.get_subnet(address, prefix);
    (StatusCode::OK, Json(StatsResponse::from(stats))).into_response()
}

/// `POST /api/claim/{address}`.
pub async fn submit_claim(
    State(service): State<AdmissionService>,
    Path(address): Path<String>,
    Json(body): Json<ClaimRequest>,
) -> Response {
    let address: Address = match address.parse() {
        Ok(a) => a,
        Err(_) => return Error::BadRequest(format!("invalid address: {address}")).into_response(),
    };
    match service.submit_claim(address, &body.name, body.nonce) {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => e.into_response(),
    }
}
