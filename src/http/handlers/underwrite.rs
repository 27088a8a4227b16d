use crate::domain::merchant::{MerchantProfile, OfferMode};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UnderwriteParams {
    pub whatsapp_number: Option<String>,
    pub mode: Option<OfferMode>,
}

pub async fn underwrite(
    State(state): State<AppState>,
    Query(params): Query<UnderwriteParams>,
    Json(profile): Json<MerchantProfile>,
) -> impl IntoResponse {
    let mode = params.mode.unwrap_or_default();
    match state
        .underwriting_service
        .process(profile, mode, params.whatsapp_number)
        .await
    {
        Ok(result) => (axum::http::StatusCode::OK, Json(result)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
