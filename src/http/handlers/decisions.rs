use crate::domain::decision::OfferStatus;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

pub async fn get_decision(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
) -> impl IntoResponse {
    match state.risk_scores_repo.latest_for_merchant(&merchant_id).await {
        Ok(Some(stored)) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "request_id": stored.request_id,
                "merchant_id": stored.merchant_id,
                "risk_score": stored.risk_score,
                "risk_tier": stored.risk_tier,
                "decision": stored.decision,
                "explanation": stored.explanation,
                "financial_offer": stored.financial_offer,
                "offer_status": stored.offer_status,
                "created_at": stored.created_at,
            })),
        )
            .into_response(),
        Ok(None) => (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "no underwriting record found"})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct OfferStatusUpdate {
    pub status: OfferStatus,
}

pub async fn update_offer_status(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
    Json(update): Json<OfferStatusUpdate>,
) -> impl IntoResponse {
    match state
        .risk_scores_repo
        .update_offer_status(&merchant_id, update.status)
        .await
    {
        Ok(true) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"merchant_id": merchant_id, "offer_status": update.status})),
        )
            .into_response(),
        Ok(false) => (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "no underwriting record found"})),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
