use crate::domain::merchant::MerchantProfile;
use crate::risk::classifier::classify;
use crate::risk::engine::evaluate_risk;
use axum::response::IntoResponse;
use axum::Json;

/// Scores a profile without persisting or notifying. Auditing aid for
/// tuning bands and weights against real merchant data.
pub async fn risk_debug(Json(profile): Json<MerchantProfile>) -> impl IntoResponse {
    if let Err((status, envelope)) =
        crate::service::underwriting_service::validate_profile(&profile)
    {
        return (status, Json(serde_json::to_value(envelope).unwrap_or_default()))
            .into_response();
    }

    let assessment = evaluate_risk(&profile);
    let (tier, decision) = classify(&assessment);

    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "merchant_id": profile.merchant_id,
            "assessment": assessment,
            "risk_tier": tier,
            "decision": decision,
        })),
    )
        .into_response()
}
