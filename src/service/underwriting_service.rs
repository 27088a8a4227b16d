use crate::domain::decision::{Decision, FinancialOffer, RiskTier, UnderwritingResult};
use crate::domain::merchant::{ErrorEnvelope, ErrorPayload, MerchantProfile, OfferMode};
use crate::explain::template::fallback_explanation;
use crate::explain::{ExplanationInput, Explainer};
use crate::notify::{format_summary, Notifier};
use crate::offer::engine::financial_offer;
use crate::repo::merchants_repo::MerchantsRepo;
use crate::repo::risk_scores_repo::RiskScoresRepo;
use crate::risk::classifier::classify;
use crate::risk::engine::evaluate_risk;
use crate::risk::types::RiskAssessment;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub const NOTIFY_MAX_ATTEMPTS: u32 = 2;
pub const NOTIFY_RETRY_DELAY_MS: u64 = 2_000;

#[derive(Debug)]
pub struct CoreEvaluation {
    pub assessment: RiskAssessment,
    pub tier: RiskTier,
    pub decision: Decision,
    pub offer: Option<FinancialOffer>,
}

/// The deterministic pipeline: score, classify, compute offer. Pure and
/// infallible for any profile that passed validation.
pub fn evaluate_core(profile: &MerchantProfile, mode: OfferMode) -> CoreEvaluation {
    let assessment = evaluate_risk(profile);
    let (tier, decision) = classify(&assessment);
    let offer = financial_offer(tier, profile, mode);
    CoreEvaluation { assessment, tier, decision, offer }
}

pub fn explanation_input(profile: &MerchantProfile, eval: &CoreEvaluation) -> ExplanationInput {
    ExplanationInput {
        merchant_id: profile.merchant_id.clone(),
        category: profile.category.clone(),
        risk_score: eval.assessment.score,
        risk_tier: eval.tier,
        decision: eval.decision,
        coupon_redemption_rate: profile.coupon_redemption_rate,
        customer_return_rate: profile.customer_return_rate,
        deal_exclusivity_rate: profile.deal_exclusivity_rate,
        return_and_refund_rate: profile.return_and_refund_rate,
        seasonality_index: profile.seasonality_index,
        unique_customer_count: profile.unique_customer_count,
        avg_order_value: profile.avg_order_value,
    }
}

/// Resolves the narrative text, substituting the deterministic fallback on
/// any backend error or timeout. Never fails.
pub async fn explanation_with_fallback(
    explainer: &dyn Explainer,
    timeout_ms: u64,
    input: &ExplanationInput,
) -> String {
    let call = explainer.explain(input);
    match tokio::time::timeout(std::time::Duration::from_millis(timeout_ms), call).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::warn!(
                merchant_id = %input.merchant_id,
                backend = explainer.name(),
                "explanation backend failed, using fallback: {}",
                e
            );
            fallback_explanation(input.risk_score, input.risk_tier, input.decision)
        }
        Err(_) => {
            tracing::warn!(
                merchant_id = %input.merchant_id,
                backend = explainer.name(),
                timeout_ms,
                "explanation backend timed out, using fallback"
            );
            fallback_explanation(input.risk_score, input.risk_tier, input.decision)
        }
    }
}

/// Best-effort delivery with a small fixed-backoff retry budget. All
/// failures are logged and swallowed.
pub async fn deliver_with_retry(
    notifier: &dyn Notifier,
    to: &str,
    body: &str,
    max_attempts: u32,
    retry_delay_ms: u64,
) {
    for attempt in 1..=max_attempts {
        match notifier.deliver(to, body).await {
            Ok(receipt) => {
                tracing::info!(
                    channel = notifier.name(),
                    to,
                    sid = %receipt.sid,
                    status = %receipt.status,
                    "notification delivered"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    channel = notifier.name(),
                    to,
                    attempt,
                    max_attempts,
                    "notification attempt failed: {}",
                    e
                );
                if attempt < max_attempts {
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }
    tracing::error!(
        channel = notifier.name(),
        to,
        "notification dropped after {} attempts",
        max_attempts
    );
}

#[derive(Clone)]
pub struct UnderwritingService {
    pub pool: PgPool,
    pub merchants_repo: MerchantsRepo,
    pub risk_scores_repo: RiskScoresRepo,
    pub explainer: Arc<dyn Explainer>,
    pub notifier: Arc<dyn Notifier>,
    pub explain_timeout_ms: u64,
}

impl UnderwritingService {
    pub async fn process(
        &self,
        profile: MerchantProfile,
        mode: OfferMode,
        whatsapp_number: Option<String>,
    ) -> Result<UnderwritingResult, (axum::http::StatusCode, ErrorEnvelope)> {
        validate_profile(&profile)?;

        let request_id = Uuid::new_v4();

        self.merchants_repo.upsert(&profile).await.map_err(internal)?;

        let eval = evaluate_core(&profile, mode);
        if eval.assessment.hard_rule_triggered {
            tracing::info!(
                %request_id,
                merchant_id = %profile.merchant_id,
                reasons = ?eval.assessment.trigger_reasons,
                "hard rule triggered"
            );
        }

        let input = explanation_input(&profile, &eval);
        let explanation =
            explanation_with_fallback(self.explainer.as_ref(), self.explain_timeout_ms, &input)
                .await;

        let result = UnderwritingResult {
            merchant_id: profile.merchant_id.clone(),
            risk_score: eval.assessment.score,
            risk_tier: eval.tier,
            decision: eval.decision,
            explanation,
            financial_offer: eval.offer,
        };

        self.risk_scores_repo
            .insert_decision(request_id, &result)
            .await
            .map_err(internal)?;

        tracing::info!(
            %request_id,
            merchant_id = %result.merchant_id,
            risk_score = result.risk_score,
            risk_tier = result.risk_tier.label(),
            decision = result.decision.label(),
            "underwriting decision stored"
        );

        // Delivery runs detached after the response is finalized; its
        // outcome never reaches the caller.
        if let Some(to) = whatsapp_number {
            let notifier = self.notifier.clone();
            let summary = format_summary(&result);
            tokio::spawn(async move {
                deliver_with_retry(
                    notifier.as_ref(),
                    &to,
                    &summary,
                    NOTIFY_MAX_ATTEMPTS,
                    NOTIFY_RETRY_DELAY_MS,
                )
                .await;
            });
        }

        Ok(result)
    }
}

pub fn validate_profile(
    profile: &MerchantProfile,
) -> Result<(), (axum::http::StatusCode, ErrorEnvelope)> {
    let fail = |code: &str, message: &str| {
        Err((
            axum::http::StatusCode::BAD_REQUEST,
            err(code, message),
        ))
    };

    if profile.merchant_id.trim().is_empty() {
        return fail("INVALID_MERCHANT_ID", "merchant_id must not be empty");
    }
    if profile.monthly_revenue <= 0.0 {
        return fail("INVALID_MONTHLY_REVENUE", "monthly_revenue must be positive");
    }
    if !(300..=850).contains(&profile.credit_score) {
        return fail("INVALID_CREDIT_SCORE", "credit_score must be between 300 and 850");
    }
    if profile.years_in_business < 0 {
        return fail("INVALID_YEARS_IN_BUSINESS", "years_in_business must be non-negative");
    }
    if profile.existing_loans < 0 {
        return fail("INVALID_EXISTING_LOANS", "existing_loans must be non-negative");
    }
    if profile.past_defaults < 0 {
        return fail("INVALID_PAST_DEFAULTS", "past_defaults must be non-negative");
    }
    if profile.gmv < 0.0 {
        return fail("INVALID_GMV", "gmv must be non-negative");
    }
    if profile.unique_customer_count < 0 {
        return fail("INVALID_CUSTOMER_COUNT", "unique_customer_count must be non-negative");
    }
    if profile.avg_order_value < 0.0 {
        return fail("INVALID_AVG_ORDER_VALUE", "avg_order_value must be non-negative");
    }
    if profile.seasonality_index < 0.1 {
        return fail("INVALID_SEASONALITY_INDEX", "seasonality_index must be at least 0.1");
    }

    let rates = [
        ("refund_rate", profile.refund_rate),
        ("chargeback_rate", profile.chargeback_rate),
        ("coupon_redemption_rate", profile.coupon_redemption_rate),
        ("customer_return_rate", profile.customer_return_rate),
        ("deal_exclusivity_rate", profile.deal_exclusivity_rate),
        ("return_and_refund_rate", profile.return_and_refund_rate),
    ];
    for (name, value) in rates {
        if !(0.0..=1.0).contains(&value) {
            return Err((
                axum::http::StatusCode::BAD_REQUEST,
                err("INVALID_RATE", &format!("{} must be between 0 and 1", name)),
            ));
        }
    }

    if let Some(series) = &profile.monthly_gmv_12m {
        if series.len() != 12 {
            return fail("INVALID_GMV_SERIES", "monthly_gmv_12m must contain exactly 12 values");
        }
        if series.iter().any(|v| *v < 0.0) {
            return fail("INVALID_GMV_SERIES", "monthly_gmv_12m values must be non-negative");
        }
    }

    Ok(())
}

fn err(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        },
    }
}

fn internal(e: anyhow::Error) -> (axum::http::StatusCode, ErrorEnvelope) {
    tracing::error!("underwriting pipeline storage error: {}", e);
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        err("INTERNAL_ERROR", "internal error"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> MerchantProfile {
        serde_json::from_value(serde_json::json!({
            "merchant_id": "M1",
            "monthly_revenue": 50000.0,
            "credit_score": 780,
            "years_in_business": 5,
            "existing_loans": 1,
            "past_defaults": 0
        }))
        .unwrap()
    }

    #[test]
    fn valid_profile_passes() {
        assert!(validate_profile(&profile()).is_ok());
    }

    #[test]
    fn out_of_range_credit_score_rejected() {
        let mut p = profile();
        p.credit_score = 900;
        let (status, envelope) = validate_profile(&p).unwrap_err();
        assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(envelope.error.code, "INVALID_CREDIT_SCORE");
    }

    #[test]
    fn rate_above_one_rejected() {
        let mut p = profile();
        p.chargeback_rate = 1.5;
        let (_, envelope) = validate_profile(&p).unwrap_err();
        assert_eq!(envelope.error.code, "INVALID_RATE");
    }

    #[test]
    fn short_gmv_series_rejected() {
        let mut p = profile();
        p.monthly_gmv_12m = Some(vec![1000.0; 6]);
        let (_, envelope) = validate_profile(&p).unwrap_err();
        assert_eq!(envelope.error.code, "INVALID_GMV_SERIES");
    }
}
