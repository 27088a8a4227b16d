use crate::domain::decision::{Decision, RiskTier};
use crate::explain::{ExplanationInput, Explainer};
use anyhow::Result;

/// Deterministic explanation built only from score, tier and decision.
/// Used directly when no AI backend is configured and as the fallback
/// whenever the backend errors or times out.
pub fn fallback_explanation(score: i32, tier: RiskTier, decision: Decision) -> String {
    let verdict = match decision {
        Decision::Approved => "approved",
        Decision::ApprovedWithConditions => "approved with conditions",
        Decision::Rejected => "rejected",
    };
    format!(
        "Risk score {}/100 places this merchant in {}; the application is {}.",
        score,
        tier.label(),
        verdict
    )
}

pub struct TemplateExplainer;

#[async_trait::async_trait]
impl Explainer for TemplateExplainer {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn explain(&self, input: &ExplanationInput) -> Result<String> {
        Ok(fallback_explanation(input.risk_score, input.risk_tier, input.decision))
    }
}
