use crate::domain::decision::UnderwritingResult;
use anyhow::Result;

pub mod twilio;

#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub sid: String,
    pub status: String,
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, to: &str, body: &str) -> Result<DeliveryReceipt>;
}

const MAX_EXPLANATION_CHARS: usize = 300;

pub fn format_summary(result: &UnderwritingResult) -> String {
    let mut explanation = result.explanation.clone();
    if explanation.chars().count() > MAX_EXPLANATION_CHARS {
        explanation = explanation.chars().take(MAX_EXPLANATION_CHARS).collect();
        explanation.push_str("...");
    }

    format!(
        "Underwriting Result\n\n\
         Merchant ID: {}\n\
         Risk Tier: {}\n\
         Decision: {}\n\
         Risk Score: {}/100\n\n\
         Explanation:\n{}",
        result.merchant_id,
        result.risk_tier.label(),
        result.decision.label(),
        result.risk_score,
        explanation
    )
}
