use crate::domain::decision::{Decision, RiskTier};
use anyhow::Result;

pub mod claude;
pub mod template;

/// Inputs handed to the narrative generator. Only the fields that drive
/// the text; the generator never sees the full profile or the offer.
#[derive(Debug, Clone)]
pub struct ExplanationInput {
    pub merchant_id: String,
    pub category: Option<String>,
    pub risk_score: i32,
    pub risk_tier: RiskTier,
    pub decision: Decision,
    pub coupon_redemption_rate: f64,
    pub customer_return_rate: f64,
    pub deal_exclusivity_rate: f64,
    pub return_and_refund_rate: f64,
    pub seasonality_index: f64,
    pub unique_customer_count: i64,
    pub avg_order_value: f64,
}

#[async_trait::async_trait]
pub trait Explainer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn explain(&self, input: &ExplanationInput) -> Result<String>;
}
