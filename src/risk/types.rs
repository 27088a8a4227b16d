#[derive(Debug, Clone)]
pub struct RiskWeights {
    pub credit_score_weight: f64,
    pub revenue_weight: f64,
    pub tenure_weight: f64,
    pub loan_burden_weight: f64,
    pub defaults_weight: f64,
    pub refund_rate_weight: f64,
    pub chargeback_rate_weight: f64,
    pub coupon_redemption_weight: f64,
    pub customer_return_weight: f64,
    pub deal_exclusivity_weight: f64,
    pub return_refund_weight: f64,
    pub seasonality_weight: f64,
}

impl Default for RiskWeights {
    // Core financial weights carry 0.75 of the total; behavioral
    // commerce metrics carry the remaining 0.25. Sums to 1.0.
    fn default() -> Self {
        Self {
            credit_score_weight: 0.30,
            revenue_weight: 0.15,
            tenure_weight: 0.10,
            loan_burden_weight: 0.10,
            defaults_weight: 0.10,
            refund_rate_weight: 0.04,
            chargeback_rate_weight: 0.05,
            coupon_redemption_weight: 0.03,
            customer_return_weight: 0.04,
            deal_exclusivity_weight: 0.03,
            return_refund_weight: 0.03,
            seasonality_weight: 0.03,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RiskBreakdown {
    pub credit_score: f64,
    pub revenue: f64,
    pub tenure: f64,
    pub loan_burden: f64,
    pub defaults: f64,
    pub refund_rate: f64,
    pub chargeback_rate: f64,
    pub coupon_redemption: f64,
    pub customer_return: f64,
    pub deal_exclusivity: f64,
    pub return_refund: f64,
    pub seasonality: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RiskAssessment {
    pub score: i32,
    pub hard_rule_triggered: bool,
    pub trigger_reasons: Vec<&'static str>,
    pub breakdown: Option<RiskBreakdown>,
}
