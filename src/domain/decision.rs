use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "Tier 1")]
    Tier1,
    #[serde(rename = "Tier 2")]
    Tier2,
    #[serde(rename = "Tier 3")]
    Tier3,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Tier1 => "Tier 1",
            RiskTier::Tier2 => "Tier 2",
            RiskTier::Tier3 => "Tier 3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    ApprovedWithConditions,
    Rejected,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::ApprovedWithConditions => "APPROVED_WITH_CONDITIONS",
            Decision::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditOffer {
    pub credit_limit_lakhs: f64,
    pub interest_rate_percent: f64,
    pub tenure_options_months: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceOffer {
    pub coverage_amount_lakhs: f64,
    pub premium_amount: f64,
    pub policy_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialOffer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<CreditOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<InsuranceOffer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderwritingResult {
    pub merchant_id: String,
    pub risk_score: i32,
    pub risk_tier: RiskTier,
    pub decision: Decision,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_offer: Option<FinancialOffer>,
}
