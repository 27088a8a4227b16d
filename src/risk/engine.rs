use crate::domain::merchant::MerchantProfile;
use crate::risk::types::{RiskAssessment, RiskBreakdown, RiskWeights};

pub const CREDIT_SCORE_FLOOR: i32 = 500;
pub const MAX_PAST_DEFAULTS: i32 = 3;
pub const HARD_RULE_SCORE: i32 = 20;

pub const REASON_CREDIT_SCORE_BELOW_FLOOR: &str = "CREDIT_SCORE_BELOW_FLOOR";
pub const REASON_EXCESSIVE_PAST_DEFAULTS: &str = "EXCESSIVE_PAST_DEFAULTS";
pub const REASON_NO_HISTORY_WITH_DEFAULT: &str = "NO_HISTORY_WITH_DEFAULT";

pub fn clamp01(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

pub fn credit_score_band(credit_score: i32) -> f64 {
    if credit_score >= 750 {
        1.0
    } else if credit_score >= 700 {
        0.85
    } else if credit_score >= 650 {
        0.7
    } else if credit_score >= 600 {
        0.5
    } else if credit_score >= 550 {
        0.35
    } else {
        0.2
    }
}

pub fn revenue_band(monthly_volume: f64) -> f64 {
    if monthly_volume >= 100_000.0 {
        1.0
    } else if monthly_volume >= 50_000.0 {
        0.85
    } else if monthly_volume >= 25_000.0 {
        0.7
    } else if monthly_volume >= 10_000.0 {
        0.5
    } else if monthly_volume >= 5_000.0 {
        0.3
    } else {
        0.15
    }
}

pub fn tenure_band(years_in_business: i32) -> f64 {
    if years_in_business >= 5 {
        1.0
    } else if years_in_business >= 3 {
        0.8
    } else if years_in_business >= 2 {
        0.6
    } else if years_in_business >= 1 {
        0.4
    } else {
        0.1
    }
}

pub fn loan_burden_band(existing_loans: i32) -> f64 {
    match existing_loans {
        0 => 1.0,
        1 => 0.8,
        2 => 0.6,
        3 => 0.4,
        _ => 0.2,
    }
}

pub fn defaults_band(past_defaults: i32) -> f64 {
    match past_defaults {
        0 => 1.0,
        1 => 0.4,
        _ => 0.1,
    }
}

// Penalty bands: each rate is scored against the level at which the
// metric is considered fully unhealthy.
pub fn refund_rate_score(rate: f64) -> f64 {
    clamp01(1.0 - rate / 0.25)
}

pub fn chargeback_rate_score(rate: f64) -> f64 {
    clamp01(1.0 - rate / 0.10)
}

pub fn return_refund_score(rate: f64) -> f64 {
    clamp01(1.0 - rate / 0.30)
}

// Engagement bands: higher is better, saturating at the level of a
// strongly engaged customer base.
pub fn coupon_redemption_score(rate: f64) -> f64 {
    clamp01(rate / 0.50)
}

pub fn customer_return_score(rate: f64) -> f64 {
    clamp01(rate / 0.60)
}

pub fn deal_exclusivity_score(rate: f64) -> f64 {
    clamp01(rate / 0.50)
}

// 1.0 for a perfectly flat year, decaying as peak/trough widens.
pub fn seasonality_score(index: f64) -> f64 {
    if index <= 0.0 {
        return 0.0;
    }
    clamp01(if index >= 1.0 { 1.0 / index } else { index })
}

fn hard_rule_reasons(profile: &MerchantProfile) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if profile.credit_score < CREDIT_SCORE_FLOOR {
        reasons.push(REASON_CREDIT_SCORE_BELOW_FLOOR);
    }
    if profile.past_defaults >= MAX_PAST_DEFAULTS {
        reasons.push(REASON_EXCESSIVE_PAST_DEFAULTS);
    }
    if profile.years_in_business == 0 && profile.past_defaults >= 1 {
        reasons.push(REASON_NO_HISTORY_WITH_DEFAULT);
    }
    reasons
}

pub fn evaluate_risk(profile: &MerchantProfile) -> RiskAssessment {
    evaluate_risk_weighted(profile, &RiskWeights::default())
}

pub fn evaluate_risk_weighted(profile: &MerchantProfile, weights: &RiskWeights) -> RiskAssessment {
    let reasons = hard_rule_reasons(profile);
    if !reasons.is_empty() {
        return RiskAssessment {
            score: HARD_RULE_SCORE,
            hard_rule_triggered: true,
            trigger_reasons: reasons,
            breakdown: None,
        };
    }

    let breakdown = RiskBreakdown {
        credit_score: credit_score_band(profile.credit_score),
        revenue: revenue_band(profile.monthly_volume()),
        tenure: tenure_band(profile.years_in_business),
        loan_burden: loan_burden_band(profile.existing_loans),
        defaults: defaults_band(profile.past_defaults),
        refund_rate: refund_rate_score(profile.refund_rate),
        chargeback_rate: chargeback_rate_score(profile.chargeback_rate),
        coupon_redemption: coupon_redemption_score(profile.coupon_redemption_rate),
        customer_return: customer_return_score(profile.customer_return_rate),
        deal_exclusivity: deal_exclusivity_score(profile.deal_exclusivity_rate),
        return_refund: return_refund_score(profile.return_and_refund_rate),
        seasonality: seasonality_score(profile.seasonality_index),
    };

    let raw = (weights.credit_score_weight * breakdown.credit_score)
        + (weights.revenue_weight * breakdown.revenue)
        + (weights.tenure_weight * breakdown.tenure)
        + (weights.loan_burden_weight * breakdown.loan_burden)
        + (weights.defaults_weight * breakdown.defaults)
        + (weights.refund_rate_weight * breakdown.refund_rate)
        + (weights.chargeback_rate_weight * breakdown.chargeback_rate)
        + (weights.coupon_redemption_weight * breakdown.coupon_redemption)
        + (weights.customer_return_weight * breakdown.customer_return)
        + (weights.deal_exclusivity_weight * breakdown.deal_exclusivity)
        + (weights.return_refund_weight * breakdown.return_refund)
        + (weights.seasonality_weight * breakdown.seasonality);

    let score = (clamp01(raw) * 100.0).round() as i32;

    RiskAssessment {
        score: score.clamp(0, 100),
        hard_rule_triggered: false,
        trigger_reasons: Vec::new(),
        breakdown: Some(breakdown),
    }
}
