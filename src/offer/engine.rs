use crate::domain::decision::{CreditOffer, FinancialOffer, InsuranceOffer, RiskTier};
use crate::domain::merchant::{MerchantProfile, OfferMode};

pub const DEFAULT_MONTHLY_BASIS: f64 = 50_000.0;
pub const LAKH: f64 = 100_000.0;

pub const TIER1_CREDIT_DIVISOR: f64 = 3.0;
pub const TIER2_CREDIT_DIVISOR: f64 = 6.0;
pub const TIER1_INTEREST_RATE: f64 = 10.0;
pub const TIER2_INTEREST_RATE: f64 = 15.0;
pub const CREDIT_LIMIT_MIN_LAKHS: f64 = 0.5;
pub const CREDIT_LIMIT_MAX_LAKHS: f64 = 50.0;
pub const TIER1_TENURES_MONTHS: [i32; 4] = [6, 12, 24, 36];
pub const TIER2_TENURES_MONTHS: [i32; 3] = [6, 12, 24];

pub const TIER1_COVERAGE_DIVISOR: f64 = 2.0;
pub const TIER2_COVERAGE_DIVISOR: f64 = 4.0;
pub const TIER1_PREMIUM_RATE: f64 = 0.012;
pub const TIER2_PREMIUM_RATE: f64 = 0.020;
pub const COVERAGE_MIN_LAKHS: f64 = 2.0;
pub const COVERAGE_MAX_LAKHS: f64 = 100.0;
pub const PREMIUM_MIN: f64 = 1_000.0;
pub const PREMIUM_MAX: f64 = 500_000.0;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn annual_volume(profile: &MerchantProfile) -> f64 {
    let monthly = profile.monthly_volume();
    let basis = if monthly > 0.0 { monthly } else { DEFAULT_MONTHLY_BASIS };
    basis * 12.0
}

pub fn credit_offer(tier: RiskTier, profile: &MerchantProfile) -> Option<CreditOffer> {
    let (divisor, rate, tenures) = match tier {
        RiskTier::Tier1 => (TIER1_CREDIT_DIVISOR, TIER1_INTEREST_RATE, TIER1_TENURES_MONTHS.to_vec()),
        RiskTier::Tier2 => (TIER2_CREDIT_DIVISOR, TIER2_INTEREST_RATE, TIER2_TENURES_MONTHS.to_vec()),
        RiskTier::Tier3 => return None,
    };

    let limit_lakhs = (annual_volume(profile) / divisor) / LAKH;
    let limit_lakhs = limit_lakhs.clamp(CREDIT_LIMIT_MIN_LAKHS, CREDIT_LIMIT_MAX_LAKHS);

    Some(CreditOffer {
        credit_limit_lakhs: round2(limit_lakhs),
        interest_rate_percent: rate,
        tenure_options_months: tenures,
    })
}

pub fn insurance_offer(tier: RiskTier, profile: &MerchantProfile) -> Option<InsuranceOffer> {
    let (divisor, premium_rate, policy_type) = match tier {
        RiskTier::Tier1 => (TIER1_COVERAGE_DIVISOR, TIER1_PREMIUM_RATE, "Premium"),
        RiskTier::Tier2 => (TIER2_COVERAGE_DIVISOR, TIER2_PREMIUM_RATE, "Standard"),
        RiskTier::Tier3 => return None,
    };

    let annual = annual_volume(profile);
    let coverage_lakhs = ((annual / divisor) / LAKH).clamp(COVERAGE_MIN_LAKHS, COVERAGE_MAX_LAKHS);
    let premium = (annual * premium_rate).clamp(PREMIUM_MIN, PREMIUM_MAX);

    Some(InsuranceOffer {
        coverage_amount_lakhs: round2(coverage_lakhs),
        premium_amount: round2(premium),
        policy_type: policy_type.to_string(),
    })
}

/// Computes the tier-appropriate offer for the requested mode. Tier 3 and
/// empty results collapse to `None` so serialization never emits an empty
/// offer shell.
pub fn financial_offer(
    tier: RiskTier,
    profile: &MerchantProfile,
    mode: OfferMode,
) -> Option<FinancialOffer> {
    if tier == RiskTier::Tier3 {
        return None;
    }

    let credit = match mode {
        OfferMode::Credit | OfferMode::Both => credit_offer(tier, profile),
        OfferMode::Insurance => None,
    };
    let insurance = match mode {
        OfferMode::Insurance | OfferMode::Both => insurance_offer(tier, profile),
        OfferMode::Credit => None,
    };

    if credit.is_none() && insurance.is_none() {
        return None;
    }

    Some(FinancialOffer { credit, insurance })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gmv: f64, monthly_revenue: f64) -> MerchantProfile {
        serde_json::from_value(serde_json::json!({
            "merchant_id": "M1",
            "monthly_revenue": monthly_revenue,
            "credit_score": 780,
            "years_in_business": 5,
            "existing_loans": 1,
            "past_defaults": 0,
            "gmv": gmv
        }))
        .unwrap()
    }

    #[test]
    fn tier1_credit_limit_is_annual_over_three() {
        // 75k monthly -> 900k annual -> /3 -> 300k -> 3.0 lakhs
        let offer = credit_offer(RiskTier::Tier1, &profile(75_000.0, 50_000.0)).unwrap();
        assert_eq!(offer.credit_limit_lakhs, 3.0);
        assert_eq!(offer.interest_rate_percent, TIER1_INTEREST_RATE);
        assert_eq!(offer.tenure_options_months, vec![6, 12, 24, 36]);
    }

    #[test]
    fn tier2_gets_shorter_tenures_and_higher_rate() {
        let offer = credit_offer(RiskTier::Tier2, &profile(75_000.0, 50_000.0)).unwrap();
        assert_eq!(offer.interest_rate_percent, TIER2_INTEREST_RATE);
        assert_eq!(offer.tenure_options_months, vec![6, 12, 24]);
    }

    #[test]
    fn credit_limit_clamped_on_both_ends() {
        let tiny = credit_offer(RiskTier::Tier2, &profile(100.0, 100.0)).unwrap();
        assert_eq!(tiny.credit_limit_lakhs, CREDIT_LIMIT_MIN_LAKHS);

        let huge = credit_offer(RiskTier::Tier1, &profile(100_000_000.0, 100.0)).unwrap();
        assert_eq!(huge.credit_limit_lakhs, CREDIT_LIMIT_MAX_LAKHS);
    }

    #[test]
    fn premium_clamped_for_extreme_volumes() {
        let tiny = insurance_offer(RiskTier::Tier2, &profile(100.0, 100.0)).unwrap();
        assert_eq!(tiny.premium_amount, PREMIUM_MIN);

        let huge = insurance_offer(RiskTier::Tier1, &profile(100_000_000.0, 100.0)).unwrap();
        assert_eq!(huge.premium_amount, PREMIUM_MAX);
        assert_eq!(huge.coverage_amount_lakhs, COVERAGE_MAX_LAKHS);
    }

    #[test]
    fn policy_type_reflects_tier() {
        assert_eq!(
            insurance_offer(RiskTier::Tier1, &profile(75_000.0, 0.1)).unwrap().policy_type,
            "Premium"
        );
        assert_eq!(
            insurance_offer(RiskTier::Tier2, &profile(75_000.0, 0.1)).unwrap().policy_type,
            "Standard"
        );
    }

    #[test]
    fn tier3_never_gets_an_offer() {
        for mode in [OfferMode::Credit, OfferMode::Insurance, OfferMode::Both] {
            assert!(financial_offer(RiskTier::Tier3, &profile(75_000.0, 50_000.0), mode).is_none());
        }
    }

    #[test]
    fn mode_filtering_is_exclusive() {
        let p = profile(75_000.0, 50_000.0);

        let credit_only = financial_offer(RiskTier::Tier1, &p, OfferMode::Credit).unwrap();
        assert!(credit_only.credit.is_some());
        assert!(credit_only.insurance.is_none());

        let insurance_only = financial_offer(RiskTier::Tier1, &p, OfferMode::Insurance).unwrap();
        assert!(insurance_only.credit.is_none());
        assert!(insurance_only.insurance.is_some());

        let both = financial_offer(RiskTier::Tier1, &p, OfferMode::Both).unwrap();
        assert!(both.credit.is_some());
        assert!(both.insurance.is_some());
    }

    #[test]
    fn zero_volume_falls_back_to_default_basis() {
        // Default 50k monthly basis -> 600k annual -> /3 -> 2.0 lakhs.
        let mut p = profile(0.0, 1.0);
        p.monthly_revenue = 0.0;
        let offer = credit_offer(RiskTier::Tier1, &p).unwrap();
        assert_eq!(offer.credit_limit_lakhs, 2.0);
    }
}
