use underwriting_service::domain::decision::RiskTier;
use underwriting_service::domain::merchant::{MerchantProfile, OfferMode};
use underwriting_service::offer::engine::{
    financial_offer, CREDIT_LIMIT_MAX_LAKHS, CREDIT_LIMIT_MIN_LAKHS, COVERAGE_MAX_LAKHS,
    COVERAGE_MIN_LAKHS, PREMIUM_MAX, PREMIUM_MIN,
};

fn profile(gmv: f64) -> MerchantProfile {
    serde_json::from_value(serde_json::json!({
        "merchant_id": "M_OFFER",
        "monthly_revenue": 50000.0,
        "credit_score": 780,
        "years_in_business": 5,
        "existing_loans": 1,
        "past_defaults": 0,
        "gmv": gmv
    }))
    .unwrap()
}

#[test]
fn tier1_both_mode_produces_full_offer() {
    let offer = financial_offer(RiskTier::Tier1, &profile(75_000.0), OfferMode::Both).unwrap();

    let credit = offer.credit.unwrap();
    assert!(credit.tenure_options_months.contains(&36));
    assert_eq!(credit.interest_rate_percent, 10.0);
    // 900k annual / 3 = 300k = 3.0 lakhs
    assert_eq!(credit.credit_limit_lakhs, 3.0);

    let insurance = offer.insurance.unwrap();
    assert_eq!(insurance.policy_type, "Premium");
    // 900k annual * 1.2% = 10,800
    assert_eq!(insurance.premium_amount, 10_800.0);
}

#[test]
fn insurance_mode_never_carries_credit() {
    let offer = financial_offer(RiskTier::Tier1, &profile(75_000.0), OfferMode::Insurance).unwrap();
    assert!(offer.credit.is_none());
    let insurance = offer.insurance.unwrap();
    assert_eq!(insurance.policy_type, "Premium");
}

#[test]
fn credit_mode_never_carries_insurance() {
    let offer = financial_offer(RiskTier::Tier2, &profile(75_000.0), OfferMode::Credit).unwrap();
    assert!(offer.insurance.is_none());
    assert!(offer.credit.is_some());
}

#[test]
fn tier3_yields_no_offer_in_any_mode() {
    for mode in [OfferMode::Credit, OfferMode::Insurance, OfferMode::Both] {
        assert!(financial_offer(RiskTier::Tier3, &profile(75_000.0), mode).is_none());
    }
}

#[test]
fn amounts_respect_clamp_bands_at_extremes() {
    for gmv in [0.0, 1.0, 1_000.0, 10_000_000.0, 1e12] {
        for tier in [RiskTier::Tier1, RiskTier::Tier2] {
            let offer = financial_offer(tier, &profile(gmv), OfferMode::Both).unwrap();
            let credit = offer.credit.unwrap();
            assert!(credit.credit_limit_lakhs >= CREDIT_LIMIT_MIN_LAKHS);
            assert!(credit.credit_limit_lakhs <= CREDIT_LIMIT_MAX_LAKHS);

            let insurance = offer.insurance.unwrap();
            assert!(insurance.coverage_amount_lakhs >= COVERAGE_MIN_LAKHS);
            assert!(insurance.coverage_amount_lakhs <= COVERAGE_MAX_LAKHS);
            assert!(insurance.premium_amount >= PREMIUM_MIN);
            assert!(insurance.premium_amount <= PREMIUM_MAX);
        }
    }
}

#[test]
fn offer_amounts_are_deterministic() {
    let p = profile(123_456.0);
    let first = financial_offer(RiskTier::Tier2, &p, OfferMode::Both).unwrap();
    let second = financial_offer(RiskTier::Tier2, &p, OfferMode::Both).unwrap();
    assert_eq!(first, second);
}
