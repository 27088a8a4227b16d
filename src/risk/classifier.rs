use crate::domain::decision::{Decision, RiskTier};
use crate::risk::types::RiskAssessment;

pub const TIER1_MIN_SCORE: i32 = 70;
pub const TIER2_MIN_SCORE: i32 = 40;
pub const CLEAN_APPROVAL_MIN_SCORE: i32 = 75;

/// Maps a risk assessment to a tier and final verdict. Boundary scores
/// land in the safer tier; a hard rule forces Tier 3 regardless of score.
pub fn classify(assessment: &RiskAssessment) -> (RiskTier, Decision) {
    if assessment.hard_rule_triggered {
        return (RiskTier::Tier3, Decision::Rejected);
    }

    let tier = if assessment.score >= TIER1_MIN_SCORE {
        RiskTier::Tier1
    } else if assessment.score >= TIER2_MIN_SCORE {
        RiskTier::Tier2
    } else {
        RiskTier::Tier3
    };

    let decision = match tier {
        RiskTier::Tier3 => Decision::Rejected,
        _ if assessment.score >= CLEAN_APPROVAL_MIN_SCORE => Decision::Approved,
        _ => Decision::ApprovedWithConditions,
    };

    (tier, decision)
}
