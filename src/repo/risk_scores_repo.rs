use crate::domain::decision::{OfferStatus, UnderwritingResult};
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct RiskScoresRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct StoredDecision {
    pub request_id: Uuid,
    pub merchant_id: String,
    pub risk_score: i32,
    pub risk_tier: String,
    pub decision: String,
    pub explanation: String,
    pub financial_offer: Option<serde_json::Value>,
    pub offer_status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RiskScoresRepo {
    pub async fn insert_decision(
        &self,
        request_id: Uuid,
        result: &UnderwritingResult,
    ) -> anyhow::Result<()> {
        let offer_json = result
            .financial_offer
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO risk_scores (
                request_id, merchant_id, risk_score, risk_tier, decision,
                explanation, financial_offer, offer_status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, 'PENDING')
            "#,
        )
        .bind(request_id)
        .bind(&result.merchant_id)
        .bind(result.risk_score)
        .bind(result.risk_tier.label())
        .bind(result.decision.label())
        .bind(&result.explanation)
        .bind(offer_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn latest_for_merchant(
        &self,
        merchant_id: &str,
    ) -> anyhow::Result<Option<StoredDecision>> {
        let row = sqlx::query(
            r#"
            SELECT request_id, merchant_id, risk_score, risk_tier, decision,
                   explanation, financial_offer, offer_status, created_at
            FROM risk_scores
            WHERE merchant_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(merchant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| StoredDecision {
            request_id: r.get("request_id"),
            merchant_id: r.get("merchant_id"),
            risk_score: r.get("risk_score"),
            risk_tier: r.get("risk_tier"),
            decision: r.get("decision"),
            explanation: r.get("explanation"),
            financial_offer: r.get("financial_offer"),
            offer_status: r.get("offer_status"),
            created_at: r.get("created_at"),
        }))
    }

    /// Updates the acceptance status of the merchant's latest decision.
    /// Returns false when no decision exists for the merchant.
    pub async fn update_offer_status(
        &self,
        merchant_id: &str,
        status: OfferStatus,
    ) -> anyhow::Result<bool> {
        let status_label = match status {
            OfferStatus::Pending => "PENDING",
            OfferStatus::Accepted => "ACCEPTED",
            OfferStatus::Rejected => "REJECTED",
        };

        let result = sqlx::query(
            r#"
            UPDATE risk_scores SET offer_status = $2
            WHERE id = (
                SELECT id FROM risk_scores
                WHERE merchant_id = $1
                ORDER BY created_at DESC
                LIMIT 1
            )
            "#,
        )
        .bind(merchant_id)
        .bind(status_label)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
