use crate::domain::merchant::MerchantProfile;
use sqlx::PgPool;

#[derive(Clone)]
pub struct MerchantsRepo {
    pub pool: PgPool,
}

impl MerchantsRepo {
    pub async fn upsert(&self, profile: &MerchantProfile) -> anyhow::Result<()> {
        let profile_json = serde_json::to_value(profile)?;
        sqlx::query(
            r#"
            INSERT INTO merchants (
                merchant_id, category, monthly_revenue, credit_score,
                years_in_business, existing_loans, past_defaults, gmv, profile_json
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (merchant_id) DO UPDATE SET
                category = EXCLUDED.category,
                monthly_revenue = EXCLUDED.monthly_revenue,
                credit_score = EXCLUDED.credit_score,
                years_in_business = EXCLUDED.years_in_business,
                existing_loans = EXCLUDED.existing_loans,
                past_defaults = EXCLUDED.past_defaults,
                gmv = EXCLUDED.gmv,
                profile_json = EXCLUDED.profile_json,
                updated_at = NOW()
            "#,
        )
        .bind(&profile.merchant_id)
        .bind(&profile.category)
        .bind(profile.monthly_revenue)
        .bind(profile.credit_score)
        .bind(profile.years_in_business)
        .bind(profile.existing_loans)
        .bind(profile.past_defaults)
        .bind(profile.gmv)
        .bind(profile_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
