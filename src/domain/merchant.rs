use serde::{Deserialize, Serialize};

fn default_seasonality_index() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantProfile {
    pub merchant_id: String,
    #[serde(default)]
    pub category: Option<String>,

    pub monthly_revenue: f64,
    pub credit_score: i32,
    pub years_in_business: i32,
    pub existing_loans: i32,
    pub past_defaults: i32,

    #[serde(default)]
    pub gmv: f64,
    #[serde(default)]
    pub refund_rate: f64,
    #[serde(default)]
    pub chargeback_rate: f64,

    #[serde(default)]
    pub monthly_gmv_12m: Option<Vec<f64>>,
    #[serde(default)]
    pub coupon_redemption_rate: f64,
    #[serde(default)]
    pub unique_customer_count: i64,
    #[serde(default)]
    pub customer_return_rate: f64,
    #[serde(default)]
    pub avg_order_value: f64,
    #[serde(default = "default_seasonality_index")]
    pub seasonality_index: f64,
    #[serde(default)]
    pub deal_exclusivity_rate: f64,
    #[serde(default)]
    pub return_and_refund_rate: f64,
}

impl MerchantProfile {
    /// Monthly transaction volume used for scoring and offer sizing:
    /// reported GMV when positive, else the 12-month GMV average, else revenue.
    pub fn monthly_volume(&self) -> f64 {
        if self.gmv > 0.0 {
            return self.gmv;
        }
        if let Some(series) = &self.monthly_gmv_12m {
            if !series.is_empty() {
                let sum: f64 = series.iter().sum();
                let avg = sum / series.len() as f64;
                if avg > 0.0 {
                    return avg;
                }
            }
        }
        self.monthly_revenue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferMode {
    Credit,
    Insurance,
    Both,
}

impl Default for OfferMode {
    fn default() -> Self {
        OfferMode::Both
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}
