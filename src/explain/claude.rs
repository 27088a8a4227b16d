use crate::explain::{ExplanationInput, Explainer};
use anyhow::{anyhow, Result};
use serde_json::json;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

pub struct ClaudeExplainer {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl ClaudeExplainer {
    /// Returns `None` when no API key is configured; the caller treats
    /// that as a permanently unavailable backend and uses the template.
    pub fn from_env(timeout_ms: u64) -> Option<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").ok()?;
        if api_key.is_empty() {
            return None;
        }
        Some(Self {
            api_key,
            model: std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            timeout_ms,
            client: reqwest::Client::new(),
        })
    }

    fn prompt(input: &ExplanationInput) -> String {
        format!(
            "You are an underwriting analyst. In 2-3 sentences, explain this merchant \
             credit decision to a business owner in plain language.\n\
             Merchant: {} (category: {})\n\
             Risk score: {}/100, tier: {}, decision: {}\n\
             Coupon redemption rate: {:.2}, returning customers: {:.2}, \
             exclusive deals: {:.2}, returns/refunds: {:.2}, seasonality index: {:.2}, \
             unique customers: {}, average order value: {:.2}\n\
             Do not mention internal thresholds or promise any specific offer.",
            input.merchant_id,
            input.category.as_deref().unwrap_or("unspecified"),
            input.risk_score,
            input.risk_tier.label(),
            input.decision.label(),
            input.coupon_redemption_rate,
            input.customer_return_rate,
            input.deal_exclusivity_rate,
            input.return_and_refund_rate,
            input.seasonality_index,
            input.unique_customer_count,
            input.avg_order_value,
        )
    }
}

#[async_trait::async_trait]
impl Explainer for ClaudeExplainer {
    fn name(&self) -> &'static str {
        "claude"
    }

    async fn explain(&self, input: &ExplanationInput) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = json!({
            "model": self.model,
            "max_tokens": 300,
            "messages": [{"role": "user", "content": Self::prompt(input)}]
        });

        let resp = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "explanation backend returned HTTP {}: {}",
                status.as_u16(),
                detail.chars().take(200).collect::<String>()
            ));
        }

        let v: serde_json::Value = resp.json().await?;
        let text = v
            .get("content")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| anyhow!("explanation backend response missing content text"))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(anyhow!("explanation backend returned empty text"));
        }
        Ok(text.to_string())
    }
}
