use crate::notify::{DeliveryReceipt, Notifier};
use anyhow::{anyhow, Result};

pub struct TwilioWhatsApp {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
    configured: bool,
}

impl TwilioWhatsApp {
    pub fn from_env(timeout_ms: u64) -> Self {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default();
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default();
        let configured = !account_sid.is_empty() && !auth_token.is_empty();
        if !configured {
            tracing::warn!("twilio credentials not configured, whatsapp delivery disabled");
        }

        Self {
            account_sid,
            auth_token,
            from_number: std::env::var("TWILIO_WHATSAPP_NUMBER")
                .unwrap_or_else(|_| "whatsapp:+14155238886".to_string()),
            base_url: std::env::var("TWILIO_BASE_URL")
                .unwrap_or_else(|_| "https://api.twilio.com".to_string()),
            timeout_ms,
            client: reqwest::Client::new(),
            configured,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for TwilioWhatsApp {
    fn name(&self) -> &'static str {
        "twilio_whatsapp"
    }

    async fn deliver(&self, to: &str, body: &str) -> Result<DeliveryReceipt> {
        if !self.configured {
            return Err(anyhow!("twilio client not configured"));
        }

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );
        let params = [("From", self.from_number.as_str()), ("To", to), ("Body", body)];

        let resp = self
            .client
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "twilio returned HTTP {}: {}",
                status.as_u16(),
                detail.chars().take(200).collect::<String>()
            ));
        }

        let v: serde_json::Value = resp.json().await?;
        Ok(DeliveryReceipt {
            sid: v.get("sid").and_then(|s| s.as_str()).unwrap_or("N/A").to_string(),
            status: v
                .get("status")
                .and_then(|s| s.as_str())
                .unwrap_or("queued")
                .to_string(),
        })
    }
}
