use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use underwriting_service::domain::decision::{Decision, RiskTier};
use underwriting_service::domain::merchant::{MerchantProfile, OfferMode};
use underwriting_service::explain::template::fallback_explanation;
use underwriting_service::explain::{ExplanationInput, Explainer};
use underwriting_service::notify::{DeliveryReceipt, Notifier};
use underwriting_service::service::underwriting_service::{
    deliver_with_retry, evaluate_core, explanation_input, explanation_with_fallback,
};

fn profile(credit_score: i32, defaults: i32) -> MerchantProfile {
    serde_json::from_value(serde_json::json!({
        "merchant_id": "M_PIPE",
        "monthly_revenue": 50000.0,
        "credit_score": credit_score,
        "years_in_business": 5,
        "existing_loans": 1,
        "past_defaults": defaults
    }))
    .unwrap()
}

struct FailingExplainer;

#[async_trait::async_trait]
impl Explainer for FailingExplainer {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn explain(&self, _input: &ExplanationInput) -> Result<String> {
        Err(anyhow!("backend unavailable"))
    }
}

struct HangingExplainer;

#[async_trait::async_trait]
impl Explainer for HangingExplainer {
    fn name(&self) -> &'static str {
        "hanging"
    }

    async fn explain(&self, _input: &ExplanationInput) -> Result<String> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Ok("never".to_string())
    }
}

struct CountingNotifier {
    calls: AtomicU32,
    fail_first: u32,
    targets: Mutex<Vec<String>>,
}

impl CountingNotifier {
    fn new(fail_first: u32) -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_first,
            targets: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for CountingNotifier {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn deliver(&self, to: &str, _body: &str) -> Result<DeliveryReceipt> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.targets.lock().unwrap().push(to.to_string());
        if n <= self.fail_first {
            return Err(anyhow!("transient delivery failure"));
        }
        Ok(DeliveryReceipt {
            sid: format!("SM{}", n),
            status: "queued".to_string(),
        })
    }
}

#[test]
fn core_evaluation_is_idempotent() {
    let p = profile(780, 0);
    let first = evaluate_core(&p, OfferMode::Both);
    let second = evaluate_core(&p, OfferMode::Both);
    assert_eq!(first.assessment.score, second.assessment.score);
    assert_eq!(first.tier, second.tier);
    assert_eq!(first.decision, second.decision);
    assert_eq!(first.offer, second.offer);
}

#[test]
fn tier3_evaluation_has_no_offer_even_in_both_mode() {
    let eval = evaluate_core(&profile(450, 0), OfferMode::Both);
    assert_eq!(eval.tier, RiskTier::Tier3);
    assert_eq!(eval.decision, Decision::Rejected);
    assert!(eval.offer.is_none());
}

#[tokio::test]
async fn explainer_failure_falls_back_to_template() {
    let p = profile(780, 0);
    let eval = evaluate_core(&p, OfferMode::Both);
    let input = explanation_input(&p, &eval);

    let text = explanation_with_fallback(&FailingExplainer, 1_000, &input).await;
    assert_eq!(text, fallback_explanation(eval.assessment.score, eval.tier, eval.decision));
}

#[tokio::test]
async fn explainer_timeout_falls_back_to_template() {
    let p = profile(780, 0);
    let eval = evaluate_core(&p, OfferMode::Both);
    let input = explanation_input(&p, &eval);

    let text = explanation_with_fallback(&HangingExplainer, 50, &input).await;
    assert_eq!(text, fallback_explanation(eval.assessment.score, eval.tier, eval.decision));
}

#[tokio::test]
async fn fallback_is_byte_identical_across_calls() {
    let p = profile(780, 0);
    let eval = evaluate_core(&p, OfferMode::Both);
    let input = explanation_input(&p, &eval);

    let a = explanation_with_fallback(&FailingExplainer, 1_000, &input).await;
    let b = explanation_with_fallback(&FailingExplainer, 1_000, &input).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn delivery_retries_once_then_succeeds() {
    let notifier = CountingNotifier::new(1);
    deliver_with_retry(&notifier, "whatsapp:+911234567890", "hello", 2, 1).await;
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 2);
    assert_eq!(notifier.targets.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn delivery_gives_up_after_attempt_budget() {
    let notifier = CountingNotifier::new(10);
    deliver_with_retry(&notifier, "whatsapp:+911234567890", "hello", 2, 1).await;
    // Exhausts its budget without panicking or surfacing the error.
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn successful_delivery_stops_retrying() {
    let notifier = CountingNotifier::new(0);
    deliver_with_retry(&notifier, "whatsapp:+911234567890", "hello", 2, 1).await;
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
}
