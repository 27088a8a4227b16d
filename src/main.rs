use axum::routing::{get, post};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use underwriting_service::config::AppConfig;
use underwriting_service::explain::claude::ClaudeExplainer;
use underwriting_service::explain::template::TemplateExplainer;
use underwriting_service::explain::Explainer;
use underwriting_service::notify::twilio::TwilioWhatsApp;
use underwriting_service::repo::merchants_repo::MerchantsRepo;
use underwriting_service::repo::risk_scores_repo::RiskScoresRepo;
use underwriting_service::service::underwriting_service::UnderwritingService;
use underwriting_service::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let explainer: Arc<dyn Explainer> = match ClaudeExplainer::from_env(cfg.explain_timeout_ms) {
        Some(claude) => Arc::new(claude),
        None => {
            tracing::warn!("no anthropic api key configured, using template explanations");
            Arc::new(TemplateExplainer)
        }
    };

    let underwriting_service = UnderwritingService {
        pool: pool.clone(),
        merchants_repo: MerchantsRepo { pool: pool.clone() },
        risk_scores_repo: RiskScoresRepo { pool: pool.clone() },
        explainer,
        notifier: Arc::new(TwilioWhatsApp::from_env(cfg.notify_timeout_ms)),
        explain_timeout_ms: cfg.explain_timeout_ms,
    };

    let state = AppState {
        underwriting_service,
        risk_scores_repo: RiskScoresRepo { pool },
    };

    let app = Router::new()
        .route("/health", get(underwriting_service::http::handlers::underwrite::health))
        .route(
            "/api/underwrite",
            post(underwriting_service::http::handlers::underwrite::underwrite),
        )
        .route(
            "/api/merchants/:merchant_id/decision",
            get(underwriting_service::http::handlers::decisions::get_decision),
        )
        .route(
            "/api/merchants/:merchant_id/offer-status",
            post(underwriting_service::http::handlers::decisions::update_offer_status),
        )
        .route(
            "/api/risk/debug",
            post(underwriting_service::http::handlers::risk_debug::risk_debug),
        )
        .route("/ops/readiness", get(underwriting_service::http::handlers::ops::readiness))
        .route("/ops/liveness", get(underwriting_service::http::handlers::ops::liveness))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
