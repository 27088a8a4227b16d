pub mod config;
pub mod domain {
    pub mod decision;
    pub mod merchant;
}
pub mod explain;
pub mod http {
    pub mod handlers {
        pub mod decisions;
        pub mod ops;
        pub mod risk_debug;
        pub mod underwrite;
    }
}
pub mod notify;
pub mod offer;
pub mod repo {
    pub mod merchants_repo;
    pub mod risk_scores_repo;
}
pub mod risk;
pub mod service {
    pub mod underwriting_service;
}

#[derive(Clone)]
pub struct AppState {
    pub underwriting_service: service::underwriting_service::UnderwritingService,
    pub risk_scores_repo: repo::risk_scores_repo::RiskScoresRepo,
}
