use std::sync::Arc;

use analysis::{ViralityAnalyzer, ViralityParams};
use api::{build_router, ApiState};
use axum::Router;
use chrono::Duration;
use classifier::{LexiconAdClassifier, LexiconHateClassifier};
use common::{config::AppConfig, logging, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging("info");
    let config = AppConfig::load()?;

    let params = ViralityParams {
        window: Duration::hours(config.analyzer.window_hours),
        similarity_threshold: config.analyzer.similarity_threshold,
        high_similarity_count: config.analyzer.high_similarity_count,
    };
    let metrics_path: &'static str =
        Box::leak(config.observability.metrics_path.clone().into_boxed_str());
    let state = Arc::new(ApiState {
        analyzer: Arc::new(ViralityAnalyzer::new(params)),
        hate_classifier: Arc::new(LexiconHateClassifier),
        ad_classifier: Arc::new(LexiconAdClassifier),
        metrics_path,
    });
    let app: Router = build_router(state);

    let addr: std::net::SocketAddr = config.api.bind.parse().map_err(anyhow::Error::from)?;
    info!("analysis api listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
