use anyhow::Result;
use scour_common::observability::{LogConfig, init_logging};
use scour_config::{ScourConfig, ScourConfigLoader};
use scour_pipeline::SearchPipeline;
use scour_qiita::QiitaApi;
use std::time::Duration;

mod tui;

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (env wins); an optional path argument overrides the default.
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "scour.yaml".into());
    let cfg: ScourConfig = ScourConfigLoader::new().with_file(&config_path).load()?;

    init_logging(LogConfig::default())?;
    tracing::info!(config = %config_path, "scour starting");

    let api = QiitaApi::with_base(&cfg.search.base_url, cfg.search.auth_token)?
        .with_per_page(cfg.search.per_page)
        .with_timeout(Duration::from_secs(cfg.search.timeout_secs));
    let pipeline = SearchPipeline::spawn(api);

    tui::run(pipeline).await
}
