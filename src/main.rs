// --- Course Planner - servidor HTTP ---

use courseplanner::config::PlannerConfig;
use courseplanner::{init_tracing, run_server};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = PlannerConfig::from_env().map_err(|e| std::io::Error::other(e.to_string()))?;
    init_tracing(&config.log_filter);

    tracing::info!("=== Course Planner (API) ===");
    tracing::info!(bind = %config.bind_addr, "Iniciando servidor en http://{}", config.bind_addr);
    run_server(config).await
}
