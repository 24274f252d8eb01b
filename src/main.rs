use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn, Level};

use toastx_core::{
    config::ToastConfig,
    store::{LeaderboardPeriod, SnapshotStore},
    RecognitionManager,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ToastConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        eprintln!("Please check the TOASTX_* environment variables.");
        e
    })?;

    init_logging(&config)?;

    info!("Starting Toast X recognition core");

    let mut manager = RecognitionManager::new(config.to_rules());
    if config.persistence.enabled {
        let store = Arc::new(SnapshotStore::new(&config.persistence.snapshot_path));
        manager = manager.with_snapshot_store(store);
        info!(
            "Snapshot persistence enabled at {}",
            config.persistence.snapshot_path.display()
        );
    } else {
        warn!("Snapshot persistence disabled - state will not survive a restart");
    }

    let users = manager.load().await?;
    info!("Loaded {} users", users);

    if config.persistence.seed_demo_data && manager.seed_if_empty().await {
        info!("Demo data loaded");
    }

    for entry in manager.leaderboard(LeaderboardPeriod::AllTime, 5).await {
        info!(
            "#{} {} ({}) - {} credits, {} recognitions",
            entry.rank, entry.name, entry.department, entry.credits, entry.recognitions_received
        );
    }

    let analytics = manager.analytics(None).await;
    info!(
        "Recognitions: {}, credits in circulation: {}, participation: {:.0}%",
        analytics.total_recognitions,
        analytics.total_credits,
        analytics.participation_rate * 100.0
    );

    manager.persist().await;
    info!("Shutdown complete");
    Ok(())
}

fn init_logging(config: &ToastConfig) -> Result<()> {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}
