use std::sync::Arc;

use tracing::info;

use hotdesk::config::Config;
use hotdesk::engine::Engine;
use hotdesk::model::OccupancySegment;
use hotdesk::notify::NotifyHub;
use hotdesk::seed::Seed;

fn render(segments: &[OccupancySegment]) -> String {
    segments
        .iter()
        .map(|s| format!("{}:{}-{}", if s.busy { "busy" } else { "free" }, s.start, s.end))
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    hotdesk::observability::init(config.metrics_port)?;

    let engine = Engine::new(config.window, Arc::new(NotifyHub::new()));
    info!("working window {}-{}", config.window.start(), config.window.end());

    if let Some(path) = &config.seed_path {
        let report = Seed::load(path)?.apply(&engine).await?;
        info!(
            "seeded {} resources, {} bookings ({} rejected) from {}",
            report.resources,
            report.bookings,
            report.rejected.len(),
            path.display()
        );
    }

    let date = config.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let resources = engine.list_resources().await;
    info!("occupancy for {date}: {} resources", resources.len());
    for resource in &resources {
        let segments = engine.occupancy(&resource.id, date).await;
        let pct = engine.percent_booked(&resource.id, date).await;
        info!(
            resource = %resource.id,
            kind = resource.kind.label(),
            "{:<12} {:>5.1}% {}",
            resource.name,
            pct,
            render(&segments)
        );
    }

    if config.metrics_port.is_some() {
        info!("serving metrics until ctrl-c");
        tokio::signal::ctrl_c().await?;
    }

    info!("hotdesk stopped");
    Ok(())
}
