mod command;
mod config;
mod console;

use command::CommandExecutor;
use config::AppConfig;
use dronectl_shared::{DroneController, DroneEvent, DroneEventReceiver};
use std::sync::Arc;
use tokio::io::{self, BufReader};

use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; logs go to stderr so replies on stdout stay clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;

    info!("Drone console starting: {}", config.device_id);
    info!("  Boundary min: ({})", config.drone.boundary_min);
    info!("  Speed: {} units/s", config.drone.speed_units_per_sec);

    let (drone, events) = DroneController::new(config.drone.clone());

    // Spawn drone event logger
    let device_id = config.device_id.clone();
    tokio::spawn(async move {
        handle_drone_events(device_id, events).await;
    });

    let executor = CommandExecutor::new(config.device_id.clone(), Arc::new(drone));

    let mut stdout = io::stdout();
    console::run(BufReader::new(io::stdin()), &mut stdout, &config.prompt, &executor).await?;

    info!(
        "Session ended: {} commands, {} rejected",
        executor.executed_count(),
        executor.rejected_count()
    );
    Ok(())
}

/// Log events published by the drone
async fn handle_drone_events(device_id: String, mut events: DroneEventReceiver) {
    while let Some(event) = events.recv().await {
        match event {
            DroneEvent::FeatureToggled { feature, on } => {
                debug!("[{}] {} {}", device_id, feature, if on { "on" } else { "off" });
            }
            DroneEvent::HornSounding { seconds } => {
                info!("[{}] Horn sounding for {}s", device_id, seconds);
            }
            DroneEvent::HornSilenced => {
                info!("[{}] Horn silenced", device_id);
            }
            DroneEvent::Moved { from, to } => {
                info!("[{}] Moved ({}) -> ({})", device_id, from, to);
            }
            DroneEvent::BoundaryReached { direction, position } => {
                warn!(
                    "[{}] Boundary reached heading {} at ({})",
                    device_id, direction, position
                );
            }
        }
    }
    debug!("[{}] Drone event channel closed", device_id);
}
