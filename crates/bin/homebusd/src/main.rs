//! # homebusd — homebus demo daemon
//!
//! Composition root that wires the virtual devices to the dispatcher and
//! runs the demo routines.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise structured logging
//! - Build the virtual devices and register them concurrently
//! - Run the "wake up" then "sleep" routines and report how long each took
//! - Cancel pending messages on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod routines;

use std::sync::Arc;
use std::time::Instant;

use homebus_adapter_virtual::{HueLight, SmartSpeaker, SmartToilet};
use homebus_app::registry::Registry;
use homebus_app::routine_runner::RoutineRunner;
use homebus_app::services::dispatch_service::DispatchService;
use homebus_domain::routine::Routine;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::routines::Household;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Devices
    let latency = config.latency.latency();
    let light = Arc::new(HueLight::default().with_latency(latency));
    let speaker = Arc::new(SmartSpeaker::default().with_latency(latency));
    let toilet = Arc::new(
        SmartToilet::default()
            .with_reservoir(config.toilet.reservoir)
            .with_latency(latency),
    );

    // Registry
    let registry = Arc::new(Registry::new());
    let (light_id, speaker_id, toilet_id) = tokio::try_join!(
        tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.register(light) }
        }),
        tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.register(speaker) }
        }),
        tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.register(toilet) }
        }),
    )?;
    for device in registry.list() {
        tracing::info!(
            id = %device.id,
            name = %device.name,
            capabilities = %device.capabilities,
            "device registered"
        );
    }

    // Services
    let dispatcher = Arc::new(DispatchService::new(registry));
    let runner = RoutineRunner::new(dispatcher);

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted, cancelling pending messages");
                shutdown.cancel();
            }
        }
    });

    let house = Household {
        light: light_id,
        speaker: speaker_id,
        toilet: toilet_id,
    };
    let started = Instant::now();
    run(&runner, routines::wake_up(&house, &config.speaker.song)?, &shutdown).await?;
    run(&runner, routines::sleep(&house)?, &shutdown).await?;
    tracing::info!(elapsed = ?started.elapsed(), "all routines done");

    Ok(())
}

async fn run(
    runner: &RoutineRunner,
    routine: Routine,
    shutdown: &CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = routine.name.clone();
    let started = Instant::now();
    let outcomes = runner.run_cancellable(routine, shutdown).await?;
    for outcome in &outcomes {
        tracing::info!(
            device = %outcome.device_id,
            kind = %outcome.kind,
            state = %outcome.snapshot.state,
            latency = ?outcome.latency(),
            "message handled"
        );
    }
    tracing::info!(routine = %name, elapsed = ?started.elapsed(), "routine finished");
    Ok(())
}
