//! Chooser Game demo
//!
//! Plays one scripted round against the real timers and logs every event.
//! Configure with `CHOOSER_*` variables and `RUST_LOG`.

use tracing::info;
use tracing_subscriber::EnvFilter;

use chooser::{
    AppContext, GameConfig, TouchEvent, MAX_PLAYERS, TASK_DURATION_SECS, VERSION,
    game::events::GameEventData,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Chooser Game v{}", VERSION);
    info!("Players: up to {}", MAX_PLAYERS);
    info!("Task time: {} seconds", TASK_DURATION_SECS);

    let config = GameConfig::from_env()?;
    let app = AppContext::new(config);

    demo_round(&app).await;
    Ok(())
}

/// Three fingers, one round, a few countdown ticks, then play again.
async fn demo_round(app: &AppContext) {
    info!("=== Starting Demo Round ===");

    let mut runner = app.new_runner();
    let touches = [
        TouchEvent::new(1, 60.0, 120.0),
        TouchEvent::new(2, 200.0, 140.0),
        TouchEvent::new(3, 130.0, 260.0),
    ];
    for touch in touches {
        runner.register_touch(touch).await;
    }

    if let Err(e) = runner.start().await {
        info!("Could not start: {}", e);
        return;
    }

    let delay = app.config().selection_delay;
    let tick = app.config().tick_interval;
    tokio::time::sleep(delay + tick * 3 + tick / 2).await;

    let view = runner.view().await;
    match &view.winner {
        Some(winner) => info!(
            "Winner: player {} at {} | task: {} | {}s left",
            winner.id, winner.position, view.task_text, view.seconds_remaining
        ),
        None => info!("No winner yet"),
    }

    runner.play_again().await;

    info!("=== Events ===");
    for event in runner.take_events().await {
        match &event.data {
            GameEventData::CountdownTicked { .. } => {}
            data => info!("round {}: {:?}", event.round, data),
        }
    }

    runner.shutdown();
}
