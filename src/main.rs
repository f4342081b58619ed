//! Headless session replay player
//!
//! Loads a recorded session, plays it back in real time with idle gaps
//! skipped, and logs every playback state change.
//!
//! Usage: `replay-controls <session.json> [speed]`

use anyhow::{bail, Context};
use replay_controls::{
    config::ReplayConfig,
    controls::{ControlCommand, ControlSurface, FullscreenFlag},
    session::ReplaySession,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config = ReplayConfig::load_or_default();

    // Initialize logging
    let (file_layer, _log_guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "replay-controls.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,replay_controls=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(session_path) = args.next().map(PathBuf::from) else {
        bail!("usage: replay-controls <session.json> [speed]");
    };
    let speed = args
        .next()
        .map(|s| s.parse::<f64>())
        .transpose()
        .context("speed must be a number")?;

    let session = ReplaySession::load_from_file(&session_path)
        .with_context(|| format!("Failed to load session {:?}", session_path))?;

    let mut surface = ControlSurface::new(&config, FullscreenFlag::default());
    surface.load_session(&session);
    let updates = surface.subscribe();

    if let Some(speed) = speed {
        surface.dispatch(ControlCommand::SetSpeed(speed))?;
    }
    surface.dispatch(ControlCommand::SetSkipInactive(true))?;
    surface.dispatch(ControlCommand::TogglePlayPause)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    let tick = Duration::from_millis(config.tick_interval_ms);
    runtime.block_on(async {
        let mut interval = tokio::time::interval(tick);
        let mut last = tokio::time::Instant::now();

        while surface.state().is_playing {
            let now = interval.tick().await;
            let elapsed = now.duration_since(last);
            last = now;

            surface.tick(elapsed.as_secs_f64() * 1000.0);

            for state in updates.try_iter() {
                tracing::trace!(
                    "{:.0}/{:.0}ms playing={} finished={}",
                    state.current_time_ms,
                    state.duration_ms,
                    state.is_playing,
                    state.is_finished
                );
            }
        }
    });

    let state = surface.state();
    tracing::info!(
        "Replay stopped at {:.0}ms of {:.0}ms (finished: {})",
        state.current_time_ms,
        state.duration_ms,
        state.is_finished
    );

    Ok(())
}
