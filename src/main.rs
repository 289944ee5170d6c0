//! LED leaderboard sign (default binary).
//!
//! Polls the leaderboard feed and shows it on an emulated LED panel in the
//! terminal, or logs each frame with `display.backend = "log"`. Runs until
//! SIGINT or SIGTERM.

use anyhow::Result;
use tracing::info;

use led_leaderboard::config::{self, AppConfig, DisplayBackend};
use led_leaderboard::core::Canvas;
use led_leaderboard::feed::{install_signal_handlers, CancelToken, HttpTransport, PollLoop};
use led_leaderboard::headless::LogCanvas;
use led_leaderboard::logging;
use led_leaderboard::term::PanelCanvas;

#[tokio::main]
async fn main() -> Result<()> {
    let (config_path, explicit) = config::config_path(std::env::args());
    let cfg = AppConfig::load(&config_path, explicit)?;

    logging::init(&cfg)?;
    info!(
        config = %config_path.display(),
        url = %cfg.source_url,
        backend = ?cfg.display.backend,
        "Logging initialised. Starting leaderboard sign"
    );

    let token = CancelToken::new();
    install_signal_handlers(token.clone())?;

    let transport = HttpTransport::new(cfg.request_timeout())?;
    let (width, height) = (cfg.display.width, cfg.display.height);

    match cfg.display.backend {
        DisplayBackend::Terminal => {
            let canvas = PanelCanvas::open(width, height)?;
            run(transport, canvas, &cfg, token).await
        }
        DisplayBackend::Log => run(transport, LogCanvas::new(width, height), &cfg, token).await,
    }
}

async fn run<C: Canvas>(
    transport: HttpTransport,
    canvas: C,
    cfg: &AppConfig,
    token: CancelToken,
) -> Result<()> {
    let mut poll_loop = PollLoop::new(
        transport,
        canvas,
        cfg.plan_options(),
        cfg.poll_config(),
        token,
    );
    poll_loop.run().await?;
    info!("Shutdown complete");
    Ok(())
}
