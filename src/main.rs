use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use recetario::config::Config;
use recetario::images::{self, HttpSource, ImageEvent, ImageSource};
use recetario::screen::{Reaction, Session};
use recetario::tui::{self, Command};

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "recetario.log";

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal belongs to the TUI, so logs go to a file.
    let log_file = std::fs::File::create(LOG_FILE)
        .with_context(|| format!("Failed to create log file: {}", LOG_FILE))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RECETARIO_LOG").unwrap_or_else(|_| "recetario=info".to_string()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = Config::load_or_default(Path::new(CONFIG_FILE))?;
    tracing::info!(?config, "starting recetario");

    let source: Arc<dyn ImageSource> =
        Arc::new(HttpSource::new(&config.images).context("Failed to build HTTP client")?);

    let mut session = Session::new(config.ui.thumb_cols, config.ui.thumb_rows);

    // Channels: the engine owns the session and publishes snapshots; the TUI
    // renders snapshots and sends commands back.
    let (state_tx, state_rx) = watch::channel(session.snapshot());
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(64);
    let (img_tx, mut img_rx) = mpsc::channel::<ImageEvent>(64);

    let tick = Duration::from_millis(config.ui.tick_ms.max(1));
    let tui_task = tokio::spawn(tui::run_tui(state_rx, cmd_tx, tick));

    let notice_ttl = Duration::from_secs(config.ui.notice_secs.max(1));
    let mut loaders: HashMap<String, JoinHandle<()>> = HashMap::new();
    let mut notice_deadline: Option<Instant> = None;

    loop {
        let deadline = notice_deadline;
        let notice_expiry = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            command = cmd_rx.recv() => {
                let Some(command) = command else { break };
                match session.apply(command) {
                    Reaction::Quit => break,
                    Reaction::StartLoad { key, url } => {
                        if let Some(stale) = loaders.remove(&key) {
                            stale.abort();
                        }
                        let handle = images::spawn_loader(
                            source.clone(),
                            key.clone(),
                            url,
                            config.ui.thumb_cols,
                            config.ui.thumb_rows,
                            img_tx.clone(),
                        );
                        loaders.insert(key, handle);
                    }
                    Reaction::CancelLoad { key } => {
                        if let Some(handle) = loaders.remove(&key) {
                            handle.abort();
                        }
                    }
                    Reaction::None => {}
                }
                let _ = state_tx.send(session.snapshot());
            }
            event = img_rx.recv() => {
                let Some(event) = event else { break };
                loaders.remove(event.key());
                if session.on_image_event(event) {
                    notice_deadline = Some(Instant::now() + notice_ttl);
                }
                let _ = state_tx.send(session.snapshot());
            }
            _ = notice_expiry => {
                session.clear_notice();
                notice_deadline = None;
                let _ = state_tx.send(session.snapshot());
            }
        }
    }

    for (_, handle) in loaders.drain() {
        handle.abort();
    }
    tui_task.await??;
    tracing::info!("recetario stopped");
    Ok(())
}
