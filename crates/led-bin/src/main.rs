//! led entrypoint.
use anyhow::Result;
use clap::Parser;
use core_events::{EVENT_CHANNEL_CAP, Event, EventSourceRegistry, TickEventSource};
use core_input::InputDecoder;
use core_render::RenderEngine;
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod bootstrap;
mod runtime;

use bootstrap::Bootstrap;
use runtime::EditorRuntime;

const LOG_FILE: &str = "led.log";
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "led", version, about = "A minimal screen-oriented text editor")]
struct Args {
    /// File to edit; created on first save if it does not exist.
    pub path: PathBuf,
    /// Configuration file path (overrides discovery of `led.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", path = %args.path.display(), "startup");

    let config = core_config::load_from(args.config.clone())?;
    let Bootstrap {
        model,
        config,
        themes,
        title,
    } = Bootstrap::load(&args.path, config)?;

    let mut backend = CrosstermBackend::new();
    backend.set_title(&title)?;
    let size = backend.size()?;
    let _terminal_guard = backend.enter_guard()?;

    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
    let mut registry = EventSourceRegistry::new();
    registry.register(TickEventSource::new(TICK_INTERVAL));
    let source_handles = registry.spawn_all(&tx);

    let mut runtime = EditorRuntime::new(
        model,
        InputDecoder::new(config.repeat_cooldown()),
        RenderEngine::new(themes),
        size,
        BufWriter::new(std::io::stdout()),
        tx,
        rx,
    )
    .with_sources(source_handles, input_task, input_shutdown);
    let reason = runtime.run().await?;
    info!(target: "runtime", %reason, unsaved = runtime.model().state().dirty, "exit");
    Ok(())
}
