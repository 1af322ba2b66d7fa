//! The owning event loop.
//!
//! One task owns the `EditorModel`. Producers (async input task, tick source)
//! feed a bounded channel; every event is applied to completion before the
//! frame is rendered, so the renderer never observes a half-applied command.

use anyhow::Result;
use core_actions::{EditCommand, dispatch};
use core_events::{Event, InputEvent};
use core_input::{AsyncInputShutdown, InputDecoder};
use core_model::{EditorModel, ScreenMetrics};
use core_render::RenderEngine;
use std::fmt;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};

/// Terminal rows are one line tall.
const LINE_HEIGHT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    CtrlC,
    CommandQuit,
    ShutdownEvent,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::CommandQuit => "command_quit",
            ShutdownReason::ShutdownEvent => "shutdown_event",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue { redraw: bool },
    Break { reason: ShutdownReason },
}

pub struct EditorRuntime<W: Write> {
    model: EditorModel,
    decoder: InputDecoder,
    engine: RenderEngine,
    size: (u16, u16),
    out: W,
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    source_handles: Vec<JoinHandle<()>>,
    input_task: Option<JoinHandle<()>>,
    input_shutdown: Option<AsyncInputShutdown>,
}

impl<W: Write> EditorRuntime<W> {
    pub fn new(
        model: EditorModel,
        decoder: InputDecoder,
        engine: RenderEngine,
        size: (u16, u16),
        out: W,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
    ) -> Self {
        Self {
            model,
            decoder,
            engine,
            size,
            out,
            rx,
            tx: Some(tx),
            source_handles: Vec::new(),
            input_task: None,
            input_shutdown: None,
        }
    }

    /// Attach producer tasks so shutdown can stop and join them.
    pub fn with_sources(
        mut self,
        source_handles: Vec<JoinHandle<()>>,
        input_task: JoinHandle<()>,
        input_shutdown: AsyncInputShutdown,
    ) -> Self {
        self.source_handles = source_handles;
        self.input_task = Some(input_task);
        self.input_shutdown = Some(input_shutdown);
        self
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    fn metrics(&self) -> ScreenMetrics {
        ScreenMetrics::new(self.size.1 as usize, LINE_HEIGHT)
    }

    pub async fn run(&mut self) -> Result<ShutdownReason> {
        self.render();

        let mut shutdown_reason = ShutdownReason::ChannelClosed;
        while let Some(event) = self.rx.recv().await {
            match self.handle_event(&event) {
                LoopControl::Break { reason } => {
                    shutdown_reason = reason;
                    break;
                }
                LoopControl::Continue { redraw: true } => self.render(),
                LoopControl::Continue { redraw: false } => {}
            }
        }

        self.rx.close();
        self.finalize_shutdown(shutdown_reason).await;
        Ok(shutdown_reason)
    }

    fn handle_event(&mut self, event: &Event) -> LoopControl {
        match event {
            Event::Input(input) => self.handle_input_event(input),
            Event::Command(cmd) => self.apply_command(*cmd),
            Event::Tick => LoopControl::Continue { redraw: false },
            Event::Shutdown => LoopControl::Break {
                reason: ShutdownReason::ShutdownEvent,
            },
        }
    }

    fn handle_input_event(&mut self, input: &InputEvent) -> LoopControl {
        match input {
            InputEvent::Resize(w, h) => self.handle_resize(*w, *h),
            InputEvent::CtrlC => {
                info!(target: "runtime", "ctrl_c");
                LoopControl::Break {
                    reason: ShutdownReason::CtrlC,
                }
            }
            InputEvent::Key(_) => match self.decoder.decode(input) {
                Some(cmd) => self.apply_command(cmd),
                None => LoopControl::Continue { redraw: false },
            },
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> LoopControl {
        trace!(target: "runtime", width, height, "resize");
        self.size = (width, height);
        let metrics = self.metrics();
        self.model.fit_viewport(&metrics);
        self.engine.invalidate();
        LoopControl::Continue { redraw: true }
    }

    fn apply_command(&mut self, cmd: EditCommand) -> LoopControl {
        let metrics = self.metrics();
        let result = dispatch(cmd, &mut self.model, &metrics);
        if result.quit {
            if self.model.state().dirty {
                warn!(target: "runtime", "quit_with_unsaved_changes");
            }
            return LoopControl::Break {
                reason: ShutdownReason::CommandQuit,
            };
        }
        LoopControl::Continue {
            redraw: result.dirty,
        }
    }

    fn render(&mut self) {
        let metrics = self.metrics();
        let frame = self.model.frame(&metrics);
        let (w, h) = self.size;
        if let Err(e) = self.engine.render(&frame, w, h, &mut self.out) {
            error!(target: "render", error = %e, "render_error");
        }
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        if let Some(tx) = self.tx.take() {
            trace!(target: "runtime.shutdown", reason = reason.as_str(), "dropping_runtime_sender");
            drop(tx);
        }

        while let Some(handle) = self.source_handles.pop() {
            handle.abort();
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(())) => trace!(target: "runtime.shutdown", "event_source_task_stopped"),
                Ok(Err(err)) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "event_source_task_cancelled")
                }
                Ok(Err(err)) => {
                    error!(target: "runtime.shutdown", ?err, "event_source_task_error")
                }
                Err(_) => warn!(target: "runtime.shutdown", "event_source_task_timeout"),
            }
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            trace!(target: "runtime.shutdown", "input_task_shutdown_signal");
            shutdown.signal();
        }
        if let Some(handle) = self.input_task.take() {
            match handle.await {
                Ok(()) => trace!(target: "runtime.shutdown", "input_task_joined"),
                Err(err) if err.is_cancelled() => {
                    trace!(target: "runtime.shutdown", "input_task_cancelled")
                }
                Err(err) => error!(target: "runtime.shutdown", ?err, "input_task_join_failed"),
            }
        }

        log_shutdown_stage(reason, "complete");
    }
}
