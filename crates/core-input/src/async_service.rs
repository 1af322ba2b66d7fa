use crate::key_token::map_key_event;
use core_events::{
    ASYNC_INPUT_STARTS, ASYNC_INPUT_STOP_CHANNEL, ASYNC_INPUT_STOP_ERROR, ASYNC_INPUT_STOP_SIGNAL,
    ASYNC_INPUT_STOP_STREAM, CHANNEL_SEND_FAILURES, Event, InputEvent, KEYPRESS_REPEAT,
    KEYPRESS_TOTAL, KeyEvent,
};
use crossterm::event::{
    Event as CEvent, EventStream, KeyCode as CKeyCode, KeyEvent as CKeyEvent,
    KeyEventKind as CKind, KeyModifiers as CMods,
};
use std::io;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::{Notify, mpsc::Sender};
use tokio::task;
use tokio_stream::StreamExt;
use tracing::{Instrument, info, trace, warn};

#[derive(Clone, Debug)]
pub struct AsyncInputShutdown {
    notify: Arc<Notify>,
}

impl AsyncInputShutdown {
    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

#[derive(Clone, Debug)]
struct ShutdownListener {
    notify: Arc<Notify>,
}

impl ShutdownListener {
    fn new_pair() -> (AsyncInputShutdown, Self) {
        let notify = Arc::new(Notify::new());
        (
            AsyncInputShutdown {
                notify: notify.clone(),
            },
            ShutdownListener { notify },
        )
    }

    async fn wait(&self) {
        self.notify.notified().await;
    }
}

/// Spawn a Tokio task reading terminal events from `EventStream`.
pub(crate) fn spawn_async_event_task(
    sender: Sender<Event>,
) -> (task::JoinHandle<()>, AsyncInputShutdown) {
    let (shutdown, listener) = ShutdownListener::new_pair();
    let span = tracing::debug_span!(target: "input.thread", "input_async_task");
    let handle = task::spawn(
        AsyncEventStreamTask::new(sender, EventStream::new(), listener)
            .run()
            .instrument(span),
    );
    (handle, shutdown)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitReason {
    ShutdownSignal,
    ChannelClosed,
    StreamEnded,
    StreamError,
}

impl ExitReason {
    fn as_str(&self) -> &'static str {
        match self {
            ExitReason::ShutdownSignal => "shutdown_signal",
            ExitReason::ChannelClosed => "channel_closed",
            ExitReason::StreamEnded => "stream_ended",
            ExitReason::StreamError => "stream_error",
        }
    }
}

struct AsyncEventStreamTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    sender: Sender<Event>,
    stream: S,
    shutdown: ShutdownListener,
    exit_reason: ExitReason,
    stream_error: Option<io::ErrorKind>,
}

impl<S> AsyncEventStreamTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    fn new(sender: Sender<Event>, stream: S, shutdown: ShutdownListener) -> Self {
        Self {
            sender,
            stream,
            shutdown,
            exit_reason: ExitReason::StreamEnded,
            stream_error: None,
        }
    }

    async fn run(mut self) {
        info!(target: "input.thread", "async_input_task_started");
        ASYNC_INPUT_STARTS.fetch_add(1, Ordering::Relaxed);
        loop {
            let maybe_result = tokio::select! {
                biased;
                _ = self.shutdown.wait() => {
                    self.exit_reason = ExitReason::ShutdownSignal;
                    break;
                }
                result = self.stream.next() => result,
            };

            let Some(result) = maybe_result else {
                break;
            };

            let keep_going = match result {
                Ok(CEvent::Key(key)) => self.handle_key_event(key).await,
                Ok(CEvent::Resize(w, h)) => {
                    trace!(target: "input.event", w, h, "resize");
                    self.send_event(Event::Input(InputEvent::Resize(w, h)))
                        .await
                }
                Ok(_) => true,
                Err(err) => {
                    self.exit_reason = ExitReason::StreamError;
                    self.stream_error = Some(err.kind());
                    false
                }
            };
            if !keep_going {
                break;
            }
        }

        let counter = match self.exit_reason {
            ExitReason::ShutdownSignal => &ASYNC_INPUT_STOP_SIGNAL,
            ExitReason::ChannelClosed => &ASYNC_INPUT_STOP_CHANNEL,
            ExitReason::StreamEnded => &ASYNC_INPUT_STOP_STREAM,
            ExitReason::StreamError => &ASYNC_INPUT_STOP_ERROR,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        if self.exit_reason == ExitReason::StreamError {
            warn!(target: "input.thread", error_kind = ?self.stream_error, "async_input_task_stream_error");
        }
        info!(target: "input.thread", reason = self.exit_reason.as_str(), "async_input_task_stopped");
    }

    async fn handle_key_event(&mut self, key: CKeyEvent) -> bool {
        if !matches!(key.kind, CKind::Press | CKind::Repeat) {
            return true;
        }

        if matches!(key.code, CKeyCode::Char('c')) && key.modifiers.contains(CMods::CONTROL) {
            return self.send_event(Event::Input(InputEvent::CtrlC)).await;
        }

        match map_key_event(&key) {
            Some(mapped) => self.emit_keypress(mapped).await,
            None => true,
        }
    }

    async fn emit_keypress(&mut self, key: KeyEvent) -> bool {
        // Only the key kind is logged, never the character itself.
        trace!(
            target: "input.event",
            kind = "keypress",
            repeat = key.repeat,
            mods = ?key.mods,
            printable = matches!(key.code, core_events::KeyCode::Char(_))
        );
        let repeat = key.repeat;
        let sent = self.send_event(Event::Input(InputEvent::Key(key))).await;
        if sent {
            KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
            if repeat {
                KEYPRESS_REPEAT.fetch_add(1, Ordering::Relaxed);
            }
        }
        sent
    }

    async fn send_event(&mut self, event: Event) -> bool {
        if self.sender.send(event).await.is_ok() {
            return true;
        }
        CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
        if self.exit_reason != ExitReason::ShutdownSignal {
            self.exit_reason = ExitReason::ChannelClosed;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{KeyCode, KeyModifiers};
    use std::sync::Mutex;
    use tokio::sync::{Mutex as TokioMutex, mpsc};
    use tokio::time::{Duration, timeout};
    use tracing::field::{Field, Visit};
    use tracing::{Metadata, Subscriber, subscriber::Interest};
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::registry::Registry;

    static LOG_CAPTURE_GUARD: TokioMutex<()> = TokioMutex::const_new(());

    #[derive(Clone, Default)]
    struct LogCapture {
        events: Arc<Mutex<Vec<CapturedLog>>>,
    }

    #[derive(Clone, Debug)]
    struct CapturedLog {
        target: String,
        fields: Vec<(String, String)>,
    }

    #[derive(Default)]
    struct LogVisitor {
        fields: Vec<(String, String)>,
    }

    impl Visit for LogVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    impl<S> Layer<S> for LogCapture
    where
        S: Subscriber,
    {
        fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
            Interest::always()
        }

        fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
            metadata.target().starts_with("input.")
        }

        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = LogVisitor::default();
            event.record(&mut visitor);
            let meta = event.metadata();
            self.events.lock().unwrap().push(CapturedLog {
                target: meta.target().to_string(),
                fields: visitor.fields,
            });
        }
    }

    async fn run_scenario(events: Vec<CEvent>) -> Vec<Event> {
        let (tx, mut rx) = mpsc::channel(64);
        let stream = tokio_stream::iter(events.into_iter().map(Ok));
        let (_shutdown, listener) = ShutdownListener::new_pair();
        AsyncEventStreamTask::new(tx, stream, listener).run().await;

        let mut outputs = Vec::new();
        while let Some(evt) = rx.recv().await {
            outputs.push(evt);
        }
        outputs
    }

    fn key(code: CKeyCode) -> CEvent {
        CEvent::Key(CKeyEvent::new(code, CMods::NONE))
    }

    #[tokio::test]
    async fn forwards_basic_key_events() {
        let outputs = run_scenario(vec![key(CKeyCode::Char('a')), key(CKeyCode::Enter)]).await;
        assert_eq!(
            outputs,
            vec![
                Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Char('a')))),
                Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Enter))),
            ]
        );
    }

    #[tokio::test]
    async fn repeat_key_events_set_repeat_flag() {
        let base_repeat = KEYPRESS_REPEAT.load(Ordering::Relaxed);
        let mut c_event = CKeyEvent::new(CKeyCode::Down, CMods::NONE);
        c_event.kind = CKind::Repeat;

        let outputs = run_scenario(vec![CEvent::Key(c_event)]).await;

        match outputs.as_slice() {
            [Event::Input(InputEvent::Key(k))] => {
                assert_eq!(k.code, KeyCode::Down);
                assert!(k.repeat, "repeat flag should propagate");
            }
            other => panic!("unexpected output sequence: {other:?}"),
        }
        assert!(KEYPRESS_REPEAT.load(Ordering::Relaxed) > base_repeat);
    }

    #[tokio::test]
    async fn release_and_unmapped_keys_are_skipped() {
        let mut release = CKeyEvent::new(CKeyCode::Char('x'), CMods::NONE);
        release.kind = CKind::Release;
        let outputs = run_scenario(vec![CEvent::Key(release), key(CKeyCode::F(3))]).await;
        assert!(outputs.is_empty());
    }

    #[tokio::test]
    async fn forwards_ctrl_c() {
        let outputs = run_scenario(vec![CEvent::Key(CKeyEvent::new(
            CKeyCode::Char('c'),
            CMods::CONTROL,
        ))])
        .await;
        assert_eq!(outputs, vec![Event::Input(InputEvent::CtrlC)]);
    }

    #[tokio::test]
    async fn forwards_ctrl_chords_as_keys() {
        let outputs = run_scenario(vec![CEvent::Key(CKeyEvent::new(
            CKeyCode::Char('s'),
            CMods::CONTROL,
        ))])
        .await;
        assert_eq!(
            outputs,
            vec![Event::Input(InputEvent::Key(KeyEvent::new(
                KeyCode::Char('s'),
                KeyModifiers::CTRL
            )))]
        );
    }

    #[tokio::test]
    async fn forwards_resize_event() {
        let outputs = run_scenario(vec![CEvent::Resize(120, 48)]).await;
        assert_eq!(outputs, vec![Event::Input(InputEvent::Resize(120, 48))]);
    }

    #[tokio::test]
    async fn stream_error_stops_task() {
        let (tx, mut rx) = mpsc::channel(8);
        let items: Vec<io::Result<CEvent>> = vec![
            Ok(key(CKeyCode::Char('a'))),
            Err(io::Error::other("boom")),
            Ok(key(CKeyCode::Char('b'))),
        ];
        let (_shutdown, listener) = ShutdownListener::new_pair();
        AsyncEventStreamTask::new(tx, tokio_stream::iter(items), listener)
            .run()
            .await;
        let mut outputs = Vec::new();
        while let Some(evt) = rx.recv().await {
            outputs.push(evt);
        }
        assert_eq!(outputs.len(), 1, "events after the error are not read");
    }

    #[tokio::test]
    async fn shutdown_signal_stops_pending_stream() {
        let (tx, _rx) = mpsc::channel(8);
        let (shutdown, listener) = ShutdownListener::new_pair();
        let stream = tokio_stream::pending::<io::Result<CEvent>>();
        let handle = tokio::spawn(AsyncEventStreamTask::new(tx, stream, listener).run());
        shutdown.signal();
        let joined = timeout(Duration::from_millis(500), handle).await;
        assert!(joined.is_ok(), "task should stop after shutdown signal");
    }

    #[tokio::test]
    async fn keypress_logging_never_records_characters() {
        let _log_guard = LOG_CAPTURE_GUARD.lock().await;
        let capture = LogCapture::default();
        let events_handle = capture.events.clone();
        let subscriber = Registry::default().with(capture.with_filter(LevelFilter::TRACE));
        let dispatch = tracing::Dispatch::new(subscriber);
        let _guard = tracing::dispatcher::set_default(&dispatch);

        run_scenario(vec![key(CKeyCode::Char('Q'))]).await;

        let logs = events_handle.lock().unwrap();
        let keypress_log = logs
            .iter()
            .find(|entry| entry.target == "input.event")
            .unwrap_or_else(|| panic!("missing input.event log, captured: {logs:?}"));
        assert!(
            keypress_log
                .fields
                .iter()
                .any(|(k, v)| k == "kind" && v == "\"keypress\"")
        );
        assert!(
            keypress_log
                .fields
                .iter()
                .any(|(k, v)| k == "printable" && v == "true")
        );
        for (_, value) in &keypress_log.fields {
            assert!(!value.contains('Q'), "logged raw key: {value}");
        }
    }
}
