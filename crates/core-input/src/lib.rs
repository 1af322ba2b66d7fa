//! Terminal input: async crossterm reader plus the key → `EditCommand` decoder.

mod async_service;
mod key_token;
mod translate;

pub use async_service::AsyncInputShutdown;
pub use translate::{InputDecoder, KeyTranslator, RepeatThrottle};

use async_service::spawn_async_event_task;
use core_events::Event;
use tokio::task::JoinHandle;

/// Spawn the async input service backed by `crossterm::EventStream`.
///
/// Returns the `JoinHandle` for the background task alongside a shutdown handle
/// that can be used to request immediate termination.
pub fn spawn_async_input(
    sender: tokio::sync::mpsc::Sender<Event>,
) -> (JoinHandle<()>, AsyncInputShutdown) {
    spawn_async_event_task(sender)
}
