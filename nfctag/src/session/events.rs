// nfctag/src/session/events.rs
//! Outbound notifications from a running session.
//!
//! Each sink is a single-method trait implemented for matching closures, so
//! a shell only wires up what it displays. [`EventChannel`] implements all
//! four by publishing [`Event`]s for a UI thread to drain.

use std::sync::mpsc::{channel, Receiver, Sender};

use log::trace;

use crate::session::SessionState;

/// Human readable progress or state sentence
pub trait StatusSink: Send {
    /// Called with each status sentence
    fn status(&self, text: &str);
}

/// Batch counters
pub trait ProgressSink: Send {
    /// Called after every written tag, and once with zero at the start
    fn progress(&self, current: u32, total: u32);
}

/// Decoded tag content summary, for display only
pub trait InfoSink: Send {
    /// Called with a multi-line summary of a tag
    fn info(&self, text: &str);
}

/// Low-volume diagnostics; safe to ignore
pub trait DebugSink: Send {
    /// Called with a short title and its message
    fn debug(&self, title: &str, message: &str);
}

impl<F: Fn(&str) + Send> StatusSink for F {
    fn status(&self, text: &str) {
        self(text)
    }
}

impl<F: Fn(u32, u32) + Send> ProgressSink for F {
    fn progress(&self, current: u32, total: u32) {
        self(current, total)
    }
}

impl<F: Fn(&str) + Send> InfoSink for F {
    fn info(&self, text: &str) {
        self(text)
    }
}

impl<F: Fn(&str, &str) + Send> DebugSink for F {
    fn debug(&self, title: &str, message: &str) {
        self(title, message)
    }
}

/// Everything a session may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// One-line status sentence
    Status(String),
    /// Tags written so far out of the batch size
    Progress { current: u32, total: u32 },
    /// Multi-line tag details
    Info(String),
    /// Diagnostic message with a short title
    Debug { title: String, message: String },
    /// Session state change
    State(SessionState),
}

/// Publishes events over an mpsc channel. Sends to a dropped receiver are
/// discarded.
#[derive(Debug, Clone)]
pub struct EventChannel {
    tx: Sender<Event>,
}

impl EventChannel {
    /// Channel publisher plus the receiver that collects its events
    pub fn new() -> (Self, Receiver<Event>) {
        let (tx, rx) = channel();
        (Self { tx }, rx)
    }

    /// Send `event`, dropping it if the receiver is gone
    pub fn publish(&self, event: Event) {
        if self.tx.send(event).is_err() {
            trace!("event receiver dropped");
        }
    }
}

impl StatusSink for EventChannel {
    fn status(&self, text: &str) {
        self.publish(Event::Status(text.to_string()));
    }
}

impl ProgressSink for EventChannel {
    fn progress(&self, current: u32, total: u32) {
        self.publish(Event::Progress { current, total });
    }
}

impl InfoSink for EventChannel {
    fn info(&self, text: &str) {
        self.publish(Event::Info(text.to_string()));
    }
}

impl DebugSink for EventChannel {
    fn debug(&self, title: &str, message: &str) {
        self.publish(Event::Debug {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// The set of sinks a session reports to. Unset sinks drop their events.
#[derive(Default)]
pub struct Callbacks {
    status: Option<Box<dyn StatusSink>>,
    progress: Option<Box<dyn ProgressSink>>,
    info: Option<Box<dyn InfoSink>>,
    debug: Option<Box<dyn DebugSink>>,
    state: Option<EventChannel>,
}

impl Callbacks {
    /// No sinks; every event is dropped
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every event, state changes included, into `events`.
    pub fn from_channel(events: EventChannel) -> Self {
        Self {
            status: Some(Box::new(events.clone())),
            progress: Some(Box::new(events.clone())),
            info: Some(Box::new(events.clone())),
            debug: Some(Box::new(events.clone())),
            state: Some(events),
        }
    }

    /// Receive status sentences
    pub fn on_status(mut self, sink: impl StatusSink + 'static) -> Self {
        self.status = Some(Box::new(sink));
        self
    }

    /// Receive batch progress
    pub fn on_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    /// Receive tag details
    pub fn on_info(mut self, sink: impl InfoSink + 'static) -> Self {
        self.info = Some(Box::new(sink));
        self
    }

    /// Receive diagnostic messages
    pub fn on_debug(mut self, sink: impl DebugSink + 'static) -> Self {
        self.debug = Some(Box::new(sink));
        self
    }

    pub(crate) fn status(&self, text: &str) {
        if let Some(s) = &self.status {
            s.status(text);
        }
    }

    pub(crate) fn progress(&self, current: u32, total: u32) {
        if let Some(s) = &self.progress {
            s.progress(current, total);
        }
    }

    pub(crate) fn info(&self, text: &str) {
        if let Some(s) = &self.info {
            s.info(text);
        }
    }

    pub(crate) fn debug(&self, title: &str, message: &str) {
        if let Some(s) = &self.debug {
            s.debug(title, message);
        }
    }

    pub(crate) fn state(&self, state: SessionState) {
        if let Some(events) = &self.state {
            events.publish(Event::State(state));
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("status", &self.status.is_some())
            .field("progress", &self.progress.is_some())
            .field("info", &self.info.is_some())
            .field("debug", &self.debug.is_some())
            .finish()
    }
}
