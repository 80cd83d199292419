// nfctag/src/session/engine.rs
//! Background worker running one session operation at a time.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error};

use crate::address::normalize;
use crate::session::{
    BatchReport, Outcome, SessionState, SourceTag, StateHandle, StopHandle, TagSession,
};
use crate::{Error, Result};

/// What a finished worker produced.
#[derive(Debug)]
pub enum Completion {
    /// From [`Engine::start_scan`]
    Scan(Result<Outcome>),
    /// From [`Engine::write`]
    Write(Result<BatchReport>),
    /// From [`Engine::read_source`]
    Source(Result<SourceTag>),
    /// From [`Engine::copy`]
    Copy(Result<BatchReport>),
}

/// Runs [`TagSession`] operations on a background thread.
///
/// One operation at a time: starting another while a worker is running
/// fails with [`Error::Busy`]. The worker holds the session for its whole
/// run, so nothing else can reach the reader meanwhile.
pub struct Engine {
    session: Arc<Mutex<TagSession>>,
    stop: StopHandle,
    state: StateHandle,
    worker: Option<JoinHandle<Completion>>,
}

impl Engine {
    /// Take ownership of `session`; nothing runs until an operation starts
    pub fn new(session: TagSession) -> Self {
        let stop = session.stop_handle();
        let state = session.state_handle();
        Self {
            session: Arc::new(Mutex::new(session)),
            stop,
            state,
            worker: None,
        }
    }

    /// True while a worker is running
    pub fn is_busy(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Current session state, readable while a worker runs
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// Access the session. Blocks while a worker is running.
    pub fn session(&self) -> MutexGuard<'_, TagSession> {
        lock(&self.session)
    }

    fn spawn<F>(&mut self, name: &str, op: F) -> Result<()>
    where
        F: FnOnce(&mut TagSession) -> Completion + Send + 'static,
    {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        // collect a finished worker that was never joined
        if let Some(done) = self.worker.take() {
            if done.join().is_err() {
                error!("previous worker panicked");
            }
        }
        self.stop.reset();
        let session = Arc::clone(&self.session);
        let handle = thread::Builder::new()
            .name(format!("nfctag-{}", name))
            .spawn(move || {
                let mut session = lock(&session);
                op(&mut session)
            })?;
        debug!("started {} worker", name);
        self.worker = Some(handle);
        Ok(())
    }

    /// Start a continuous scan.
    pub fn start_scan(&mut self) -> Result<()> {
        self.spawn("scan", |s| Completion::Scan(s.scan()))
    }

    /// Start writing `address` to `quantity` tags. Invalid input is rejected
    /// here, before any worker starts.
    pub fn write(&mut self, address: &str, quantity: u32, lock: bool) -> Result<()> {
        if quantity < 1 {
            return Err(Error::InvalidQuantity(quantity));
        }
        let (valid, address) = normalize(address);
        if !valid {
            return Err(Error::InvalidAddress(address));
        }
        self.spawn("write", move |s| {
            Completion::Write(s.batch_write(&address, quantity, lock))
        })
    }

    /// Start waiting for a source tag.
    pub fn read_source(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.spawn("source", move |s| Completion::Source(s.read_source(timeout)))
    }

    /// Start copying the captured source to `quantity` tags.
    pub fn copy(&mut self, quantity: u32, lock: bool) -> Result<()> {
        if quantity < 1 {
            return Err(Error::InvalidQuantity(quantity));
        }
        self.spawn("copy", move |s| Completion::Copy(s.copy_to_new_tags(quantity, lock)))
    }

    /// Ask the running worker to stop. It exits at its next check.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Wait for the current worker. `None` if there is none or it panicked.
    pub fn join(&mut self) -> Option<Completion> {
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(done) => Some(done),
            Err(_) => {
                error!("worker panicked");
                None
            }
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop();
            self.join();
        }
    }
}

fn lock(session: &Mutex<TagSession>) -> MutexGuard<'_, TagSession> {
    session.lock().unwrap_or_else(|p| p.into_inner())
}
