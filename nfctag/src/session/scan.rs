// nfctag/src/session/scan.rs
//! Continuous scanning.

use std::time::Instant;

use log::info;

use crate::ndef;
use crate::session::{Outcome, SessionState, TagSession};
use crate::tag::{read_tag, read_uid};
use crate::types::{ReadExtent, TagUid};
use crate::{Error, Result};

impl TagSession {
    /// Continuous read-only scan.
    ///
    /// Each tick opens a channel and reads the UID. Only a UID different
    /// from the previous one triggers a memory read and an info event; an
    /// error forgets the previous UID so the same tag is picked up again.
    /// Ends with `TimedOut` once no new tag has shown up for
    /// `scan_timeout`, or with `Stopped`.
    pub fn scan(&mut self) -> Result<Outcome> {
        self.ensure_device()?;
        self.set_state(SessionState::Scanning);
        self.status("Scanning for tags...");
        info!(
            "scanning, timeout after {:?} of inactivity",
            self.config.scan_timeout
        );

        let mut last_seen: Option<TagUid> = None;
        let mut last_activity = Instant::now();
        let outcome = loop {
            if self.is_stopped() {
                break Outcome::Stopped;
            }
            if last_activity.elapsed() >= self.config.scan_timeout {
                info!("scan stopped after {:?} of inactivity", self.config.scan_timeout);
                self.status("Scanning timed out - No recent activity");
                break Outcome::TimedOut;
            }

            match self.scan_tick(&mut last_seen) {
                Ok(true) => last_activity = Instant::now(),
                Ok(false) => {}
                Err(e) => {
                    self.report_error(&e);
                    last_seen = None;
                    self.set_state(SessionState::Scanning);
                }
            }

            if self.wait_tick() {
                break Outcome::Stopped;
            }
        };
        Ok(self.finish(outcome))
    }

    /// One polling iteration; true if a new tag was processed.
    fn scan_tick(&mut self, last_seen: &mut Option<TagUid>) -> Result<bool> {
        let Some(mut channel) = self.device.open_channel() else {
            return Ok(false);
        };
        let uid = read_uid(&mut channel).ok_or(Error::NoTag)?;
        if last_seen.as_ref() == Some(&uid) {
            return Ok(false);
        }
        *last_seen = Some(uid.clone());

        self.set_state(SessionState::TagDetected);
        info!("new tag {}", uid);
        self.callbacks.debug("New tag detected", &format!("UID: {}", uid));
        self.status("Tag Ready");

        self.set_state(SessionState::Processing);
        let summary = match read_tag(&mut channel, ReadExtent::Compact) {
            Some(memory) => {
                let family = memory.family();
                match ndef::decode(&memory.data) {
                    Some(content) => {
                        self.callbacks
                            .debug("URL Detected", &format!("Found URL: {}", content));
                        format!("UID: {}\nTag Type: {}\n\nContent:\n{}", uid, family, content)
                    }
                    None => format!("UID: {}\nTag Type: {}\n\nNo NDEF content", uid, family),
                }
            }
            None => format!("UID: {}\n\nTag memory unreadable", uid),
        };
        self.callbacks.info(&summary);
        self.set_state(SessionState::Scanning);
        Ok(true)
    }
}
