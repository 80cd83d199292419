// nfctag/src/session/copy.rs
//! Capturing a source tag and copying it to others.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::constants::BASE_PAGE;
use crate::ndef::{self, NdefContent, Record};
use crate::session::batch::WriteJob;
use crate::session::{BatchReport, SessionState, TagSession};
use crate::tag::{read_memory, read_uid};
use crate::types::{ReadExtent, TagUid};
use crate::utils::{format_pages, RetryPolicy};
use crate::{Error, Result};

/// A tag captured by [`TagSession::read_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTag {
    /// Guarded during the copy: never written
    pub uid: TagUid,
    /// Raw user memory from page 4 on
    pub data: Vec<u8>,
    /// `None` if the memory holds an NDEF block without a URI or text record
    pub content: Option<NdefContent>,
    /// The record `content` was decoded from, copied to targets unchanged
    pub record: Option<Record>,
}

/// Fewer bytes than this means the read was cut short
const MIN_SOURCE_BYTES: usize = 8;

impl TagSession {
    /// Wait up to `timeout` (default: the configured source timeout) for a
    /// tag with readable NDEF memory and keep it as the copy source.
    pub fn read_source(&mut self, timeout: Option<Duration>) -> Result<SourceTag> {
        let timeout = timeout.unwrap_or(self.config.source_timeout);
        self.source = None;
        self.ensure_device()?;
        self.set_state(SessionState::Scanning);
        self.status("Please present source tag to read...");
        self.callbacks.info("Waiting for source tag...");

        let deadline = Instant::now() + timeout;
        let mut last_seen: Option<TagUid> = None;
        loop {
            if self.is_stopped() {
                self.set_state(SessionState::Idle);
                return Err(Error::Stopped);
            }
            if Instant::now() >= deadline {
                self.status("Timeout - No source tag detected");
                self.callbacks.info("No source tag scanned yet");
                self.set_state(SessionState::TimedOut);
                return Err(Error::Timeout);
            }

            match self.source_tick(&mut last_seen) {
                Ok(Some(source)) => {
                    info!("source tag {} captured ({} bytes)", source.uid, source.data.len());
                    self.source = Some(source.clone());
                    self.status("Source tag read successfully");
                    self.set_state(SessionState::Idle);
                    return Ok(source);
                }
                Ok(None) => {}
                Err(e) => {
                    // transport trouble: let the same tag be tried again
                    self.report_error(&e);
                    last_seen = None;
                    self.set_state(SessionState::Scanning);
                }
            }

            if self.wait_tick() {
                self.set_state(SessionState::Idle);
                return Err(Error::Stopped);
            }
        }
    }

    fn source_tick(&mut self, last_seen: &mut Option<TagUid>) -> Result<Option<SourceTag>> {
        let Some(mut channel) = self.device.open_channel() else {
            return Ok(None);
        };
        let uid = read_uid(&mut channel).ok_or(Error::NoTag)?;
        if last_seen.as_ref() == Some(&uid) {
            return Ok(None);
        }
        *last_seen = Some(uid.clone());

        self.set_state(SessionState::TagDetected);
        self.status("Tag Detected - Reading...");
        self.callbacks.debug("New tag detected", &format!("UID: {}", uid));
        self.set_state(SessionState::Processing);

        // Failures below keep `last_seen`: the same tag is not read again
        // until a different tag has been seen.
        let policy = RetryPolicy::new(self.config.source_read_attempts, self.config.retry.base_delay);
        let read = policy.run(|attempt| {
            let data = read_memory(&mut channel, ReadExtent::Extended);
            if data.len() > MIN_SOURCE_BYTES {
                Ok(data)
            } else {
                Err(Error::Format(format!(
                    "read attempt {} returned {} bytes",
                    attempt,
                    data.len()
                )))
            }
        });
        let data = match read {
            Ok(data) => data,
            Err(e) => {
                debug!("source tag {} unreadable: {}", uid, e);
                self.callbacks
                    .debug("Error", "Failed to read tag data after multiple attempts");
                self.status("Error: Failed to read tag. Please try again.");
                self.set_state(SessionState::Scanning);
                return Ok(None);
            }
        };
        self.callbacks
            .debug("Source tag", &format!("Read {} bytes", data.len()));
        debug!("source memory:\n{}", format_pages(&data, BASE_PAGE));

        if !ndef::has_complete_ndef_tlv(&data) {
            debug!("source tag {} holds no complete NDEF block", uid);
            self.callbacks.debug("Error", "Invalid tag data format");
            self.status("Error: Invalid tag data format. Please try again.");
            self.set_state(SessionState::Scanning);
            return Ok(None);
        }

        let record = ndef::decode_record(&data).ok();
        let content = record
            .as_ref()
            .and_then(|r| NdefContent::from_record(r).ok());
        match &content {
            Some(c) => self
                .callbacks
                .info(&format!("UID: {}\n\nURL Content:\n{}", uid, c)),
            None => self.callbacks.info(&format!(
                "Source Tag UID: {}\nContent: Raw data ({} bytes)",
                uid,
                data.len()
            )),
        }
        Ok(Some(SourceTag {
            uid,
            data,
            content,
            record,
        }))
    }

    /// Write the captured source record to `quantity` other tags, reading
    /// each one back to confirm it. The record's prefix code and payload
    /// are copied byte for byte.
    ///
    /// The source tag itself is never written: when it is presented the
    /// user is asked for a different tag.
    pub fn copy_to_new_tags(&mut self, quantity: u32, lock: bool) -> Result<BatchReport> {
        self.check_quantity(quantity)?;
        let Some(source) = self.source.clone() else {
            self.status("Error: No source tag data available");
            return Err(Error::NoSourceContent);
        };
        let (Some(content), Some(record)) = (source.content.as_ref(), source.record.as_ref()) else {
            self.status("Error: Could not extract URL from source tag");
            return Err(Error::NoSourceContent);
        };
        let image = ndef::encode_record(record)?;
        self.ensure_device()?;

        let target = content.as_str();
        self.callbacks
            .debug("Copy Operation", &format!("Copying URL: {}", target));
        self.status(&format!(
            "Ready to copy URL: {}\nPlease present first target tag...",
            target
        ));

        let job = WriteJob {
            target,
            image,
            quantity,
            options: self.config.write_options(lock),
            source_uid: Some(&source.uid),
            read_back: true,
        };
        self.run_writes(&job)
    }
}
