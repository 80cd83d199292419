// nfctag/src/session/batch.rs
//! Batch writing of one address to many tags.

use log::info;

use crate::address::{addresses_equivalent, normalize};
use crate::ndef;
use crate::session::{Outcome, SessionState, TagSession};
use crate::tag::{self, read_tag, read_uid, WriteOptions, WriteReport};
use crate::types::{ReadExtent, TagUid};
use crate::{Error, Result};

/// Result of a batch write or copy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Tags written and, for copies, read back successfully
    pub written: u32,
    /// Tags requested
    pub quantity: u32,
    /// Why the loop ended
    pub outcome: Outcome,
}

impl BatchReport {
    /// True if every requested tag was written
    pub fn is_complete(&self) -> bool {
        self.written == self.quantity
    }
}

/// What one iteration of a write loop did.
pub(crate) enum WriteTick {
    /// No tag, or the tag already handled
    Idle,
    /// The guarded source tag is on the reader
    Source,
    Wrote(WriteReport),
}

/// Parameters of one write loop.
pub(crate) struct WriteJob<'a> {
    /// Resolved address, shown to the user and compared on read-back
    pub target: &'a str,
    /// TLV image paged onto every tag
    pub image: Vec<u8>,
    pub quantity: u32,
    pub options: WriteOptions,
    /// Never written; the user is asked for another tag
    pub source_uid: Option<&'a TagUid>,
    /// Read every written tag back and compare the decoded address
    pub read_back: bool,
}

impl TagSession {
    /// Write `address` to `quantity` distinct tags.
    ///
    /// The address is normalized first and rejected if invalid. A tag is
    /// written at most once while it stays on the reader. A failed tag is
    /// reported and the loop waits for the next one.
    pub fn batch_write(&mut self, address: &str, quantity: u32, lock: bool) -> Result<BatchReport> {
        self.check_quantity(quantity)?;
        let (valid, address) = normalize(address);
        if !valid {
            self.status("Error: The URL format appears to be invalid");
            return Err(Error::InvalidAddress(address));
        }
        let image = match ndef::encode(&address) {
            Ok(image) => image,
            Err(e) => {
                self.status(&format!("Error: {}", e));
                return Err(e);
            }
        };
        self.ensure_device()?;
        self.history.push(&address);

        let job = WriteJob {
            target: &address,
            image,
            quantity,
            options: self.config.write_options(lock),
            source_uid: None,
            read_back: false,
        };
        self.status("Ready - Please present first tag...");
        self.run_writes(&job)
    }

    pub(crate) fn run_writes(&mut self, job: &WriteJob<'_>) -> Result<BatchReport> {
        self.set_state(SessionState::Scanning);
        self.callbacks.progress(0, job.quantity);

        let mut written = 0;
        let mut last_seen: Option<TagUid> = None;
        let outcome = loop {
            if written >= job.quantity {
                break Outcome::Completed;
            }
            if self.is_stopped() {
                break Outcome::Stopped;
            }

            match self.write_tick(job, &mut last_seen) {
                Ok(WriteTick::Wrote(report)) => {
                    written += 1;
                    info!("tag {} written ({}/{})", report.uid, written, job.quantity);
                    self.callbacks.progress(written, job.quantity);
                    if written == job.quantity {
                        self.status(&format!("Successfully wrote {} tags", job.quantity));
                    } else {
                        self.status(&format!(
                            "Wrote tag {}/{}. Please present next tag.",
                            written, job.quantity
                        ));
                    }
                }
                Ok(WriteTick::Source) => {
                    self.status("Source tag detected - Please use a different tag");
                    if self.pause(self.config.source_reject_pause) {
                        break Outcome::Stopped;
                    }
                }
                Ok(WriteTick::Idle) => {}
                Err(e) => {
                    // removal mid-write: let the same tag be tried again
                    if e.is_disconnect() {
                        last_seen = None;
                    }
                    self.report_error(&e);
                    self.set_state(SessionState::Scanning);
                }
            }

            if written < job.quantity && self.wait_tick() {
                break Outcome::Stopped;
            }
        };

        self.finish(outcome);
        Ok(BatchReport {
            written,
            quantity: job.quantity,
            outcome,
        })
    }

    fn write_tick(&mut self, job: &WriteJob<'_>, last_seen: &mut Option<TagUid>) -> Result<WriteTick> {
        let Some(mut channel) = self.device.open_channel() else {
            return Ok(WriteTick::Idle);
        };
        let uid = read_uid(&mut channel).ok_or(Error::NoTag)?;
        if job.source_uid == Some(&uid) {
            return Ok(WriteTick::Source);
        }
        if last_seen.as_ref() == Some(&uid) {
            return Ok(WriteTick::Idle);
        }
        *last_seen = Some(uid.clone());

        self.set_state(SessionState::TagDetected);
        self.status(&format!("Writing to tag {}...", uid));
        self.set_state(SessionState::Processing);

        let report = tag::write_image(&mut channel, &job.image, &job.options)?;
        info!("stored {} on tag {}", job.target, report.uid);
        if job.read_back {
            let stored = read_tag(&mut channel, ReadExtent::Extended)
                .and_then(|m| ndef::decode(&m.data));
            match stored {
                Some(content) if addresses_equivalent(content.as_str(), job.target) => {}
                Some(content) => {
                    return Err(Error::Verification(format!(
                        "tag holds {} instead of {}",
                        content, job.target
                    )))
                }
                None => {
                    return Err(Error::Verification("tag write was incomplete".into()));
                }
            }
        }
        self.set_state(SessionState::Scanning);
        Ok(WriteTick::Wrote(report))
    }
}
