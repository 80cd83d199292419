// nfctag/src/tag/writer.rs
//! NDEF writes with verification and locking.

use log::{debug, info, warn};

use crate::constants::{BASE_PAGE, PAGE_SIZE};
use crate::device::Channel;
use crate::ndef;
use crate::protocol::{paginate, Command, Response};
use crate::tag::reader::read_page;
use crate::types::TagUid;
use crate::utils::{bytes_to_hex_spaced, RetryPolicy};
use crate::{Error, Result};

/// Number of pages re-read after a write unless configured otherwise
pub const DEFAULT_VERIFY_PAGES: u8 = 4;

/// How a write is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteOptions {
    /// Permanently lock the tag after a successful write
    pub lock: bool,
    /// Re-read the first written pages and compare
    pub verify: bool,
    /// Pages re-read when `verify` is set
    pub verify_pages: u8,
    /// Applied to the init command, every page, the verify read and the lock
    pub retry: RetryPolicy,
}

impl WriteOptions {
    /// Default options with `lock` set as given
    pub fn locking(lock: bool) -> Self {
        Self {
            lock,
            ..Self::default()
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            lock: false,
            verify: true,
            verify_pages: DEFAULT_VERIFY_PAGES,
            retry: RetryPolicy::write_path(),
        }
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Tag that was written
    pub uid: TagUid,
    /// Pages written from page 4 on
    pub pages_written: usize,
    /// Read-back verification ran and passed
    pub verified: bool,
    /// The tag is now read-only
    pub locked: bool,
}

/// Send `cmd` under `policy`, turning a bad final status into `on_status`.
fn send_checked<F>(
    channel: &mut Channel,
    cmd: &Command,
    policy: &RetryPolicy,
    on_status: F,
) -> Result<Response>
where
    F: Fn(u8, u8) -> Error,
{
    policy
        .run(|attempt| {
            let resp = channel.execute(cmd)?;
            if resp.is_success() {
                Ok(resp)
            } else {
                debug!(
                    "{} attempt {} answered {:02X} {:02X}",
                    cmd.name(),
                    attempt,
                    resp.sw1,
                    resp.sw2
                );
                Err(on_status(resp.sw1, resp.sw2))
            }
        })
        .map_err(|e| {
            warn!("{} gave up: {}", cmd.name(), e);
            e
        })
}

fn verify_pages(
    channel: &mut Channel,
    pages: &[[u8; PAGE_SIZE]],
    count: u8,
    policy: &RetryPolicy,
) -> Result<()> {
    for (i, expected) in pages.iter().take(count as usize).enumerate() {
        let page = BASE_PAGE + i as u8;
        let actual = policy.run(|_| read_page(channel, page))?;
        if &actual != expected {
            return Err(Error::Verification(format!(
                "page {} reads back {} instead of {}",
                page,
                bytes_to_hex_spaced(&actual),
                bytes_to_hex_spaced(expected)
            )));
        }
    }
    Ok(())
}

/// Write `address` to the tag behind `channel`.
///
/// The address is stored as a single NDEF record from page 4 on. See
/// [`write_image`] for the write sequence.
pub fn write(channel: &mut Channel, address: &str, opts: &WriteOptions) -> Result<WriteReport> {
    let bytes = ndef::encode(address)?;
    let report = write_image(channel, &bytes, opts)?;
    info!("stored {} on tag {}", address, report.uid);
    Ok(report)
}

/// Page an encoded TLV image onto the tag behind `channel`, from page 4 on.
///
/// The tag must answer the identity query first; nothing is written to a tag
/// that is not there. Locking is irreversible and happens only after every
/// page was written (and verified, when enabled).
pub fn write_image(channel: &mut Channel, bytes: &[u8], opts: &WriteOptions) -> Result<WriteReport> {
    let uid = channel.uid().ok_or(Error::NoTag)?;
    let pages = paginate(bytes);
    debug!("writing {} bytes in {} pages to {}", bytes.len(), pages.len(), uid);

    send_checked(channel, &Command::EnableNdef, &opts.retry, |sw1, sw2| {
        Error::NdefInit { sw1, sw2 }
    })?;

    for (i, data) in pages.iter().enumerate() {
        let page = BASE_PAGE + i as u8;
        let cmd = Command::WritePage { page, data: *data };
        send_checked(channel, &cmd, &opts.retry, |sw1, sw2| Error::PageWrite {
            page,
            sw1,
            sw2,
        })?;
    }

    if opts.verify {
        verify_pages(channel, &pages, opts.verify_pages, &opts.retry)?;
    }

    if opts.lock {
        send_checked(channel, &Command::Lock, &opts.retry, |sw1, sw2| Error::Lock {
            sw1,
            sw2,
        })?;
    }

    info!(
        "wrote {} pages to tag {}{}",
        pages.len(),
        uid,
        if opts.lock { " and locked it" } else { "" }
    );
    Ok(WriteReport {
        uid,
        pages_written: pages.len(),
        verified: opts.verify,
        locked: opts.lock,
    })
}
