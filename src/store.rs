//! Record Store
//!
//! The append-only, length-prefixed log file at the heart of bytelog.
//!
//! ## Responsibilities
//! - Append opaque byte payloads with a recoverable length header
//! - Return each record's byte position for an external index to keep
//! - Positional reads that never observe a partial record
//! - Recover `size` from the file length when reopening an existing log
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Record 1                                │
//! │ ┌──────────────────────┬──────────────┐ │
//! │ │ Length L (8, BE u64) │ Payload (L)  │ │
//! │ └──────────────────────┴──────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Record 2                                │
//! │ ┌──────────────────────┬──────────────┐ │
//! │ │ Length L (8, BE u64) │ Payload (L)  │ │
//! │ └──────────────────────┴──────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! No file header, no checksum, no record separator: position 0 is the first
//! record's header and end-of-file is the implicit end of the log.
//!
//! ## Concurrency Model
//!
//! A single `Mutex` serializes every operation, so appends from different
//! threads are linearized: each observes a unique, monotonically increasing
//! position, and no read can see a half-written header. There is no
//! reader/writer distinction and no background activity; the store is a
//! passive object invoked by caller threads.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::os::unix::fs::FileExt;
use std::path::Path;

use bytes::{Bytes, BytesMut};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::scan::Scanner;

/// Width in bytes of the length header framing every record
pub const LEN_WIDTH: usize = 8;

/// The append-only record store
///
/// All methods take `&self`; a single internal lock serializes operations, so
/// a `Store` can be shared across threads (e.g. behind an `Arc`). Two states:
/// **Open** (accepting operations) and **Closed** (every operation fails with
/// [`StoreError::Closed`]). The transition is one-way, via [`Store::close`].
pub struct Store {
    inner: Mutex<Inner>,
}

/// Lock-protected store state
struct Inner {
    /// Logical end-of-data offset: the next append's position. Counts
    /// buffered-but-unflushed bytes, so it can run ahead of the on-disk
    /// length between flushes.
    size: u64,

    /// File handles; `None` once the store is closed.
    active: Option<Active>,
}

/// The open file handles, dropped on close
struct Active {
    /// Write-buffered handle, positioned at end-of-file. Every append goes
    /// through this buffer.
    writer: std::io::BufWriter<File>,

    /// Cloned handle for positional reads (`pread`); never moves the writer's
    /// offset.
    reader: File,
}

impl Inner {
    fn active_mut(&mut self) -> Result<&mut Active> {
        self.active.as_mut().ok_or(StoreError::Closed)
    }
}

impl Store {
    /// Create a store over an already-open file handle.
    ///
    /// Stats the file to recover `size` from its current length, so a store
    /// may be reopened against an existing log and resume appending at the
    /// correct offset. The handle must be open for both reading and writing.
    pub fn new(file: File) -> Result<Self> {
        Self::with_config(file, Config::default())
    }

    /// Create a store over a file handle with an explicit config.
    pub fn with_config(mut file: File, config: Config) -> Result<Self> {
        let size = file.metadata()?.len();

        // Clone the handle for pread-style reads, then park the write side at
        // the end of the file so appends extend the log rather than overwrite
        // it when reopening.
        let reader = file.try_clone()?;
        file.seek(SeekFrom::End(0))?;
        let writer = std::io::BufWriter::with_capacity(config.buffer_capacity, file);

        debug!(size, "opened record store");

        Ok(Self {
            inner: Mutex::new(Inner {
                size,
                active: Some(Active { writer, reader }),
            }),
        })
    }

    /// Open (or create) a store at the given path.
    ///
    /// Convenience wrapper: opens the file read+write, creating it if it does
    /// not exist, then delegates to [`Store::new`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)?;
        Self::new(file)
    }

    /// Append a payload to the log.
    ///
    /// Writes an 8-byte big-endian length header followed by the payload,
    /// both through the write buffer (not necessarily flushed to the file
    /// yet). Returns `(record_size, position)`:
    /// - `record_size`: header plus payload, the amount `size` grew by
    /// - `position`: the byte offset of this record's header, the handle an
    ///   external index should keep to retrieve the record later
    ///
    /// On any write error `size` is left unmodified, so a failed append can
    /// never be mistaken for success. The tail of the file may still hold a
    /// partially written record; recovery strategy belongs to the caller.
    pub fn append(&self, payload: &[u8]) -> Result<(u64, u64)> {
        let mut inner = self.inner.lock();
        let position = inner.size;

        let active = inner.active_mut()?;
        active.writer.write_all(&(payload.len() as u64).to_be_bytes())?;
        active.writer.write_all(payload)?;

        let record_size = (LEN_WIDTH + payload.len()) as u64;
        inner.size = position + record_size;

        trace!(position, record_size, "appended record");
        Ok((record_size, position))
    }

    /// Read the record whose header starts at `position`.
    ///
    /// Flushes the write buffer first, so a record appended on this store is
    /// always visible to a subsequent read without an intervening close. Then
    /// reads the 8-byte header, decodes the payload length, and reads exactly
    /// that many bytes.
    ///
    /// Returns [`StoreError::Corruption`] when the header or payload would
    /// run past the end of the log: either the file was truncated mid-record
    /// or `position` does not point at a record boundary. The store keeps no
    /// index and trusts its caller for boundary validity.
    pub fn read(&self, position: u64) -> Result<Bytes> {
        let mut inner = self.inner.lock();
        let size = inner.size;
        let active = inner.active_mut()?;
        active.writer.flush()?;

        // checked_add: a garbage position near u64::MAX must report
        // corruption, not overflow.
        let payload_start = match position.checked_add(LEN_WIDTH as u64) {
            Some(start) if start <= size => start,
            _ => {
                return Err(StoreError::Corruption(format!(
                    "no record header at position {position} (log size {size})"
                )));
            }
        };

        let mut header = [0u8; LEN_WIDTH];
        active.reader.read_exact_at(&mut header, position)?;
        let len = u64::from_be_bytes(header);

        if len > size - payload_start {
            return Err(StoreError::Corruption(format!(
                "record at position {position} claims {len} bytes past end of log (size {size})"
            )));
        }

        let mut payload = BytesMut::zeroed(len as usize);
        active.reader.read_exact_at(&mut payload, payload_start)?;

        trace!(position, len, "read record");
        Ok(payload.freeze())
    }

    /// Raw positional read into a caller-supplied buffer.
    ///
    /// Flushes the write buffer, then reads at `offset` without interpreting
    /// the length-header framing. Returns the number of bytes actually read,
    /// which is short of `buf.len()` only at end-of-file (pread semantics).
    /// This is the primitive [`Store::read`] is built on, exposed for bulk
    /// range readers that do their own framing.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> Result<usize> {
        let mut inner = self.inner.lock();
        let active = inner.active_mut()?;
        active.writer.flush()?;

        let mut total = 0;
        while total < buf.len() {
            match active.reader.read_at(&mut buf[total..], offset + total as u64) {
                Ok(0) => break, // end of file
                Ok(n) => total += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(total)
    }

    /// Flush buffered appends and close the store.
    ///
    /// On success the file handles are released and every later operation
    /// (including a second `close`) fails with [`StoreError::Closed`]. If the
    /// flush itself fails the store stays open and the error is returned, so
    /// the caller may retry. A process that exits without closing loses at
    /// most the bytes still resident in the write buffer.
    ///
    /// The handle is released by dropping it, so an error from the operating
    /// system's own close is not observable; the flush is the error channel
    /// for this method. Callers needing physical-media durability should keep
    /// their own cloned handle and `sync_all` it after closing; the store
    /// itself guarantees flush-level visibility only.
    pub fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        let mut active = inner.active.take().ok_or(StoreError::Closed)?;

        if let Err(e) = active.writer.flush() {
            // Flush failed: keep the store open so the caller can retry.
            inner.active = Some(active);
            return Err(e.into());
        }

        debug!(size = inner.size, "closed record store");
        Ok(())
    }

    /// Sequentially iterate records from position 0.
    ///
    /// See [`Scanner`] for iteration semantics.
    pub fn scan(&self) -> Scanner<'_> {
        Scanner::new(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current log size in bytes: the position the next append will occupy.
    pub fn size(&self) -> u64 {
        self.inner.lock().size
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Store")
            .field("size", &inner.size)
            .field("open", &inner.active.is_some())
            .finish()
    }
}
