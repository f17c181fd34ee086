//! Sequential record scanning
//!
//! Iterates a store's records from position 0 in append order. This is the
//! path an external component uses to rebuild its offset index after a
//! restart: walk every record, noting each one's position.

use bytes::Bytes;

use crate::error::Result;
use crate::store::{Store, LEN_WIDTH};

/// A record yielded by a [`Scanner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Byte offset of this record's header within the log
    pub position: u64,

    /// The record payload (header stripped)
    pub payload: Bytes,
}

/// Iterator over a store's records, in log order.
///
/// Each step re-reads the store's current size, so records appended while a
/// scan is in progress may or may not be observed; the scan is not a
/// snapshot. The first error (e.g. [`crate::StoreError::Corruption`] from a
/// truncated tail) ends the iteration.
pub struct Scanner<'a> {
    store: &'a Store,
    position: u64,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Self {
            store,
            position: 0,
            done: false,
        }
    }

    /// The position the next yielded record will start at.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.position >= self.store.size() {
            return None;
        }

        match self.store.read(self.position) {
            Ok(payload) => {
                let record = Record {
                    position: self.position,
                    payload,
                };
                self.position += (LEN_WIDTH + record.payload.len()) as u64;
                Some(Ok(record))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("position", &self.position)
            .field("done", &self.done)
            .finish()
    }
}
