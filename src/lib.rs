//! # bytelog
//!
//! A minimal append-only binary record store:
//! - Length-prefixed framing (8-byte big-endian header per record)
//! - Concurrent appends with linearized positions
//! - Positional reads that never observe partial records
//! - Reopenable: `size` is recovered from the file's on-disk length
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Callers                               │
//! │          (append / read / read_at / close / scan)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Store (Mutex)                           │
//! │          size accounting + open/closed tracking              │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!     ┌─────────────┐               ┌─────────────┐
//!     │  BufWriter  │── flush ─────▶│  File (fd)  │
//!     │  (appends)  │               │   (pread)   │
//!     └─────────────┘               └─────────────┘
//! ```
//!
//! The store is a storage primitive, not a full log service: offset indexes,
//! segment rotation, replication, and any network surface belong to layers
//! built on top of it.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod scan;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::Config;
pub use scan::{Record, Scanner};
pub use store::{Store, LEN_WIDTH};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bytelog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
