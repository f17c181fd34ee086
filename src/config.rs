//! Configuration for bytelog
//!
//! Centralized configuration with sensible defaults.

/// Default write-buffer capacity (8 KiB, matching `BufWriter`'s default)
const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Configuration for a store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Write Buffer Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the write buffer in bytes. Appends go through this buffer;
    /// reads flush it first, so a larger buffer trades read-side flush cost
    /// for fewer file writes on the append path.
    pub buffer_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the write-buffer capacity (in bytes)
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.config.buffer_capacity = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
