use super::constants::{
    DEFAULT_ARENA_SIZE, DEFAULT_MIN_CHUNK_SIZE, MAX_ARENA_SIZE, MIN_CHUNK_FLOOR,
};
use super::error::ConfigError;

/// This structure contains the settings an arena is created with. They are
/// fixed for the lifetime of the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total number of bytes reserved for the arena, headers included.
    /// Must be a power of two, larger than the minimum chunk size, and no
    /// larger than 2^31.
    pub capacity: usize,
    /// The smallest region the arena will carve out, header included. Every
    /// request is rounded up to at least this size. Must be a power of two
    /// of at least 32 bytes (16 bytes of payload plus the header, rounded up).
    pub min_chunk_size: usize,
}

impl ArenaConfig {
    pub fn new(capacity: usize, min_chunk_size: usize) -> Self {
        Self {
            capacity,
            min_chunk_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_chunk_size.is_power_of_two() {
            return Err(ConfigError::MinChunkNotPowerOfTwo(self.min_chunk_size));
        }

        if self.min_chunk_size < MIN_CHUNK_FLOOR {
            return Err(ConfigError::MinChunkTooSmall {
                min_chunk_size: self.min_chunk_size,
                required: MIN_CHUNK_FLOOR,
            });
        }

        if !self.capacity.is_power_of_two() {
            return Err(ConfigError::CapacityNotPowerOfTwo(self.capacity));
        }

        if self.capacity <= self.min_chunk_size {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.capacity,
                min_chunk_size: self.min_chunk_size,
            });
        }

        if self.capacity > MAX_ARENA_SIZE {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.capacity,
                max: MAX_ARENA_SIZE,
            });
        }

        Ok(())
    }
}

impl Default for ArenaConfig {
    /// A 1 MiB arena carved into chunks of at least 32 bytes.
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_SIZE, DEFAULT_MIN_CHUNK_SIZE)
    }
}
