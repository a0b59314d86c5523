use thiserror::Error;

/// Reasons an [`crate::ArenaConfig`] is rejected by [`crate::Arena::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("arena capacity {0} is not a power of two")]
    CapacityNotPowerOfTwo(usize),
    #[error("minimum chunk size {0} is not a power of two")]
    MinChunkNotPowerOfTwo(usize),
    #[error("minimum chunk size {min_chunk_size} is below the required {required} bytes")]
    MinChunkTooSmall { min_chunk_size: usize, required: usize },
    #[error("arena capacity {capacity} must be larger than the minimum chunk size {min_chunk_size}")]
    CapacityTooSmall { capacity: usize, min_chunk_size: usize },
    #[error("arena capacity {capacity} exceeds the maximum of {max} bytes")]
    CapacityTooLarge { capacity: usize, max: usize },
}

/// Errors reported by the allocation operations of an [`crate::Arena`].
///
/// Running out of space is not an error: exhausted and zero sized requests
/// return `Ok(None)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("failed to reserve {capacity} bytes for the arena")]
    InitFailed { capacity: usize },
    #[error("requested size overflows the allocator's size arithmetic")]
    SizeOverflow,
    #[error("pointer {address:#x} does not belong to a region of this arena")]
    InvalidPointer { address: usize },
    #[error("pointer {address:#x} was already freed")]
    DoubleFree { address: usize },
}
