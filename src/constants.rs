pub const HEADER_SIZE: usize = 8;

// Payloads start HEADER_SIZE bytes into a region, and regions start on
// multiples of the minimum chunk size.
pub const ALIGNMENT: usize = 8;

// Smallest payload a minimum sized chunk must be able to hold.
pub const MIN_PAYLOAD: usize = 16;
pub const MIN_CHUNK_FLOOR: usize = MIN_PAYLOAD + HEADER_SIZE;

// Region sizes are stored as u32 in the header.
pub const MAX_ARENA_SIZE: usize = 1 << 31;

pub const DEFAULT_ARENA_SIZE: usize = 0x100000;
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 0x20;
