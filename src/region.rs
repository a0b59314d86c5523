use super::constants::HEADER_SIZE;
use std::fmt;
use std::mem::size_of;

const FREE: u32 = 1;
const USED: u32 = 0;

/// Bookkeeping stored at the start of every region. Both fields are u32 so
/// the header stays 8 bytes and keeps payloads double word aligned.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionHeader {
    free: u32,
    size: u32,
}

const _: () = assert!(size_of::<RegionHeader>() == HEADER_SIZE);

impl RegionHeader {
    pub fn free(size: usize) -> Self {
        debug_assert!(size.is_power_of_two());
        debug_assert!(size <= u32::MAX as usize);

        Self {
            free: FREE,
            size: size as u32,
        }
    }

    pub fn used(size: usize) -> Self {
        Self {
            free: USED,
            ..Self::free(size)
        }
    }

    pub fn is_free(&self) -> bool {
        self.free == FREE
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn state(&self) -> RegionState {
        if self.is_free() {
            RegionState::Free
        } else {
            RegionState::Used
        }
    }

    // Whether this header could describe a region starting at `offset`.
    // Headers read back from caller supplied pointers go through this.
    pub fn fits(&self, offset: usize, min_chunk: usize, capacity: usize) -> bool {
        let size = self.size();

        (self.free == FREE || self.free == USED)
            && size.is_power_of_two()
            && size >= min_chunk
            && offset < capacity
            && offset % size == 0
            && size <= capacity - offset
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegionState {
    Free,
    Used,
}

/// A read only view of one region, as yielded by [`crate::Arena::regions`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionInfo {
    /// Byte offset of the region's header from the start of the arena.
    pub offset: usize,
    /// Address of the region's header.
    pub address: *const u8,
    /// Size of the region, header included.
    pub size: usize,
    pub state: RegionState,
}

impl RegionInfo {
    pub fn is_free(&self) -> bool {
        self.state == RegionState::Free
    }

    pub fn payload_size(&self) -> usize {
        self.size - HEADER_SIZE
    }
}

impl fmt::Display for RegionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            RegionState::Free => "Free",
            RegionState::Used => "Used",
        };

        write!(f, "{} ({:p}) [ size: {:#010x} ]", state, self.address, self.size)
    }
}
