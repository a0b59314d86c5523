use super::config::ArenaConfig;
use super::constants::HEADER_SIZE;
use super::error::{AllocError, ConfigError};
use super::heap::{Heap, RegionIter};
use super::region::{RegionHeader, RegionInfo};
use super::size_class::SizeClass;
use super::stats::ArenaStats;
use std::fmt;
use std::ptr::{self, NonNull};

/// A fixed capacity buddy arena.
///
/// The backing buffer is reserved on [`Arena::init`], or lazily by the first
/// call to [`Arena::alloc`], and released by [`Arena::cleanup`] or on drop.
/// Pointers handed out by an arena are only valid until they are freed or
/// the arena is cleaned up.
pub struct Arena {
    config: ArenaConfig,
    heap: Option<Heap>,
}

impl Arena {
    /// Creates an arena without reserving any memory yet.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self { config, heap: None })
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.heap.is_some()
    }

    /// Reserves the backing buffer as a single free region. Does nothing if
    /// the arena is already initialized.
    pub fn init(&mut self) -> Result<(), AllocError> {
        self.heap_mut().map(|_| ())
    }

    /// Releases the backing buffer. Every pointer obtained from the arena
    /// becomes dangling; the next allocation reserves a fresh buffer.
    pub fn cleanup(&mut self) {
        if self.heap.take().is_some() {
            log::debug!("released arena of {} bytes", self.config.capacity);
        }
    }

    /// Allocates at least `size` bytes, 8 byte aligned.
    ///
    /// Returns `Ok(None)` for a zero sized request, or when no region large
    /// enough can be found even after fully coalescing the arena.
    pub fn alloc(&mut self, size: usize) -> Result<Option<NonNull<u8>>, AllocError> {
        let heap = self.heap_mut()?;

        if size == 0 {
            return Ok(None);
        }

        let class = SizeClass::get_for_size(size, heap.min_chunk())?;

        if class.size() > heap.capacity() {
            log::debug!("request of {} bytes is larger than the arena", size);
            return Ok(None);
        }

        let found = match heap.find(class.size()) {
            Some(offset) => Some(offset),
            None => {
                let passes = heap.coalesce_all();
                log::trace!("coalesced arena in {} passes", passes);

                heap.find(class.size())
            }
        };

        let Some(offset) = found else {
            log::debug!(
                "arena exhausted: no region of {} bytes for a request of {} bytes",
                class.size(),
                size
            );
            return Ok(None);
        };

        heap.set_header(offset, RegionHeader::used(class.size()));

        Ok(Some(heap.payload(offset)))
    }

    /// Returns the region behind `ptr` to the arena. Free buddies are merged
    /// later, when an allocation can't otherwise be satisfied.
    pub fn free(&mut self, ptr: NonNull<u8>) -> Result<(), AllocError> {
        let heap = self.heap_ref_mut(ptr)?;
        let offset = Self::used_region(heap, ptr)?;
        let size = heap.header(offset).size();

        heap.set_header(offset, RegionHeader::free(size));

        Ok(())
    }

    /// Allocates `count * size` bytes with every payload byte set to zero.
    pub fn zero_alloc(
        &mut self,
        count: usize,
        size: usize,
    ) -> Result<Option<NonNull<u8>>, AllocError> {
        let total = count.checked_mul(size).ok_or(AllocError::SizeOverflow)?;
        let Some(ptr) = self.alloc(total)? else {
            return Ok(None);
        };

        let payload = self.usable_size(ptr)?;

        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, payload) };

        Ok(Some(ptr))
    }

    /// Resizes the allocation behind `ptr`, moving it if it doesn't fit in
    /// its current region.
    ///
    /// A `new_size` of 0 frees the allocation and returns `Ok(None)`. When
    /// no larger region is available the original allocation is left
    /// untouched and `Ok(None)` is returned. Allocations are never shrunk in
    /// place.
    pub fn realloc(
        &mut self,
        ptr: NonNull<u8>,
        new_size: usize,
    ) -> Result<Option<NonNull<u8>>, AllocError> {
        let heap = self.heap_ref(ptr)?;
        let offset = Self::used_region(heap, ptr)?;
        let old_size = heap.header(offset).size();
        let min_chunk = heap.min_chunk();

        if new_size == 0 {
            self.free(ptr)?;
            return Ok(None);
        }

        let class = SizeClass::get_for_size(new_size, min_chunk)?;

        if class.size() <= old_size {
            return Ok(Some(ptr));
        }

        let Some(new_ptr) = self.alloc(new_size)? else {
            return Ok(None);
        };

        let count = (old_size - HEADER_SIZE).min(new_size);

        // distinct regions of the same buffer never overlap
        unsafe { ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), count) };

        self.free(ptr)?;

        Ok(Some(new_ptr))
    }

    /// The number of payload bytes available behind a live allocation.
    pub fn usable_size(&self, ptr: NonNull<u8>) -> Result<usize, AllocError> {
        let heap = self.heap_ref(ptr)?;
        let offset = Self::used_region(heap, ptr)?;

        Ok(heap.header(offset).size() - HEADER_SIZE)
    }

    /// Merges free buddies until nothing more can be merged. Allocation does
    /// this on its own when it runs out of space; returns the number of
    /// passes that merged something.
    pub fn defragment(&mut self) -> usize {
        match self.heap.as_mut() {
            Some(heap) => heap.coalesce_all(),
            None => 0,
        }
    }

    /// Walks every region of the arena in ascending address order. Yields
    /// nothing if the arena isn't initialized.
    pub fn regions(&self) -> RegionIter<'_> {
        match self.heap.as_ref() {
            Some(heap) => heap.iter(),
            None => RegionIter::empty(),
        }
    }

    pub fn stats(&self) -> ArenaStats {
        let capacity = self.heap.as_ref().map_or(0, Heap::capacity);

        ArenaStats::from_regions(capacity, self.regions())
    }

    fn heap_mut(&mut self) -> Result<&mut Heap, AllocError> {
        let heap = match self.heap.take() {
            Some(heap) => heap,
            None => {
                let heap = Heap::new(&self.config)?;
                log::debug!(
                    "reserved arena of {} bytes at {:p}",
                    self.config.capacity,
                    heap.start()
                );
                heap
            }
        };

        Ok(self.heap.insert(heap))
    }

    fn heap_ref(&self, ptr: NonNull<u8>) -> Result<&Heap, AllocError> {
        self.heap.as_ref().ok_or(AllocError::InvalidPointer {
            address: ptr.as_ptr() as usize,
        })
    }

    fn heap_ref_mut(&mut self, ptr: NonNull<u8>) -> Result<&mut Heap, AllocError> {
        self.heap.as_mut().ok_or(AllocError::InvalidPointer {
            address: ptr.as_ptr() as usize,
        })
    }

    fn used_region(heap: &Heap, ptr: NonNull<u8>) -> Result<usize, AllocError> {
        let offset = heap.locate(ptr).map_err(|err| {
            log::warn!("rejected pointer {:p}: not allocated by this arena", ptr);
            err
        })?;

        if heap.header(offset).is_free() {
            log::warn!("rejected pointer {:p}: already freed", ptr);

            return Err(AllocError::DoubleFree {
                address: ptr.as_ptr() as usize,
            });
        }

        Ok(offset)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            config: ArenaConfig::default(),
            heap: None,
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl fmt::Display for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_initialized() {
            return writeln!(f, "No memory allocated");
        }

        self.regions()
            .try_for_each(|region: RegionInfo| writeln!(f, "{}", region))
    }
}
