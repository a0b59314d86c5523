use super::buffer::Buffer;
use super::config::ArenaConfig;
use super::constants::HEADER_SIZE;
use super::error::AllocError;
use super::region::{RegionHeader, RegionInfo};
use std::ptr::{self, NonNull};

/// An initialized arena: the reserved buffer, partitioned into regions.
///
/// Regions are addressed by their byte offset from the start of the buffer.
/// Every region's offset is a multiple of its size, and the regions tile
/// the whole buffer.
pub struct Heap {
    buffer: Buffer,
    min_chunk: usize,
}

/// What the scan cursor sees at a region and the region that follows it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pair {
    /// Both free, equal sized, and buddies by alignment.
    Mergeable,
    /// Equal sized buddies, at least one of them used.
    Buddies(usize),
    /// The next region is not this region's buddy, usually because one of
    /// the two has been split further.
    Mismatched(usize),
}

impl Heap {
    pub fn new(config: &ArenaConfig) -> Result<Heap, AllocError> {
        let buffer = Buffer::new(config.capacity, config.min_chunk_size)?;
        let mut heap = Heap {
            buffer,
            min_chunk: config.min_chunk_size,
        };

        heap.set_header(0, RegionHeader::free(config.capacity));

        Ok(heap)
    }

    pub fn capacity(&self) -> usize {
        self.buffer.get_size()
    }

    pub fn min_chunk(&self) -> usize {
        self.min_chunk
    }

    pub fn start(&self) -> *mut u8 {
        self.buffer.as_ptr()
    }

    pub fn header(&self, offset: usize) -> RegionHeader {
        debug_assert!(offset % self.min_chunk == 0);

        // offsets are multiples of the min chunk and the buffer is aligned
        // to it, so the read is aligned and within the zeroed buffer
        unsafe { ptr::read(self.buffer.at_offset(offset).cast::<RegionHeader>()) }
    }

    pub fn set_header(&mut self, offset: usize, header: RegionHeader) {
        debug_assert!(offset % self.min_chunk == 0);

        unsafe { ptr::write(self.buffer.at_offset(offset).cast::<RegionHeader>(), header) }
    }

    pub fn next(&self, offset: usize) -> usize {
        offset + self.header(offset).size()
    }

    // A single free region spanning the whole arena.
    pub fn is_pristine(&self) -> bool {
        let header = self.header(0);

        header.is_free() && header.size() == self.capacity()
    }

    pub fn pair_at(&self, region: usize) -> Option<Pair> {
        let buddy = self.next(region);

        if buddy >= self.capacity() {
            return None;
        }

        let left = self.header(region);
        let right = self.header(buddy);

        if left.size() != right.size() || region % (left.size() * 2) != 0 {
            return Some(Pair::Mismatched(buddy));
        }

        if left.is_free() && right.is_free() {
            Some(Pair::Mergeable)
        } else {
            Some(Pair::Buddies(buddy))
        }
    }

    // Merges the region at `offset` with its buddy. The buddy's header is
    // left in place and becomes part of the merged region's payload.
    pub fn merge(&mut self, offset: usize) {
        let size = self.header(offset).size() * 2;

        debug_assert!(offset % size == 0);

        self.set_header(offset, RegionHeader::free(size));
    }

    pub fn payload(&self, offset: usize) -> NonNull<u8> {
        let ptr = self.buffer.at_offset(offset + HEADER_SIZE);

        // buffer pointers are never null
        unsafe { NonNull::new_unchecked(ptr) }
    }

    /// Recovers the offset of the region whose payload starts at `ptr`.
    ///
    /// The pointer must land one header past a min chunk boundary inside the
    /// arena, and the header found there must describe a plausible region.
    pub fn locate(&self, ptr: NonNull<u8>) -> Result<usize, AllocError> {
        let address = ptr.as_ptr() as usize;
        let invalid = AllocError::InvalidPointer { address };
        let header_address = address.checked_sub(HEADER_SIZE).ok_or(invalid)?;

        if !self.buffer.contains(header_address) {
            return Err(invalid);
        }

        let offset = header_address - self.start() as usize;

        if offset % self.min_chunk != 0 {
            return Err(invalid);
        }

        if !self.header(offset).fits(offset, self.min_chunk, self.capacity()) {
            return Err(invalid);
        }

        Ok(offset)
    }

    pub fn info(&self, offset: usize) -> RegionInfo {
        let header = self.header(offset);

        RegionInfo {
            offset,
            address: self.buffer.at_offset(offset),
            size: header.size(),
            state: header.state(),
        }
    }

    pub fn iter(&self) -> RegionIter<'_> {
        RegionIter {
            heap: Some(self),
            offset: 0,
        }
    }
}

/// Walks the regions of an arena in ascending address order.
pub struct RegionIter<'a> {
    heap: Option<&'a Heap>,
    offset: usize,
}

impl<'a> RegionIter<'a> {
    pub fn empty() -> Self {
        Self {
            heap: None,
            offset: 0,
        }
    }
}

impl<'a> Iterator for RegionIter<'a> {
    type Item = RegionInfo;

    fn next(&mut self) -> Option<RegionInfo> {
        let heap = self.heap?;

        if self.offset >= heap.capacity() {
            return None;
        }

        let info = heap.info(self.offset);
        self.offset += info.size;

        Some(info)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::region::RegionState;

    pub fn test_heap(capacity: usize, min_chunk: usize) -> Heap {
        Heap::new(&ArenaConfig::new(capacity, min_chunk)).unwrap()
    }

    pub fn layout(heap: &Heap) -> Vec<(usize, RegionState)> {
        heap.iter().map(|r| (r.size, r.state)).collect()
    }

    // Regions tile the arena, are powers of two no smaller than the min
    // chunk, and sit on offsets that are multiples of their size.
    pub fn assert_partitioned(heap: &Heap) {
        let mut expected_offset = 0;

        for region in heap.iter() {
            assert_eq!(region.offset, expected_offset);
            assert!(region.size.is_power_of_two());
            assert!(region.size >= heap.min_chunk());
            assert_eq!(region.offset % region.size, 0);

            expected_offset += region.size;
        }

        assert_eq!(expected_offset, heap.capacity());
    }

    #[test]
    fn new_heap_is_one_free_region() {
        let heap = test_heap(1024, 32);

        assert!(heap.is_pristine());
        assert_eq!(layout(&heap), vec![(1024, RegionState::Free)]);
        assert_partitioned(&heap);
    }

    #[test]
    fn pair_at_classifies_neighbours() {
        let mut heap = test_heap(256, 32);

        heap.set_header(0, RegionHeader::free(64));
        heap.set_header(64, RegionHeader::free(64));
        heap.set_header(128, RegionHeader::used(32));
        heap.set_header(160, RegionHeader::free(32));
        heap.set_header(192, RegionHeader::free(64));
        assert_partitioned(&heap);

        assert_eq!(heap.pair_at(0), Some(Pair::Mergeable));
        assert_eq!(heap.pair_at(64), Some(Pair::Mismatched(128)));
        assert_eq!(heap.pair_at(128), Some(Pair::Buddies(160)));
        assert_eq!(heap.pair_at(160), Some(Pair::Mismatched(192)));
        assert_eq!(heap.pair_at(192), None);
    }

    #[test]
    fn equal_neighbours_off_alignment_are_not_buddies() {
        let mut heap = test_heap(256, 32);

        heap.set_header(0, RegionHeader::used(32));
        heap.set_header(32, RegionHeader::free(32));
        heap.set_header(64, RegionHeader::free(32));
        heap.set_header(96, RegionHeader::free(32));
        heap.set_header(128, RegionHeader::free(128));

        assert_eq!(heap.pair_at(32), Some(Pair::Mismatched(64)));
        assert_eq!(heap.pair_at(64), Some(Pair::Mergeable));
    }

    #[test]
    fn locate_accepts_payload_pointers() {
        let mut heap = test_heap(1024, 32);

        heap.set_header(0, RegionHeader::used(512));
        heap.set_header(512, RegionHeader::free(512));

        assert_eq!(heap.locate(heap.payload(0)), Ok(0));
        assert_eq!(heap.locate(heap.payload(512)), Ok(512));
    }

    #[test]
    fn locate_rejects_foreign_and_interior_pointers() {
        let heap = test_heap(1024, 32);
        let mut outside = 0u64;
        let foreign = NonNull::from(&mut outside).cast::<u8>();
        let interior = unsafe { NonNull::new_unchecked(heap.payload(0).as_ptr().add(1)) };
        // a min chunk boundary that is not the start of any region
        let stale = heap.payload(32);

        assert!(matches!(
            heap.locate(foreign),
            Err(AllocError::InvalidPointer { .. })
        ));
        assert!(matches!(
            heap.locate(interior),
            Err(AllocError::InvalidPointer { .. })
        ));
        assert!(matches!(
            heap.locate(stale),
            Err(AllocError::InvalidPointer { .. })
        ));
    }

    #[test]
    fn iter_reports_addresses() {
        let mut heap = test_heap(128, 32);

        heap.set_header(0, RegionHeader::used(64));
        heap.set_header(64, RegionHeader::free(64));

        let regions: Vec<RegionInfo> = heap.iter().collect();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].address, heap.start() as *const u8);
        assert_eq!(regions[1].address as usize, heap.start() as usize + 64);
        assert!(!regions[0].is_free());
        assert!(regions[1].is_free());
        assert_eq!(RegionIter::empty().count(), 0);
    }
}
