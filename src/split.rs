use super::heap::Heap;
use super::region::RegionHeader;

impl Heap {
    /// Halves the free region at `offset` until it is `target` bytes,
    /// leaving a free buddy behind at every level. Returns `offset`, which
    /// stays free.
    pub fn split(&mut self, offset: usize, target: usize) -> usize {
        let mut size = self.header(offset).size();

        debug_assert!(self.header(offset).is_free());
        debug_assert!(target.is_power_of_two() && target >= self.min_chunk());
        debug_assert!(size >= target);

        let original = size;
        let mut halvings = 0;

        while size > target {
            size /= 2;
            self.set_header(offset, RegionHeader::free(size));
            self.set_header(offset + size, RegionHeader::free(size));
            halvings += 1;
        }

        log::trace!(
            "split region {:#x} from {} to {} bytes in {} halvings",
            offset,
            original,
            target,
            halvings
        );

        offset
    }
}

#[cfg(test)]
mod tests {
    use crate::heap::tests::{assert_partitioned, layout, test_heap};
    use crate::region::RegionState::{Free, Used};
    use crate::region::RegionHeader;

    #[test]
    fn split_root_down_to_min_chunk() {
        let mut heap = test_heap(1 << 20, 32);
        let got = heap.split(0, 32);

        assert_eq!(got, 0);
        assert_partitioned(&heap);

        let sizes: Vec<usize> = heap.iter().map(|r| r.size).collect();
        let mut expect = vec![32];
        expect.extend((5..20).map(|shift| 1usize << shift));

        // 15 halvings leave the leaf plus one buddy per level
        assert_eq!(sizes.len(), 16);
        assert_eq!(sizes, expect);
        assert!(heap.iter().all(|r| r.is_free()));
    }

    #[test]
    fn split_to_same_size_is_a_no_op() {
        let mut heap = test_heap(256, 32);
        heap.set_header(0, RegionHeader::free(128));
        heap.set_header(128, RegionHeader::used(128));

        assert_eq!(heap.split(0, 128), 0);
        assert_eq!(layout(&heap), vec![(128, Free), (128, Used)]);
    }

    #[test]
    fn split_leaves_neighbours_alone() {
        let mut heap = test_heap(512, 32);
        heap.set_header(0, RegionHeader::used(256));
        heap.set_header(256, RegionHeader::free(256));

        assert_eq!(heap.split(256, 64), 256);
        assert_eq!(
            layout(&heap),
            vec![(256, Used), (64, Free), (64, Free), (128, Free)]
        );
        assert_partitioned(&heap);
    }
}
