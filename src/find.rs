use super::heap::{Heap, Pair};

// The smallest free region seen so far that can hold the target.
#[derive(Copy, Clone, Debug)]
struct Candidate {
    offset: usize,
    size: usize,
}

impl Heap {
    /// Finds a free region of exactly `target` bytes, splitting a larger one
    /// if needed. Free buddies walked over are merged along the way.
    ///
    /// Among the smallest regions that fit, the one at the lowest address
    /// is used.
    pub fn find(&mut self, target: usize) -> Option<usize> {
        debug_assert!(target.is_power_of_two());

        let end = self.capacity();

        if target > end {
            return None;
        }

        if self.is_pristine() {
            return Some(self.split(0, target));
        }

        let mut closest: Option<Candidate> = None;
        let mut region = 0;

        while region < end {
            match self.pair_at(region) {
                None => {
                    self.consider(&mut closest, region, target);
                    break;
                }
                Some(Pair::Mergeable) => {
                    self.merge(region);
                    self.consider(&mut closest, region, target);
                    region = self.next(region);
                }
                Some(Pair::Buddies(buddy)) => {
                    self.consider(&mut closest, region, target);
                    self.consider(&mut closest, buddy, target);
                    region = self.next(buddy);
                }
                Some(Pair::Mismatched(buddy)) => {
                    // the buddy becomes the next region and is judged then
                    self.consider(&mut closest, region, target);
                    region = buddy;
                }
            }
        }

        let found = closest?;

        if found.size == target {
            Some(found.offset)
        } else {
            Some(self.split(found.offset, target))
        }
    }

    fn consider(&self, closest: &mut Option<Candidate>, offset: usize, target: usize) {
        let header = self.header(offset);

        if !header.is_free() || header.size() < target {
            return;
        }

        // strict comparison: ties go to the region seen first, the lower address
        if closest.map_or(true, |c| header.size() < c.size) {
            *closest = Some(Candidate {
                offset,
                size: header.size(),
            });
        }
    }
}
