use super::heap::{Heap, Pair};

impl Heap {
    /// One left to right pass merging every free buddy pair it walks over.
    /// A merged region is not revisited in the same pass, so merges cascade
    /// one level per pass. Returns whether anything was merged.
    pub fn coalesce(&mut self) -> bool {
        let end = self.capacity();
        let mut region = 0;
        let mut merges = 0;

        while region < end {
            match self.pair_at(region) {
                None => break,
                Some(Pair::Mergeable) => {
                    self.merge(region);
                    merges += 1;
                    region = self.next(region);
                }
                Some(Pair::Buddies(buddy)) => region = self.next(buddy),
                Some(Pair::Mismatched(buddy)) => region = buddy,
            }
        }

        log::trace!("coalesce pass merged {} buddy pairs", merges);

        merges > 0
    }

    /// Coalesces until a pass merges nothing. Returns the number of passes
    /// that merged something.
    pub fn coalesce_all(&mut self) -> usize {
        let mut passes = 0;

        while self.coalesce() {
            passes += 1;
        }

        passes
    }
}
