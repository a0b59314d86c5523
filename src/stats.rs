use super::region::RegionInfo;

/// A snapshot of how an arena's capacity is divided up.
///
/// Obtained by calling [`crate::Arena::stats`]. Byte counts include region
/// headers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Total bytes reserved for the arena, or 0 when it is not initialized.
    pub capacity: usize,
    pub free_regions: usize,
    pub used_regions: usize,
    pub free_bytes: usize,
    pub used_bytes: usize,
    /// Size of the largest single free region. Larger free spans may still
    /// exist as unmerged buddies.
    pub largest_free: usize,
}

impl ArenaStats {
    pub fn from_regions(capacity: usize, regions: impl Iterator<Item = RegionInfo>) -> Self {
        regions.fold(
            ArenaStats {
                capacity,
                ..Default::default()
            },
            |mut stats, region| {
                if region.is_free() {
                    stats.free_regions += 1;
                    stats.free_bytes += region.size;
                    stats.largest_free = stats.largest_free.max(region.size);
                } else {
                    stats.used_regions += 1;
                    stats.used_bytes += region.size;
                }

                stats
            },
        )
    }

    pub fn regions(&self) -> usize {
        self.free_regions + self.used_regions
    }
}
