use super::constants::HEADER_SIZE;
use super::error::AllocError;

/// The power of two bucket a request is served from, header included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SizeClass(usize);

impl SizeClass {
    pub fn get_for_size(request: usize, min_chunk: usize) -> Result<SizeClass, AllocError> {
        debug_assert!(min_chunk.is_power_of_two());

        let needed = request
            .checked_add(HEADER_SIZE)
            .ok_or(AllocError::SizeOverflow)?;
        let size = needed
            .checked_next_power_of_two()
            .ok_or(AllocError::SizeOverflow)?;

        Ok(SizeClass(size.max(min_chunk)))
    }

    pub fn size(&self) -> usize {
        self.0
    }
}
