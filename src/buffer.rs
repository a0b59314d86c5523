use super::error::AllocError;
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

/// The backing reservation of an arena. Zero filled on creation so every
/// byte of it is initialized before a header is ever read out of it.
pub struct Buffer {
    ptr: NonNull<u8>,
    layout: Layout,
}

// The buffer is uniquely owned and never shared between arenas.
unsafe impl Send for Buffer {}

impl Buffer {
    pub fn new(size: usize, align: usize) -> Result<Buffer, AllocError> {
        let layout = Layout::from_size_align(size, align)
            .map_err(|_| AllocError::InitFailed { capacity: size })?;

        Ok(Buffer {
            ptr: Self::alloc_buffer(layout)?,
            layout,
        })
    }

    pub fn at_offset(&self, offset: usize) -> *mut u8 {
        debug_assert!(offset < self.layout.size());

        unsafe { self.ptr.as_ptr().add(offset) }
    }

    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn get_size(&self) -> usize {
        self.layout.size()
    }

    pub fn contains(&self, addr: usize) -> bool {
        let start = self.ptr.as_ptr() as usize;

        start <= addr && addr < start + self.layout.size()
    }

    fn alloc_buffer(layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Err(AllocError::InitFailed { capacity: 0 });
        }

        let ptr = unsafe { alloc_zeroed(layout) };

        NonNull::new(ptr).ok_or(AllocError::InitFailed {
            capacity: layout.size(),
        })
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) }
    }
}
