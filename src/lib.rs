//! A fixed capacity buddy arena allocator.
//!
//! An [`Arena`] reserves a single power of two sized buffer up front and
//! serves every allocation out of it, without going back to the global
//! allocator. The buffer is partitioned into power of two regions, each
//! prefixed by an 8 byte header holding a free flag and the region's size.
//! Requests are rounded up to the smallest region that fits them, larger free
//! regions are split in half until they match, and free buddies are merged
//! back together when the arena runs short.
//! ```rust
//! use buddypit::{Arena, ArenaConfig};
//!
//! let mut arena = Arena::new(ArenaConfig::default()).unwrap();
//! let ptr = arena.alloc(10).unwrap().expect("arena has room");
//!
//! unsafe { ptr.as_ptr().write_bytes(7, 10) };
//!
//! assert_eq!(ptr.as_ptr() as usize % 8, 0);
//! assert_eq!(arena.usable_size(ptr).unwrap(), 24);
//! arena.free(ptr).unwrap();
//! ```
//!
//! Running out of space is not an error: requests that can't be served, and
//! zero sized requests, return `Ok(None)`. Errors are reserved for pointers
//! the arena didn't hand out, double frees, size arithmetic that overflows
//! and failing to reserve the buffer.
//! ```rust
//! use buddypit::{AllocError, Arena, ArenaConfig};
//!
//! let mut arena = Arena::new(ArenaConfig::new(256, 32)).unwrap();
//!
//! assert_eq!(arena.alloc(0), Ok(None));
//! assert_eq!(arena.alloc(1000), Ok(None));
//!
//! let ptr = arena.alloc(100).unwrap().unwrap();
//! arena.free(ptr).unwrap();
//!
//! assert!(matches!(arena.free(ptr), Err(AllocError::DoubleFree { .. })));
//! ```
//!
//! An arena is not thread safe. It can be moved to another thread, but
//! callers sharing one must serialize access to it themselves.
mod arena;
mod buffer;
mod coalesce;
mod config;
mod constants;
mod error;
mod find;
mod heap;
mod region;
mod size_class;
mod split;
mod stats;

pub use arena::Arena;
pub use config::ArenaConfig;
pub use constants::{ALIGNMENT, HEADER_SIZE};
pub use error::{AllocError, ConfigError};
pub use heap::RegionIter;
pub use region::{RegionInfo, RegionState};
pub use stats::ArenaStats;
