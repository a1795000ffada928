//! `frog2d` memory infrastructure
//!
//! This crate provides the engine's low-level allocation primitives:
//!
//! - **Arena**: chained, virtual-memory-backed bump allocator with stack-order
//!   rollback ([`arena`])
//! - **Scratch scopes**: guards that roll an arena back when dropped
//!   ([`scratch`])
//! - **Hash map**: chained map with arena-allocated nodes (requires the
//!   `hash-map` feature)
//! - **Strings**: fixed-capacity, NUL-terminated strings in arena memory
//!   (requires the `strings` feature)
//!
//! The OS layer sits behind the [`os::VirtualMemory`] trait, so tests and
//! tools can run the arena on top of their own reservation backend.

pub mod arena;
#[cfg(feature = "hash-map")]
pub mod hash_map;
pub mod os;
pub mod scratch;
#[cfg(feature = "strings")]
pub mod string;

pub use arena::{Arena, ArenaError, ArenaParams, ArenaPos, HEADER_SIZE};
#[cfg(feature = "hash-map")]
pub use hash_map::ArenaHashMap;
pub use os::{SystemMemory, VirtualMemory};
pub use scratch::Scratch;
#[cfg(feature = "strings")]
pub use string::ArenaString;
