//! Scoped temporary allocation.
//!
//! A [`Scratch`] remembers the arena position when it begins and rolls the
//! arena back to it when dropped, releasing everything allocated in between,
//! across block boundaries included.
//!
//! # Examples
//!
//! ```
//! use frog_mem::arena::Arena;
//!
//! let mut arena = Arena::with_defaults("main").unwrap();
//! let before = arena.pos();
//!
//! {
//!     let scratch = arena.scratch();
//!     let tmp = scratch.alloc_slice_copy(&[0u8; 4096]).unwrap();
//!     assert_eq!(tmp.len(), 4096);
//! }
//!
//! assert_eq!(arena.pos(), before);
//! ```

use std::ops::{Deref, DerefMut};

use crate::arena::{Arena, ArenaPos};
use crate::os::{SystemMemory, VirtualMemory};

/// Guard that rolls its arena back to a saved position on drop.
///
/// Allocations made through the guard borrow it, so they cannot outlive the
/// scope that frees them.
pub struct Scratch<'a, M: VirtualMemory = SystemMemory> {
    arena: &'a mut Arena<M>,
    start: ArenaPos,
}

impl<'a, M: VirtualMemory> Scratch<'a, M> {
    /// Saves the arena's current position.
    pub fn begin(arena: &'a mut Arena<M>) -> Self {
        let start = arena.pos();
        Self { arena, start }
    }

    /// Returns the position the arena returns to when the scope ends.
    #[must_use]
    pub const fn start_pos(&self) -> ArenaPos {
        self.start
    }

    /// Ends the scope now.
    pub fn end(self) {
        drop(self);
    }
}

impl<M: VirtualMemory> Deref for Scratch<'_, M> {
    type Target = Arena<M>;

    fn deref(&self) -> &Arena<M> {
        self.arena
    }
}

impl<M: VirtualMemory> DerefMut for Scratch<'_, M> {
    fn deref_mut(&mut self) -> &mut Arena<M> {
        self.arena
    }
}

impl<M: VirtualMemory> Drop for Scratch<'_, M> {
    fn drop(&mut self) {
        self.arena.pop_to(self.start);
    }
}
