//! Strings stored in arena memory.
//!
//! An [`ArenaString`] is a length plus a fixed capacity buffer pushed into an
//! [`Arena`]. Buffers are NUL-terminated whenever there is room, so they can
//! be handed straight to C APIs.
//!
//! # Examples
//!
//! ```
//! use frog_mem::arena::Arena;
//! use frog_mem::arena_format;
//!
//! let arena = Arena::with_defaults("strings").unwrap();
//! let name = arena_format!(&arena, "swapchain-image-{}", 3).unwrap();
//!
//! assert_eq!(name.as_str(), "swapchain-image-3");
//! assert_eq!(name.capacity(), name.len() + 1);
//! assert_eq!(name.as_bytes_with_nul(), Some(&b"swapchain-image-3\0"[..]));
//! ```

use std::fmt::{self, Write};
use std::ops::Deref;
use std::ptr;
use std::slice;

use crate::arena::{Arena, ArenaError};
use crate::os::VirtualMemory;

/// Formats into a new [`ArenaString`].
///
/// `arena_format!(arena, "fmt", args..)` is shorthand for
/// `ArenaString::format(arena, format_args!("fmt", args..))`.
#[macro_export]
macro_rules! arena_format {
    ($arena:expr, $($arg:tt)*) => {
        $crate::string::ArenaString::format($arena, format_args!($($arg)*))
    };
}

/// A UTF-8 string in arena memory with a fixed capacity.
pub struct ArenaString<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> ArenaString<'a> {
    /// Allocates an empty string with room for `capacity` bytes, terminator
    /// included. The buffer is zeroed.
    ///
    /// # Errors
    ///
    /// Returns the arena's error if the buffer cannot be allocated.
    pub fn with_capacity<M: VirtualMemory>(
        arena: &'a Arena<M>,
        capacity: usize,
    ) -> Result<Self, ArenaError> {
        let ptr = arena.push_array::<u8>(capacity)?;
        // SAFETY: push_array returned `capacity` zeroed bytes that live as
        // long as the arena borrow.
        let buf = unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), capacity) };
        Ok(Self { buf, len: 0 })
    }

    /// Formats `args` into a buffer of exactly `len + 1` bytes.
    ///
    /// The text is formatted completely before anything is pushed, so a
    /// failed call leaves the arena position unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Format`] if a formatting implementation fails,
    /// or the arena's error if the buffer cannot be allocated.
    pub fn format<M: VirtualMemory>(
        arena: &'a Arena<M>,
        args: fmt::Arguments<'_>,
    ) -> Result<Self, ArenaError> {
        let mut text = String::new();
        text.write_fmt(args).map_err(|_| ArenaError::Format)?;

        let len = text.len();
        let capacity = len.checked_add(1).ok_or(ArenaError::Overflow)?;
        let ptr = arena.push_array_no_zero::<u8>(capacity)?;

        // SAFETY: the push returned `capacity` writable bytes; the copy fills
        // [0, len) and the terminator fills the last one.
        let buf = unsafe {
            ptr::copy_nonoverlapping(text.as_ptr(), ptr.as_ptr(), len);
            ptr.as_ptr().add(len).write(0);
            slice::from_raw_parts_mut(ptr.as_ptr(), capacity)
        };
        Ok(Self { buf, len })
    }

    /// Replaces the contents with as much of `src` as fits.
    ///
    /// Keeps one byte for the terminator and never splits a character.
    pub fn copy_from(&mut self, src: &str) {
        let mut n = src.len().min(self.capacity().saturating_sub(1));
        while !src.is_char_boundary(n) {
            n -= 1;
        }

        self.buf[..n].copy_from_slice(&src.as_bytes()[..n]);
        if let Some(nul) = self.buf.get_mut(n) {
            *nul = 0;
        }
        self.len = n;
    }

    /// Copies this string into `arena` with a buffer of `len + 1` bytes.
    ///
    /// # Errors
    ///
    /// Returns the arena's error if the buffer cannot be allocated.
    pub fn clone_in<'b, M: VirtualMemory>(
        &self,
        arena: &'b Arena<M>,
    ) -> Result<ArenaString<'b>, ArenaError> {
        let mut copy = ArenaString::with_capacity(arena, self.len + 1)?;
        copy.copy_from(self.as_str());
        Ok(copy)
    }

    /// Returns the contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: only whole `str` data is ever written below `len`.
        unsafe { std::str::from_utf8_unchecked(&self.buf[..self.len]) }
    }

    /// Returns the contents followed by the NUL terminator, if there is room
    /// for one.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> Option<&[u8]> {
        self.buf.get(..=self.len)
    }

    /// Length in bytes, terminator excluded.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the string is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the buffer, terminator included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl Deref for ArenaString<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ArenaString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ArenaString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for ArenaString<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ArenaString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
