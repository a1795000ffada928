//! Virtual-memory-backed arena allocator.
//!
//! An [`Arena`] hands out memory by bumping a cursor through address space
//! it has reserved from the OS. Pages are committed lazily as the cursor
//! moves, and when a reservation is exhausted the arena chains a new block
//! onto the old one. Memory is freed in stack order only: save a position
//! with [`Arena::pos`], allocate, then roll back with [`Arena::pop_to`].
//!
//! # Architecture
//!
//! - [`Arena`]: owns the block chain and the logical position
//! - `Block`: one OS reservation, with its own bump cursor and commit mark
//! - [`VirtualMemory`]: reserve / commit / release capability beneath it
//!
//! # Position space
//!
//! Blocks are laid out back to back in a single logical position space even
//! though their address ranges are disjoint. Block `N` starts at the sum of
//! the reservations of blocks `0..N`. Every block keeps a [`HEADER_SIZE`]
//! prefix that is never handed out, so a fresh arena reports
//! `pos() == HEADER_SIZE`.
//!
//! ```text
//! logical pos: 0        128                  R0       R0+128           R0+R1
//!              |header  | block 0 data ...   |header  | block 1 ...    |
//! ```
//!
//! # Borrowing
//!
//! Push operations take `&self` and return memory that stays valid until
//! the arena is rolled back past it or dropped. Rollback takes `&mut self`,
//! so safe references handed out by [`Arena::alloc`] and friends prevent
//! rollback for as long as they live.
//!
//! # Examples
//!
//! ```
//! use frog_mem::arena::{Arena, ArenaParams, HEADER_SIZE};
//!
//! let mut arena = Arena::new("frame", ArenaParams::default()).unwrap();
//! assert_eq!(arena.pos().get(), HEADER_SIZE);
//!
//! let mark = arena.pos();
//! let value = arena.alloc(42u64).unwrap();
//! assert_eq!(*value, 42);
//!
//! arena.pop_to(mark);
//! assert_eq!(arena.pos(), mark);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::iter;
use std::mem;
use std::ptr::{self, NonNull};

use frog_log::{debug, trace, warn};

use crate::os::{SystemMemory, VirtualMemory};
use crate::scratch::Scratch;

/// Bytes at the front of every block that are never handed out.
pub const HEADER_SIZE: usize = 128;

/// Minimum alignment used by the typed helpers.
pub const MIN_ALIGNMENT: usize = 8;

/// Errors returned by arena operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// The OS refused to reserve address space.
    Reserve {
        /// Bytes of address space requested.
        size: usize,
    },
    /// The OS refused to back reserved pages with memory.
    Commit {
        /// Bytes that failed to commit.
        size: usize,
    },
    /// Alignment was zero or not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// The requested size overflows the address space.
    Overflow,
    /// A formatting trait implementation returned an error.
    Format,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserve { size } => {
                write!(f, "failed to reserve {size} bytes of address space")
            }
            Self::Commit { size } => {
                write!(f, "failed to commit {size} bytes of reserved memory")
            }
            Self::InvalidAlignment { align } => {
                write!(f, "invalid alignment {align}: must be a power of two")
            }
            Self::Overflow => write!(f, "allocation size overflows the address space"),
            Self::Format => write!(f, "formatting into arena memory failed"),
        }
    }
}

impl std::error::Error for ArenaError {}

/// Sizing parameters for an arena.
///
/// Both sizes are rounded up to the page size when the arena is created.
/// `reserve_size` is the address space claimed per block, `commit_size` the
/// granularity at which pages are made accessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaParams {
    /// Address space reserved per block.
    pub reserve_size: usize,
    /// Commit granularity within a block.
    pub commit_size: usize,
}

impl ArenaParams {
    /// Default per-block reservation (4 MiB).
    pub const DEFAULT_RESERVE_SIZE: usize = 4 * 1024 * 1024;

    /// Default commit granularity (64 KiB).
    pub const DEFAULT_COMMIT_SIZE: usize = 64 * 1024;

    /// Creates parameters with explicit sizes.
    #[must_use]
    pub const fn new(reserve_size: usize, commit_size: usize) -> Self {
        Self {
            reserve_size,
            commit_size,
        }
    }
}

impl Default for ArenaParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RESERVE_SIZE, Self::DEFAULT_COMMIT_SIZE)
    }
}

/// A logical position in an arena, as returned by [`Arena::pos`].
///
/// Only meaningful for the arena that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArenaPos(usize);

impl ArenaPos {
    /// Returns the raw offset in the arena's position space.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ArenaPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Arena usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStats {
    /// Current logical position.
    pub pos: usize,
    /// Number of blocks in the chain.
    pub block_count: usize,
    /// Address space reserved across all blocks.
    pub total_reserved: usize,
    /// Memory committed across all blocks.
    pub total_committed: usize,
}

/// Snapshot of one block in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Address of the first byte of the reservation.
    pub base_addr: usize,
    /// Offset of the block in the logical position space.
    pub base_pos: usize,
    /// Bytes used in this block, header included.
    pub pos: usize,
    /// Bytes of the reservation currently committed.
    pub committed: usize,
    /// Bytes reserved.
    pub reserved: usize,
    /// Commit granularity of this block.
    pub commit_size: usize,
}

impl BlockInfo {
    /// Returns true if `addr` falls inside this block's reservation.
    #[must_use]
    pub const fn contains_addr(&self, addr: usize) -> bool {
        addr >= self.base_addr && addr < self.base_addr + self.reserved
    }
}

/// One OS reservation in the chain.
///
/// Invariant: `HEADER_SIZE <= pos <= committed <= reserved`.
struct Block {
    base: NonNull<u8>,
    base_pos: usize,
    pos: usize,
    committed: usize,
    reserved: usize,
    commit_size: usize,
}

const _: () = assert!(mem::size_of::<Block>() <= HEADER_SIZE);

// SAFETY: a block exclusively owns its reservation; nothing else aliases it.
unsafe impl Send for Block {}

impl Block {
    fn logical_pos(&self) -> usize {
        self.base_pos + self.pos
    }

    /// Returns `(pos_pre, pos_post)` for an allocation placed at the cursor.
    ///
    /// Alignment is computed on the absolute address so alignments larger
    /// than a page are honoured.
    fn bump(&self, size: usize, align: usize) -> Option<(usize, usize)> {
        let base = self.base.as_ptr().addr();
        let start = base
            .checked_add(self.pos)?
            .checked_next_multiple_of(align)?;
        let pos_pre = start - base;
        let pos_post = pos_pre.checked_add(size)?;
        Some((pos_pre, pos_post))
    }

    /// Moves the cursor to `pos_post` and returns the address of `pos_pre`.
    fn take(&mut self, pos_pre: usize, pos_post: usize) -> NonNull<u8> {
        debug_assert!(pos_pre <= pos_post);
        debug_assert!(pos_post <= self.committed);
        debug_assert!(self.committed <= self.reserved);
        self.pos = pos_post;
        // SAFETY: pos_pre <= committed <= reserved, so the offset stays
        // inside (or one past) this block's reservation.
        unsafe { self.base.add(pos_pre) }
    }

    fn info(&self) -> BlockInfo {
        BlockInfo {
            base_addr: self.base.as_ptr().addr(),
            base_pos: self.base_pos,
            pos: self.pos,
            committed: self.committed,
            reserved: self.reserved,
            commit_size: self.commit_size,
        }
    }
}

/// The block chain. `current` is the newest block; `prev` holds the older
/// blocks, oldest first.
struct Chain {
    current: Block,
    prev: Vec<Block>,
}

impl Chain {
    fn newest_first(&self) -> impl Iterator<Item = &Block> {
        iter::once(&self.current).chain(self.prev.iter().rev())
    }
}

/// Chained virtual-memory arena.
///
/// See the [module documentation](self) for the position model.
///
/// # Thread Safety
///
/// `Arena` is `Send` but not `Sync`: one owner at a time. Callers that need
/// concurrent allocation should keep one arena per thread or wrap the arena
/// in a mutex.
///
/// # Examples
///
/// ```
/// use frog_mem::arena::{Arena, ArenaParams};
///
/// let arena = Arena::new("example", ArenaParams::new(64 * 1024, 64 * 1024)).unwrap();
///
/// // Raw, aligned bytes
/// let ptr = arena.push(100, 16).unwrap();
/// assert_eq!(ptr.as_ptr().addr() % 16, 0);
///
/// // Typed values
/// let numbers = arena.alloc_slice_copy(&[1u32, 2, 3]).unwrap();
/// assert_eq!(numbers, &[1, 2, 3]);
/// ```
pub struct Arena<M: VirtualMemory = SystemMemory> {
    name: String,
    vm: M,
    /// Page-aligned reservation for regular blocks.
    reserve_size: usize,
    /// Page-aligned commit granularity for regular blocks.
    commit_size: usize,
    chain: RefCell<Chain>,
}

impl Arena<SystemMemory> {
    /// Creates an arena backed by the OS virtual memory system.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::Reserve`] if the first block cannot be reserved
    /// and [`ArenaError::Commit`] if its first pages cannot be committed.
    pub fn new(name: impl Into<String>, params: ArenaParams) -> Result<Self, ArenaError> {
        Self::with_memory(name, params, SystemMemory)
    }

    /// Creates an arena with [`ArenaParams::default`].
    ///
    /// # Errors
    ///
    /// See [`Arena::new`].
    pub fn with_defaults(name: impl Into<String>) -> Result<Self, ArenaError> {
        Self::new(name, ArenaParams::default())
    }
}

impl<M: VirtualMemory> Arena<M> {
    /// Creates an arena on top of a custom [`VirtualMemory`] implementation.
    ///
    /// Sizes are rounded up to the page size, zero sizes become one page and
    /// `commit_size` is clamped to `reserve_size`.
    ///
    /// # Errors
    ///
    /// See [`Arena::new`]. Returns [`ArenaError::Overflow`] if rounding a size
    /// up to the page size overflows.
    pub fn with_memory(
        name: impl Into<String>,
        params: ArenaParams,
        vm: M,
    ) -> Result<Self, ArenaError> {
        let page = vm.page_size();
        let reserve_size = params
            .reserve_size
            .max(1)
            .checked_next_multiple_of(page)
            .ok_or(ArenaError::Overflow)?;
        let commit_size = params
            .commit_size
            .max(1)
            .checked_next_multiple_of(page)
            .ok_or(ArenaError::Overflow)?
            .min(reserve_size);

        let name = name.into();
        let first = reserve_block(&vm, &name, reserve_size, commit_size, 0)?;

        Ok(Self {
            name,
            vm,
            reserve_size,
            commit_size,
            chain: RefCell::new(Chain {
                current: first,
                prev: Vec::new(),
            }),
        })
    }

    /// Returns the arena's diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the page-aligned reservation used for regular blocks.
    #[must_use]
    pub const fn reserve_size(&self) -> usize {
        self.reserve_size
    }

    /// Returns the page-aligned commit granularity for regular blocks.
    #[must_use]
    pub const fn commit_size(&self) -> usize {
        self.commit_size
    }

    /// Allocates `size` bytes aligned to `align`. The bytes are not cleared.
    ///
    /// Grows the chain when the active block's reservation is exhausted and
    /// commits pages when the allocation runs past the committed mark.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidAlignment`] if `align` is not a power of two
    /// - [`ArenaError::Reserve`] if a new block is needed and cannot be reserved
    /// - [`ArenaError::Commit`] if pages cannot be committed
    /// - [`ArenaError::Overflow`] if the size arithmetic overflows
    ///
    /// On error the arena's position is unchanged.
    pub fn push(&self, size: usize, align: usize) -> Result<NonNull<u8>, ArenaError> {
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { align });
        }

        let mut chain = self.chain.borrow_mut();

        if let Some((pos_pre, pos_post)) = chain.current.bump(size, align)
            && pos_post <= chain.current.reserved
        {
            self.commit_to(&mut chain.current, pos_post)?;
            return Ok(chain.current.take(pos_pre, pos_post));
        }

        let mut block = self.grow(&chain.current, size, align)?;
        let placed = block
            .bump(size, align)
            .filter(|&(_, pos_post)| pos_post <= block.reserved)
            .ok_or(ArenaError::Overflow)
            .and_then(|(pos_pre, pos_post)| {
                self.commit_to(&mut block, pos_post).map(|()| (pos_pre, pos_post))
            });

        match placed {
            Ok((pos_pre, pos_post)) => {
                let ptr = block.take(pos_pre, pos_post);
                let old = mem::replace(&mut chain.current, block);
                chain.prev.push(old);
                Ok(ptr)
            }
            Err(err) => {
                release_block(&self.vm, &self.name, &block);
                Err(err)
            }
        }
    }

    /// Allocates `size` zeroed bytes aligned to `align`.
    ///
    /// # Errors
    ///
    /// See [`Arena::push`].
    pub fn push_zeroed(&self, size: usize, align: usize) -> Result<NonNull<u8>, ArenaError> {
        let ptr = self.push(size, align)?;
        // SAFETY: push returned `size` writable bytes at ptr.
        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, size) };
        Ok(ptr)
    }

    /// Allocates a zeroed array of `count` values of `T`.
    ///
    /// Alignment is `max(8, align_of::<T>())`. The memory is zeroed, which
    /// is not necessarily a valid `T`.
    ///
    /// # Errors
    ///
    /// See [`Arena::push`].
    pub fn push_array<T>(&self, count: usize) -> Result<NonNull<T>, ArenaError> {
        let (size, align) = array_layout::<T>(count)?;
        self.push_zeroed(size, align).map(NonNull::cast)
    }

    /// Allocates an array of `count` values of `T` without clearing it.
    ///
    /// # Errors
    ///
    /// See [`Arena::push`].
    pub fn push_array_no_zero<T>(&self, count: usize) -> Result<NonNull<T>, ArenaError> {
        let (size, align) = array_layout::<T>(count)?;
        self.push(size, align).map(NonNull::cast)
    }

    /// Allocates one zeroed `T`.
    ///
    /// # Errors
    ///
    /// See [`Arena::push`].
    pub fn push_item<T>(&self) -> Result<NonNull<T>, ArenaError> {
        self.push_array::<T>(1)
    }

    /// Allocates one `T` without clearing it.
    ///
    /// # Errors
    ///
    /// See [`Arena::push`].
    pub fn push_item_no_zero<T>(&self) -> Result<NonNull<T>, ArenaError> {
        self.push_array_no_zero::<T>(1)
    }

    /// Moves `value` into the arena.
    ///
    /// The value's destructor never runs.
    ///
    /// # Errors
    ///
    /// See [`Arena::push`].
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> Result<&mut T, ArenaError> {
        let ptr = self.push_item_no_zero::<T>()?;
        // SAFETY: ptr is aligned and valid for one T; the returned borrow is
        // tied to &self, so rollback (which needs &mut self) cannot happen
        // while it lives.
        unsafe {
            ptr.as_ptr().write(value);
            Ok(&mut *ptr.as_ptr())
        }
    }

    /// Copies a slice into the arena.
    ///
    /// # Errors
    ///
    /// See [`Arena::push`].
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice_copy<T: Copy>(&self, src: &[T]) -> Result<&mut [T], ArenaError> {
        let ptr = self.push_array_no_zero::<T>(src.len())?;
        // SAFETY: ptr is valid for src.len() values of T and does not
        // overlap src, which lives outside the freshly bumped range.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), ptr.as_ptr(), src.len());
            Ok(std::slice::from_raw_parts_mut(ptr.as_ptr(), src.len()))
        }
    }

    /// Copies a string into the arena.
    ///
    /// # Errors
    ///
    /// See [`Arena::push`].
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_str(&self, s: &str) -> Result<&mut str, ArenaError> {
        let bytes = self.alloc_slice_copy(s.as_bytes())?;
        // SAFETY: bytes is a copy of valid UTF-8.
        Ok(unsafe { std::str::from_utf8_unchecked_mut(bytes) })
    }

    /// Returns the current logical position.
    #[must_use]
    pub fn pos(&self) -> ArenaPos {
        ArenaPos(self.chain.borrow().current.logical_pos())
    }

    /// Rolls the arena back to `pos`.
    ///
    /// Blocks that start at or beyond the target are released to the OS.
    /// The landing block's cursor never drops below its own header, and a
    /// target beyond the current position leaves the arena unchanged.
    pub fn pop_to(&mut self, pos: ArenaPos) {
        let target = pos.0.max(HEADER_SIZE);
        let chain = self.chain.get_mut();

        while chain.current.base_pos >= target {
            let Some(prev) = chain.prev.pop() else {
                break;
            };
            let released = mem::replace(&mut chain.current, prev);
            release_block(&self.vm, &self.name, &released);
        }

        let current = &mut chain.current;
        let local = target.saturating_sub(current.base_pos).max(HEADER_SIZE);
        if local < current.pos {
            current.pos = local;
        }
    }

    /// Rolls the arena back by `size` bytes.
    pub fn pop(&mut self, size: usize) {
        let target = self.pos().0.saturating_sub(size);
        self.pop_to(ArenaPos(target));
    }

    /// Resets the arena to its freshly created position.
    ///
    /// Every block except the first is released.
    pub fn clear(&mut self) {
        self.pop_to(ArenaPos(0));
    }

    /// Starts a scratch scope that rolls back to the current position when
    /// the returned guard is dropped.
    pub fn scratch(&mut self) -> Scratch<'_, M> {
        Scratch::begin(self)
    }

    /// Releases every block. Equivalent to dropping the arena.
    pub fn destroy(self) {
        drop(self);
    }

    /// Returns the number of blocks in the chain.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.chain.borrow().prev.len() + 1
    }

    /// Returns a snapshot of every block, oldest first.
    #[must_use]
    pub fn blocks(&self) -> Vec<BlockInfo> {
        let chain = self.chain.borrow();
        chain
            .prev
            .iter()
            .chain(iter::once(&chain.current))
            .map(Block::info)
            .collect()
    }

    /// Returns usage statistics.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        let chain = self.chain.borrow();
        let (total_reserved, total_committed) = chain
            .newest_first()
            .fold((0, 0), |(r, c), block| (r + block.reserved, c + block.committed));

        ArenaStats {
            pos: chain.current.logical_pos(),
            block_count: chain.prev.len() + 1,
            total_reserved,
            total_committed,
        }
    }

    /// Writes the block chain layout to the debug log.
    pub fn log_layout(&self) {
        debug!("{}", self);
    }

    /// Builds the block that follows `current` for an allocation of `size`
    /// bytes that did not fit.
    #[cold]
    fn grow(&self, current: &Block, size: usize, align: usize) -> Result<Block, ArenaError> {
        let page = self.vm.page_size();
        let slack = align.saturating_sub(page);
        let required = HEADER_SIZE
            .checked_next_multiple_of(align)
            .and_then(|header| header.checked_add(size))
            .and_then(|n| n.checked_add(slack))
            .ok_or(ArenaError::Overflow)?;

        let (reserve_size, commit_size) = if required > self.reserve_size {
            let exact = required
                .checked_next_multiple_of(page)
                .ok_or(ArenaError::Overflow)?;
            (exact, exact)
        } else {
            (self.reserve_size, self.commit_size)
        };

        let base_pos = current
            .base_pos
            .checked_add(current.reserved)
            .ok_or(ArenaError::Overflow)?;

        reserve_block(&self.vm, &self.name, reserve_size, commit_size, base_pos)
    }

    /// Commits pages so that `block` is backed up to at least `pos_post`.
    fn commit_to(&self, block: &mut Block, pos_post: usize) -> Result<(), ArenaError> {
        if pos_post <= block.committed {
            return Ok(());
        }

        let target = pos_post
            .checked_next_multiple_of(block.commit_size)
            .map_or(block.reserved, |t| t.min(block.reserved));
        let size = target - block.committed;

        // SAFETY: committed is page-aligned and committed + size <= reserved.
        let ok = unsafe {
            let start = block.base.add(block.committed);
            self.vm.commit(start, size)
        };
        if !ok {
            warn!(
                "arena {}: failed to commit {} bytes at block offset {}",
                self.name, size, block.committed
            );
            return Err(ArenaError::Commit { size });
        }

        trace!(
            "arena {}: committed {} bytes (block base_pos={}, committed={})",
            self.name, size, block.base_pos, target
        );
        block.committed = target;
        Ok(())
    }
}

impl<M: VirtualMemory> Drop for Arena<M> {
    fn drop(&mut self) {
        let chain = self.chain.get_mut();
        release_block(&self.vm, &self.name, &chain.current);
        for block in chain.prev.iter().rev() {
            release_block(&self.vm, &self.name, block);
        }
        chain.prev.clear();
    }
}

impl<M: VirtualMemory> fmt::Display for Arena<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        let chain = self.chain.borrow();
        for block in chain.newest_first() {
            writeln!(
                f,
                "  [reserved={}KB commit_size={}KB base_pos={}] committed={}KB pos={}",
                block.reserved / 1024,
                block.commit_size / 1024,
                block.base_pos,
                block.committed / 1024,
                block.pos,
            )?;
        }
        Ok(())
    }
}

impl<M: VirtualMemory> fmt::Debug for Arena<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("Arena")
            .field("name", &self.name)
            .field("pos", &stats.pos)
            .field("block_count", &stats.block_count)
            .field("reserve_size", &self.reserve_size)
            .field("commit_size", &self.commit_size)
            .finish()
    }
}

fn array_layout<T>(count: usize) -> Result<(usize, usize), ArenaError> {
    let size = mem::size_of::<T>()
        .checked_mul(count)
        .ok_or(ArenaError::Overflow)?;
    Ok((size, mem::align_of::<T>().max(MIN_ALIGNMENT)))
}

/// Reserves a block and commits its first `commit_size` bytes.
fn reserve_block<M: VirtualMemory>(
    vm: &M,
    name: &str,
    reserve_size: usize,
    commit_size: usize,
    base_pos: usize,
) -> Result<Block, ArenaError> {
    let Some(base) = vm.reserve(reserve_size) else {
        warn!("arena {name}: failed to reserve {reserve_size} bytes");
        return Err(ArenaError::Reserve { size: reserve_size });
    };

    // SAFETY: commit_size <= reserve_size and base is the start of the
    // fresh reservation.
    if !unsafe { vm.commit(base, commit_size) } {
        warn!("arena {name}: failed to commit first {commit_size} bytes of new block");
        // SAFETY: base/reserve_size is the reservation made above.
        unsafe { vm.release(base, reserve_size) };
        return Err(ArenaError::Commit { size: commit_size });
    }

    debug!(
        "arena {name}: new block at base_pos={base_pos} (committed={commit_size}, reserved={reserve_size})"
    );

    Ok(Block {
        base,
        base_pos,
        pos: HEADER_SIZE,
        committed: commit_size,
        reserved: reserve_size,
        commit_size,
    })
}

fn release_block<M: VirtualMemory>(vm: &M, name: &str, block: &Block) {
    debug!(
        "arena {name}: releasing block at base_pos={} (reserved={})",
        block.base_pos, block.reserved
    );
    // SAFETY: every Block describes exactly one live reservation, and the
    // chain forgets it right after this call.
    unsafe { vm.release(block.base, block.reserved) };
}
