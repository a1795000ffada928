//! Virtual memory primitives used by the arena.
//!
//! The arena never talks to the OS directly. It goes through the
//! [`VirtualMemory`] trait, which has exactly four capabilities:
//!
//! - query the page size
//! - reserve a range of address space with no access
//! - commit (back with memory) part of a reserved range
//! - release a whole reserved range
//!
//! [`SystemMemory`] implements the trait for the current target: `mmap`,
//! `mprotect` and `munmap` on Unix, `VirtualAlloc` and `VirtualFree` on
//! Windows.
//!
//! # Examples
//!
//! ```
//! use frog_mem::os::{SystemMemory, VirtualMemory};
//!
//! let vm = SystemMemory;
//! let page = vm.page_size();
//! assert!(page.is_power_of_two());
//!
//! let base = vm.reserve(4 * page).expect("reserve failed");
//! unsafe {
//!     assert!(vm.commit(base, page));
//!     base.as_ptr().write(7);
//!     assert_eq!(base.as_ptr().read(), 7);
//!     vm.release(base, 4 * page);
//! }
//! ```

use std::ptr::NonNull;
use std::sync::OnceLock;

/// Page size assumed when the OS refuses to report one.
pub const FALLBACK_PAGE_SIZE: usize = 4096;

/// Capability interface over the platform's virtual memory system.
///
/// Implementations must hand out page-aligned reservations, and `commit`
/// must leave the committed range readable and writable.
pub trait VirtualMemory {
    /// Returns the page size. Must be a power of two.
    fn page_size(&self) -> usize;

    /// Reserves `size` bytes of address space without backing memory.
    ///
    /// Returns `None` when the reservation cannot be granted.
    fn reserve(&self, size: usize) -> Option<NonNull<u8>>;

    /// Commits `size` bytes starting at `ptr`.
    ///
    /// Returns `false` when the OS cannot back the range.
    ///
    /// # Safety
    ///
    /// `ptr..ptr + size` must lie inside a live reservation obtained from
    /// [`VirtualMemory::reserve`] on the same implementation, and `ptr` must
    /// be page-aligned.
    unsafe fn commit(&self, ptr: NonNull<u8>, size: usize) -> bool;

    /// Releases a whole reservation.
    ///
    /// # Safety
    ///
    /// `ptr` and `size` must describe exactly one live reservation. No
    /// pointer into the range may be used afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>, size: usize);
}

/// The operating system's virtual memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemMemory;

impl VirtualMemory for SystemMemory {
    fn page_size(&self) -> usize {
        static PAGE_SIZE: OnceLock<usize> = OnceLock::new();
        *PAGE_SIZE.get_or_init(sys::page_size)
    }

    fn reserve(&self, size: usize) -> Option<NonNull<u8>> {
        sys::reserve(size)
    }

    unsafe fn commit(&self, ptr: NonNull<u8>, size: usize) -> bool {
        // SAFETY: forwarded contract.
        unsafe { sys::commit(ptr, size) }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, size: usize) {
        // SAFETY: forwarded contract.
        unsafe { sys::release(ptr, size) }
    }
}

#[cfg(unix)]
mod sys {
    use super::FALLBACK_PAGE_SIZE;
    use std::ptr::{self, NonNull};

    pub(super) fn page_size() -> usize {
        // SAFETY: sysconf has no preconditions.
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGE_SIZE) };
        match usize::try_from(page_size) {
            Ok(size) if size.is_power_of_two() => size,
            _ => FALLBACK_PAGE_SIZE,
        }
    }

    pub(super) fn reserve(size: usize) -> Option<NonNull<u8>> {
        // SAFETY: anonymous private mapping at an address of the kernel's
        // choosing; no existing memory is touched.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                size,
                libc::PROT_NONE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return None;
        }
        NonNull::new(ptr.cast::<u8>())
    }

    pub(super) unsafe fn commit(ptr: NonNull<u8>, size: usize) -> bool {
        // SAFETY: caller guarantees the range is inside a live reservation.
        let rc = unsafe {
            libc::mprotect(
                ptr.as_ptr().cast::<libc::c_void>(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
            )
        };
        rc == 0
    }

    pub(super) unsafe fn release(ptr: NonNull<u8>, size: usize) {
        // SAFETY: caller guarantees ptr/size describe one live reservation.
        unsafe {
            libc::munmap(ptr.as_ptr().cast::<libc::c_void>(), size);
        }
    }
}

#[cfg(windows)]
mod sys {
    use super::FALLBACK_PAGE_SIZE;
    use std::ffi::c_void;
    use std::mem;
    use std::ptr::{self, NonNull};

    use windows_sys::Win32::System::Memory::{
        MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_NOACCESS, PAGE_READWRITE,
        VirtualAlloc, VirtualFree,
    };
    use windows_sys::Win32::System::SystemInformation::{
        GetSystemInfo, SYSTEM_INFO,
    };

    pub(super) fn page_size() -> usize {
        // SAFETY: SYSTEM_INFO is plain data; GetSystemInfo fills it in.
        let mut info: SYSTEM_INFO = unsafe { mem::zeroed() };
        unsafe { GetSystemInfo(&mut info) };
        let size = info.dwPageSize as usize;
        if size.is_power_of_two() { size } else { FALLBACK_PAGE_SIZE }
    }

    pub(super) fn reserve(size: usize) -> Option<NonNull<u8>> {
        // SAFETY: reserving at an address of the system's choosing.
        let ptr = unsafe {
            VirtualAlloc(ptr::null(), size, MEM_RESERVE, PAGE_NOACCESS)
        };
        NonNull::new(ptr.cast::<u8>())
    }

    pub(super) unsafe fn commit(ptr: NonNull<u8>, size: usize) -> bool {
        // SAFETY: caller guarantees the range is inside a live reservation.
        let committed = unsafe {
            VirtualAlloc(
                ptr.as_ptr().cast::<c_void>().cast_const(),
                size,
                MEM_COMMIT,
                PAGE_READWRITE,
            )
        };
        !committed.is_null()
    }

    pub(super) unsafe fn release(ptr: NonNull<u8>, _size: usize) {
        // Size must be zero for MEM_RELEASE.
        // SAFETY: caller guarantees ptr is the base of a live reservation.
        unsafe {
            VirtualFree(ptr.as_ptr().cast::<c_void>(), 0, MEM_RELEASE);
        }
    }
}
