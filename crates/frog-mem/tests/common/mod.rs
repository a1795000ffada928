// Common test utilities for integration tests
//
// Virtual memory backends that sit on top of the system implementation and
// let tests observe or sabotage what the arena asks of the OS.

#![allow(dead_code)]

use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use frog_mem::os::{SystemMemory, VirtualMemory};

pub const KB: usize = 1024;
pub const MB: usize = 1024 * KB;

pub fn page_size() -> usize {
    SystemMemory.page_size()
}

/// Live reservation accounting shared between a backend and the test.
#[derive(Debug, Default)]
pub struct Counters {
    live_blocks: Cell<usize>,
    live_bytes: Cell<usize>,
    reserve_calls: Cell<usize>,
    commit_calls: Cell<usize>,
}

impl Counters {
    pub fn live_blocks(&self) -> usize {
        self.live_blocks.get()
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    pub fn reserve_calls(&self) -> usize {
        self.reserve_calls.get()
    }

    pub fn commit_calls(&self) -> usize {
        self.commit_calls.get()
    }
}

/// Counts reservations that are currently alive.
#[derive(Debug, Clone, Default)]
pub struct CountingMemory {
    counters: Rc<Counters>,
}

impl CountingMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> Rc<Counters> {
        Rc::clone(&self.counters)
    }
}

impl VirtualMemory for CountingMemory {
    fn page_size(&self) -> usize {
        SystemMemory.page_size()
    }

    fn reserve(&self, size: usize) -> Option<NonNull<u8>> {
        let c = &self.counters;
        c.reserve_calls.set(c.reserve_calls.get() + 1);
        let ptr = SystemMemory.reserve(size)?;
        c.live_blocks.set(c.live_blocks.get() + 1);
        c.live_bytes.set(c.live_bytes.get() + size);
        Some(ptr)
    }

    unsafe fn commit(&self, ptr: NonNull<u8>, size: usize) -> bool {
        let c = &self.counters;
        c.commit_calls.set(c.commit_calls.get() + 1);
        unsafe { SystemMemory.commit(ptr, size) }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, size: usize) {
        let c = &self.counters;
        c.live_blocks.set(c.live_blocks.get() - 1);
        c.live_bytes.set(c.live_bytes.get() - size);
        unsafe { SystemMemory.release(ptr, size) }
    }
}

/// How many reserve and commit calls may still succeed.
#[derive(Debug)]
pub struct Budget {
    reserves: Cell<usize>,
    commits: Cell<usize>,
}

impl Budget {
    pub fn set_reserves(&self, n: usize) {
        self.reserves.set(n);
    }

    pub fn set_commits(&self, n: usize) {
        self.commits.set(n);
    }

    pub fn unlimited(&self) {
        self.reserves.set(usize::MAX);
        self.commits.set(usize::MAX);
    }

    fn take(slot: &Cell<usize>) -> bool {
        match slot.get() {
            0 => false,
            usize::MAX => true,
            n => {
                slot.set(n - 1);
                true
            }
        }
    }
}

/// Fails reserve or commit calls once their budget runs out.
#[derive(Debug, Clone)]
pub struct FailingMemory {
    inner: CountingMemory,
    budget: Rc<Budget>,
}

impl FailingMemory {
    pub fn new() -> Self {
        Self {
            inner: CountingMemory::new(),
            budget: Rc::new(Budget {
                reserves: Cell::new(usize::MAX),
                commits: Cell::new(usize::MAX),
            }),
        }
    }

    pub fn budget(&self) -> Rc<Budget> {
        Rc::clone(&self.budget)
    }

    pub fn counters(&self) -> Rc<Counters> {
        self.inner.counters()
    }
}

impl VirtualMemory for FailingMemory {
    fn page_size(&self) -> usize {
        self.inner.page_size()
    }

    fn reserve(&self, size: usize) -> Option<NonNull<u8>> {
        if !Budget::take(&self.budget.reserves) {
            return None;
        }
        self.inner.reserve(size)
    }

    unsafe fn commit(&self, ptr: NonNull<u8>, size: usize) -> bool {
        if !Budget::take(&self.budget.commits) {
            return false;
        }
        unsafe { self.inner.commit(ptr, size) }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, size: usize) {
        unsafe { self.inner.release(ptr, size) }
    }
}
