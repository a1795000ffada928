//! Chained hash map whose nodes live in an arena.
//!
//! [`ArenaHashMap`] keeps a power-of-two bucket array and singly linked
//! node chains, all pushed into an [`Arena`]. Removed nodes go onto a free
//! list and are reused by later inserts, so a map that churns keys does not
//! keep growing the arena.
//!
//! The map borrows the arena for its whole life, which keeps the arena from
//! being rolled back underneath it.
//!
//! # Examples
//!
//! ```
//! use frog_mem::arena::Arena;
//! use frog_mem::hash_map::ArenaHashMap;
//!
//! let arena = Arena::with_defaults("map").unwrap();
//! let mut map: ArenaHashMap<u32, u64> = ArenaHashMap::new(&arena, 64).unwrap();
//!
//! assert!(map.insert(10, 20).unwrap());
//! assert!(!map.insert(10, 25).unwrap()); // replaced in place
//! assert_eq!(map.get(10), Some(25));
//! assert_eq!(map.len(), 1);
//!
//! assert!(map.remove(10));
//! assert!(!map.remove(10));
//! assert!(map.is_empty());
//! ```

use std::fmt;
use std::ptr::NonNull;
use std::slice;

use crate::arena::{Arena, ArenaError};
use crate::os::{SystemMemory, VirtualMemory};

/// Integer keys accepted by [`ArenaHashMap`].
pub trait MapKey: Copy + Eq {
    /// Widens the key to 64 bits for hashing.
    fn to_u64(self) -> u64;
}

impl MapKey for u32 {
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl MapKey for u64 {
    fn to_u64(self) -> u64 {
        self
    }
}

impl MapKey for usize {
    fn to_u64(self) -> u64 {
        self as u64
    }
}

type Link<K, V> = Option<NonNull<Node<K, V>>>;

struct Node<K, V> {
    next: Link<K, V>,
    key: K,
    value: V,
}

/// Hash map with arena-allocated buckets and nodes.
///
/// Values are `Copy`; raw pointers are fine as values.
pub struct ArenaHashMap<'a, K: MapKey, V: Copy, M: VirtualMemory = SystemMemory> {
    arena: &'a Arena<M>,
    buckets: &'a mut [Link<K, V>],
    free_list: Link<K, V>,
    len: usize,
}

impl<'a, K: MapKey, V: Copy, M: VirtualMemory> ArenaHashMap<'a, K, V, M> {
    /// Creates a map with `bucket_count` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is not a power of two.
    ///
    /// # Errors
    ///
    /// Returns the arena's error if the bucket array cannot be allocated.
    pub fn new(arena: &'a Arena<M>, bucket_count: usize) -> Result<Self, ArenaError> {
        assert!(
            bucket_count.is_power_of_two(),
            "bucket count must be a power of two, got {bucket_count}"
        );

        let buckets = arena.push_array::<Link<K, V>>(bucket_count)?;
        // SAFETY: the array is zeroed and `None` is all-zero for
        // Option<NonNull<_>>. It stays valid while `arena` is borrowed.
        let buckets = unsafe { slice::from_raw_parts_mut(buckets.as_ptr(), bucket_count) };

        Ok(Self {
            arena,
            buckets,
            free_list: None,
            len: 0,
        })
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Inserts or replaces `key`.
    ///
    /// Returns `true` if the key was new and `false` if an existing value
    /// was replaced.
    ///
    /// # Errors
    ///
    /// Returns the arena's error if a new node cannot be allocated. The map
    /// is unchanged in that case.
    pub fn insert(&mut self, key: K, value: V) -> Result<bool, ArenaError> {
        let bucket = self.bucket_of(key);

        if let Some(mut node) = self.find(bucket, key) {
            // SAFETY: nodes in a chain are live arena memory owned by this map.
            unsafe { node.as_mut().value = value };
            return Ok(false);
        }

        let node = self.new_node()?;
        // SAFETY: node points to memory for one Node, owned by this map.
        unsafe {
            node.as_ptr().write(Node {
                next: self.buckets[bucket],
                key,
                value,
            });
        }
        self.buckets[bucket] = Some(node);
        self.len += 1;
        Ok(true)
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: K) -> Option<V> {
        let node = self.find(self.bucket_of(key), key)?;
        // SAFETY: see `insert`.
        Some(unsafe { node.as_ref().value })
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: K) -> bool {
        self.find(self.bucket_of(key), key).is_some()
    }

    /// Removes `key`. Returns `false` if it was not present.
    pub fn remove(&mut self, key: K) -> bool {
        let bucket = self.bucket_of(key);
        let mut prev: Link<K, V> = None;
        let mut cursor = self.buckets[bucket];

        while let Some(mut node) = cursor {
            // SAFETY: see `insert`.
            let current = unsafe { node.as_mut() };
            if current.key != key {
                prev = cursor;
                cursor = current.next;
                continue;
            }

            match prev {
                None => self.buckets[bucket] = current.next,
                // SAFETY: prev is a live node in the same chain.
                Some(mut p) => unsafe { p.as_mut().next = current.next },
            }
            current.next = self.free_list;
            self.free_list = Some(node);
            self.len -= 1;
            return true;
        }

        false
    }

    fn bucket_of(&self, key: K) -> usize {
        let hash = fxhash::hash64(&key.to_u64());
        (hash as usize) & (self.buckets.len() - 1)
    }

    fn find(&self, bucket: usize, key: K) -> Link<K, V> {
        let mut cursor = self.buckets[bucket];
        while let Some(node) = cursor {
            // SAFETY: see `insert`.
            let current = unsafe { node.as_ref() };
            if current.key == key {
                return cursor;
            }
            cursor = current.next;
        }
        None
    }

    fn new_node(&mut self) -> Result<NonNull<Node<K, V>>, ArenaError> {
        if let Some(node) = self.free_list {
            // SAFETY: free nodes stay initialised; only `next` is read.
            self.free_list = unsafe { node.as_ref().next };
            return Ok(node);
        }
        self.arena.push_item_no_zero::<Node<K, V>>()
    }
}

impl<K: MapKey, V: Copy, M: VirtualMemory> fmt::Debug for ArenaHashMap<'_, K, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaHashMap")
            .field("len", &self.len)
            .field("bucket_count", &self.buckets.len())
            .field("arena", &self.arena.name())
            .finish()
    }
}
