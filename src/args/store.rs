//! Storage strategy — fixed-capacity vs growable containers.

use serde::{Deserialize, Serialize};

/// Maximum positional arguments kept in static mode.
pub const MAX_POSITIONALS: usize = 256;
/// Maximum flags kept in static mode.
pub const MAX_FLAGS: usize = 256;
/// Maximum parameters kept in static mode.
pub const MAX_PARAMS: usize = 256;
/// Starting capacity of each container in dynamic mode.
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// How a session stores what it parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Fixed-capacity containers. Entries past the maximum are dropped.
    /// Response files are unavailable.
    #[default]
    Static,
    /// Heap-backed containers that double when full.
    Dynamic,
}

/// Which heap capabilities the caller can provide.
///
/// Dynamic storage needs all three; anything less falls back to static.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryCapabilities {
    pub alloc: bool,
    pub realloc: bool,
    pub release: bool,
}

impl MemoryCapabilities {
    /// All three capabilities present.
    pub fn heap() -> Self {
        Self {
            alloc: true,
            realloc: true,
            release: true,
        }
    }
}

impl StorageMode {
    /// Pick the storage mode for a set of heap capabilities.
    pub fn from_capabilities(caps: MemoryCapabilities) -> Self {
        if caps.alloc && caps.realloc && caps.release {
            StorageMode::Dynamic
        } else {
            StorageMode::Static
        }
    }

    /// Response file content has no upper bound, so it needs the heap.
    pub fn supports_response_files(self) -> bool {
        self == StorageMode::Dynamic
    }
}

/// Insert/count/get contract shared by both container kinds.
pub trait ArgStore<T> {
    /// Append an item. Returns `false` if it was dropped.
    fn push(&mut self, item: T) -> bool;
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&T>;
    /// Current capacity. Fixed stores report their maximum.
    fn capacity(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Array-backed store that never allocates and silently drops overflow.
#[derive(Debug, Clone)]
pub struct FixedStore<T: Copy, const N: usize> {
    items: [Option<T>; N],
    len: usize,
}

impl<T: Copy, const N: usize> FixedStore<T, N> {
    pub fn new() -> Self {
        Self {
            items: [None; N],
            len: 0,
        }
    }
}

impl<T: Copy, const N: usize> Default for FixedStore<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> ArgStore<T> for FixedStore<T, N> {
    fn push(&mut self, item: T) -> bool {
        let Some(slot) = self.items.get_mut(self.len) else {
            return false;
        };
        *slot = Some(item);
        self.len += 1;
        true
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.items.get(index).and_then(Option::as_ref)
    }

    fn capacity(&self) -> usize {
        N
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

/// Heap-backed store. Capacity is a power of two and doubles when an
/// insert would exceed it. Nothing is allocated until the first insert.
#[derive(Debug, Clone)]
pub struct GrowableStore<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> GrowableStore<T> {
    /// `initial` is rounded up to a power of two (minimum 1).
    pub fn new(initial: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity: initial.max(1).next_power_of_two(),
        }
    }
}

impl<T> ArgStore<T> for GrowableStore<T> {
    fn push(&mut self, item: T) -> bool {
        if self.items.len() + 1 > self.capacity {
            let Some(doubled) = self.capacity.checked_mul(2) else {
                return false;
            };
            self.capacity = doubled;
        }
        if self.items.capacity() < self.capacity {
            self.items.reserve_exact(self.capacity - self.items.len());
        }
        self.items.push(item);
        true
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// A container whose kind is chosen once from the session's [`StorageMode`].
#[derive(Debug, Clone)]
pub enum Store<T: Copy, const N: usize> {
    Fixed(FixedStore<T, N>),
    Growable(GrowableStore<T>),
}

impl<T: Copy, const N: usize> Store<T, N> {
    pub fn new(mode: StorageMode, initial_capacity: usize) -> Self {
        match mode {
            StorageMode::Static => Store::Fixed(FixedStore::new()),
            StorageMode::Dynamic => Store::Growable(GrowableStore::new(initial_capacity)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl<T: Copy, const N: usize> ArgStore<T> for Store<T, N> {
    fn push(&mut self, item: T) -> bool {
        match self {
            Store::Fixed(s) => s.push(item),
            Store::Growable(s) => s.push(item),
        }
    }

    fn len(&self) -> usize {
        match self {
            Store::Fixed(s) => s.len(),
            Store::Growable(s) => s.len(),
        }
    }

    fn get(&self, index: usize) -> Option<&T> {
        match self {
            Store::Fixed(s) => s.get(index),
            Store::Growable(s) => s.get(index),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Store::Fixed(s) => s.capacity(),
            Store::Growable(s) => s.capacity(),
        }
    }

    fn clear(&mut self) {
        match self {
            Store::Fixed(s) => s.clear(),
            Store::Growable(s) => s.clear(),
        }
    }
}
