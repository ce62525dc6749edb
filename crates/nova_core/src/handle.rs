//! Type-safe handles into dense component stores
//!
//! The entity system owns one [`Store`] per component kind and hands out
//! [`Handle`]s. Subsystems keep handles, never references, so destroying a
//! component invalidates every handle to it instead of leaving it dangling.
//! A stale handle is detected by its generation and simply resolves to `None`.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::error::{Error, Result};

/// A type-safe handle to a value of type T
#[repr(transparent)]
pub struct Handle<T> {
    /// Lower 24 bits: index, Upper 8 bits: generation
    bits: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Maximum index value (24 bits)
    pub const MAX_INDEX: u32 = (1 << 24) - 1;
    /// Maximum generation value (8 bits)
    pub const MAX_GENERATION: u8 = u8::MAX;

    /// Create a new handle from index and generation
    #[inline]
    pub const fn new(index: u32, generation: u8) -> Self {
        debug_assert!(index <= Self::MAX_INDEX);
        Self {
            bits: (generation as u32) << 24 | index,
            _marker: PhantomData,
        }
    }

    /// Create an invalid/null handle
    #[inline]
    pub const fn null() -> Self {
        Self {
            bits: u32::MAX,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.bits == u32::MAX
    }

    /// Get the index portion
    #[inline]
    pub const fn index(&self) -> u32 {
        self.bits & Self::MAX_INDEX
    }

    /// Get the generation portion
    #[inline]
    pub const fn generation(&self) -> u8 {
        (self.bits >> 24) as u8
    }

    #[inline]
    pub const fn to_bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            bits,
            _marker: PhantomData,
        }
    }
}

// Manual trait implementations to avoid T bounds
impl<T> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = core::any::type_name::<T>().rsplit("::").next().unwrap_or("?");
        if self.is_null() {
            write!(f, "Handle<{}>(null)", name)
        } else {
            write!(f, "Handle<{}>({}v{})", name, self.index(), self.generation())
        }
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

/// Allocates handles with generation tracking
pub struct HandleAllocator<T> {
    /// Generations for each slot
    generations: Vec<u8>,
    /// Whether each slot currently holds a live value
    alive: Vec<bool>,
    /// Free list of available indices
    free_list: Vec<u32>,
    /// Slots whose generation ran out; never handed out again
    retired: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HandleAllocator<T> {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            alive: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity / 4),
            retired: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate a new handle, reusing freed slots first
    pub fn allocate(&mut self) -> Result<Handle<T>> {
        if let Some(index) = self.free_list.pop() {
            self.alive[index as usize] = true;
            let gen = self.generations[index as usize];
            return Ok(Handle::new(index, gen));
        }

        let index = self.generations.len() as u32;
        if index > Handle::<T>::MAX_INDEX {
            return Err(Error::StoreExhausted {
                type_name: core::any::type_name::<T>(),
                capacity: self.generations.len(),
            });
        }
        self.generations.push(0);
        self.alive.push(true);
        Ok(Handle::new(index, 0))
    }

    /// Free a handle, making its index available for reuse.
    ///
    /// A slot whose generation is exhausted is retired instead, so a wrapped
    /// generation can never revive an old handle. Returns `false` for handles
    /// that are already stale.
    pub fn free(&mut self, handle: Handle<T>) -> bool {
        if !self.is_valid(handle) {
            return false;
        }

        let index = handle.index() as usize;
        self.alive[index] = false;
        let gen = &mut self.generations[index];
        if *gen == Handle::<T>::MAX_GENERATION {
            self.retired += 1;
            return true;
        }
        *gen += 1;
        self.free_list.push(handle.index());
        true
    }

    /// Check if a handle is still live
    pub fn is_valid(&self, handle: Handle<T>) -> bool {
        if handle.is_null() {
            return false;
        }
        let index = handle.index() as usize;
        self.alive.get(index).copied().unwrap_or(false) && self.generations[index] == handle.generation()
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.generations.len() - self.free_list.len() - self.retired
    }

    /// Slots taken out of circulation after exhausting their generations
    pub fn retired(&self) -> usize {
        self.retired
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slots, including freed ones
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }

    fn generation_at(&self, index: usize) -> u8 {
        self.generations[index]
    }
}

impl<T> Default for HandleAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dense storage for one component kind, addressed by [`Handle`]
pub struct Store<T> {
    allocator: HandleAllocator<T>,
    values: Vec<Option<T>>,
}

impl<T> Store<T> {
    pub fn new() -> Self {
        Self {
            allocator: HandleAllocator::new(),
            values: Vec::new(),
        }
    }

    /// Insert a value and get a handle to it
    pub fn insert(&mut self, value: T) -> Result<Handle<T>> {
        let handle = self.allocator.allocate()?;
        let index = handle.index() as usize;

        if index >= self.values.len() {
            self.values.resize_with(index + 1, || None);
        }
        self.values[index] = Some(value);
        Ok(handle)
    }

    /// Remove a value, invalidating every copy of its handle
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        if !self.allocator.free(handle) {
            return None;
        }
        self.values[handle.index() as usize].take()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.values.get(handle.index() as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if !self.allocator.is_valid(handle) {
            return None;
        }
        self.values.get_mut(handle.index() as usize)?.as_mut()
    }

    /// Borrow two distinct live values mutably at once.
    ///
    /// Returns `None` when either handle is stale or both name the same slot.
    pub fn get2_mut(&mut self, a: Handle<T>, b: Handle<T>) -> Option<(&mut T, &mut T)> {
        if !self.allocator.is_valid(a) || !self.allocator.is_valid(b) {
            return None;
        }
        let (ia, ib) = (a.index() as usize, b.index() as usize);
        if ia == ib {
            return None;
        }

        if ia < ib {
            let (low, high) = self.values.split_at_mut(ib);
            Some((low[ia].as_mut()?, high[0].as_mut()?))
        } else {
            let (low, high) = self.values.split_at_mut(ia);
            let (first, second) = (high[0].as_mut()?, low[ib].as_mut()?);
            Some((first, second))
        }
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.allocator.is_valid(handle)
    }

    pub fn len(&self) -> usize {
        self.allocator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocator.is_empty()
    }

    /// Iterate over all live handles and values
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        let allocator = &self.allocator;
        self.values.iter().enumerate().filter_map(move |(i, slot)| {
            slot.as_ref()
                .map(|v| (Handle::new(i as u32, allocator.generation_at(i)), v))
        })
    }

    /// Iterate over all live handles and mutable values
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        let allocator = &self.allocator;
        self.values.iter_mut().enumerate().filter_map(move |(i, slot)| {
            slot.as_mut()
                .map(|v| (Handle::new(i as u32, allocator.generation_at(i)), v))
        })
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
