//! Entity identifiers
//!
//! Entities are opaque ids owned by the entity system. Subsystems attach them
//! to their own records so results (ray hits, contacts) can name the entity.

use core::fmt;

/// Entity identifier: lower 32 bits index, upper 32 bits generation
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    bits: u64,
}

impl EntityId {
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            bits: (generation as u64) << 32 | index as u64,
        }
    }

    /// Create a null/invalid id
    #[inline]
    pub const fn null() -> Self {
        Self { bits: u64::MAX }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.bits == u64::MAX
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.bits as u32
    }

    #[inline]
    pub const fn generation(&self) -> u32 {
        (self.bits >> 32) as u32
    }

    #[inline]
    pub const fn to_bits(&self) -> u64 {
        self.bits
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(null)")
        } else {
            write!(f, "EntityId({}v{})", self.index(), self.generation())
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "{}v{}", self.index(), self.generation())
        }
    }
}

/// Hands out fresh entity ids, recycling released indices with a bumped generation
#[derive(Debug, Default)]
pub struct EntityIdGenerator {
    generations: Vec<u32>,
    free_list: Vec<u32>,
}

impl EntityIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EntityId {
        if let Some(index) = self.free_list.pop() {
            return EntityId::new(index, self.generations[index as usize]);
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        EntityId::new(index, 0)
    }

    /// Release an id. Returns `false` if it was already released.
    pub fn release(&mut self, id: EntityId) -> bool {
        match self.generations.get_mut(id.index() as usize) {
            Some(gen) if *gen == id.generation() => {
                *gen = gen.wrapping_add(1);
                self.free_list.push(id.index());
                true
            }
            _ => false,
        }
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        !id.is_null()
            && self
                .generations
                .get(id.index() as usize)
                .is_some_and(|gen| *gen == id.generation())
    }
}
