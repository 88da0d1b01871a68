//! Handle types and generational entity allocation.
//!
//! Handles are plain 64-bit values that *reference* host-owned objects. They
//! carry no data and own nothing; validity is decided by the host when a
//! handle is looked up, never by local state. `u64::MAX` is reserved in every
//! handle space as the [`EntityId::INVALID`] / [`AssetHandle::INVALID`]
//! sentinel.
//!
//! ## Entity layout
//!
//! ```text
//!  63            32 31             0
//! +----------------+----------------+
//! |   generation   |   slot index   |
//! +----------------+----------------+
//! ```
//!
//! The generation half is bumped every time a slot is freed, so a copy of a
//! handle taken before its entity was destroyed no longer matches the slot
//! and the host reports it as not found instead of resolving it to whatever
//! entity now occupies the slot. A slot whose generation reaches `u32::MAX`
//! is retired rather than wrapped.

use serde::{Deserialize, Serialize};

/// Identifier of an entity owned by the host.
///
/// Ordered and compared by raw value. Conversion to and from `u64` is
/// explicit through [`EntityId::from_raw`] and [`EntityId::raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// The reserved "no entity" sentinel.
    pub const INVALID: EntityId = EntityId(u64::MAX);

    /// Wrap a raw value received from the host.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Build an identifier from a slot index and generation.
    #[must_use]
    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    /// Returns the raw `u64` value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Slot index half of the handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Generation half of the handle.
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns `true` if this is the [`EntityId::INVALID`] sentinel.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_invalid() {
            write!(f, "EntityId(INVALID)")
        } else {
            write!(f, "EntityId({}v{})", self.index(), self.generation())
        }
    }
}

/// Identifier of an asset in the host's asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetHandle(u64);

impl AssetHandle {
    /// The reserved "no asset" sentinel.
    pub const INVALID: AssetHandle = AssetHandle(u64::MAX);

    /// Wrap a raw value received from the host.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw `u64` value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the [`AssetHandle::INVALID`] sentinel.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for AssetHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_invalid() {
            write!(f, "AssetHandle(INVALID)")
        } else {
            write!(f, "AssetHandle({:#018x})", self.0)
        }
    }
}

/// Hands out generational [`EntityId`]s and recycles freed slots.
///
/// This lives on the host side; the script facade never allocates handles.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Current generation of every slot ever handed out.
    generations: Vec<u32>,
    /// Liveness of every slot, parallel with `generations`.
    alive: Vec<bool>,
    /// Freed slot indices waiting to be reused.
    free: Vec<u32>,
    /// Number of live entities.
    live: usize,
}

impl EntityAllocator {
    /// Slot index that is never handed out, so no allocated handle can equal
    /// [`EntityId::INVALID`].
    const RESERVED_INDEX: u32 = u32::MAX;

    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a handle, reusing a freed slot when one is available.
    ///
    /// Returns `None` once every slot index is in use.
    pub fn allocate(&mut self) -> Option<EntityId> {
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            self.live += 1;
            return Some(EntityId::from_parts(index, self.generations[slot]));
        }

        let index = u32::try_from(self.generations.len()).ok()?;
        if index == Self::RESERVED_INDEX {
            return None;
        }
        self.generations.push(0);
        self.alive.push(true);
        self.live += 1;
        Some(EntityId::from_parts(index, 0))
    }

    /// Frees the slot referenced by `id` and bumps its generation.
    ///
    /// A slot is never reused once its generation reaches `u32::MAX`, so
    /// generations do not wrap and stale handles stay stale.
    ///
    /// Returns `false` if `id` is invalid, unknown, or stale.
    pub fn free(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let slot = id.index() as usize;
        self.alive[slot] = false;
        let generation = self.generations[slot].saturating_add(1);
        self.generations[slot] = generation;
        // A slot whose generation is exhausted is retired for good.
        if generation != u32::MAX {
            self.free.push(id.index());
        }
        self.live -= 1;
        true
    }

    /// Returns `true` if `id` refers to a live slot at its current generation.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        if id.is_invalid() {
            return false;
        }
        let slot = id.index() as usize;
        slot < self.generations.len()
            && self.alive[slot]
            && self.generations[slot] == id.generation()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.live
    }
}
