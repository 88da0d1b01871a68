//! Component kind identity and classification.
//!
//! A component kind is named by a string and identified on the wire by a
//! [`KindId`]: the FNV-1a 64-bit hash of that name. The hash is deterministic
//! and language-neutral, so the host can key its classification table by the
//! same value without sharing any Rust type information.
//!
//! Whether a kind is engine-native or script-authored is never decided here.
//! The facade asks the host through
//! [`ComponentHost::classify_kind`](crate::host::ComponentHost::classify_kind)
//! and dispatches on the returned [`KindClass`].

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::component::{ScriptComponent, ScriptInstance, Shared};
use crate::handle::EntityId;

/// Stable identifier of a component kind, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KindId(pub u64);

impl KindId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`KindId`] of a kind name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`KindId`] for a resolvable kind `K`.
    #[must_use]
    pub fn of<K: ComponentKind>() -> Self {
        Self::from_name(K::type_name())
    }
}

impl std::fmt::Display for KindId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KindId({:#018x})", self.0)
    }
}

/// The host's verdict on a [`KindId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindClass {
    /// Data lives entirely in the host; scripts reach it through a proxy.
    Native,
    /// A user-authored behaviour registered once per entity.
    Script,
}

/// Component kinds the host ships with.
///
/// Hosts may classify further names as native; this list only names the
/// kinds the facade provides proxies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeKind {
    Transform,
    SpriteRenderer,
    Camera,
    Rigidbody2D,
    BoxCollider2D,
    CircleCollider2D,
    BoxCollider,
    SphereCollider,
    MeshCollider,
    Animator,
    SkeletalMesh,
}

impl NativeKind {
    /// Every native kind, in declaration order.
    pub const ALL: [NativeKind; 11] = [
        NativeKind::Transform,
        NativeKind::SpriteRenderer,
        NativeKind::Camera,
        NativeKind::Rigidbody2D,
        NativeKind::BoxCollider2D,
        NativeKind::CircleCollider2D,
        NativeKind::BoxCollider,
        NativeKind::SphereCollider,
        NativeKind::MeshCollider,
        NativeKind::Animator,
        NativeKind::SkeletalMesh,
    ];

    /// The kind name hashed into its [`KindId`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            NativeKind::Transform => "Transform",
            NativeKind::SpriteRenderer => "SpriteRenderer",
            NativeKind::Camera => "Camera",
            NativeKind::Rigidbody2D => "Rigidbody2D",
            NativeKind::BoxCollider2D => "BoxCollider2D",
            NativeKind::CircleCollider2D => "CircleCollider2D",
            NativeKind::BoxCollider => "BoxCollider",
            NativeKind::SphereCollider => "SphereCollider",
            NativeKind::MeshCollider => "MeshCollider",
            NativeKind::Animator => "Animator",
            NativeKind::SkeletalMesh => "SkeletalMesh",
        }
    }

    /// The wire identifier of this kind.
    #[must_use]
    pub const fn kind_id(self) -> KindId {
        KindId::from_name(self.name())
    }

    /// Look a native kind up by its identifier.
    #[must_use]
    pub fn from_kind_id(id: KindId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.kind_id() == id)
    }
}

/// A kind that entity-level resolution can produce.
///
/// Native proxies implement this directly; script components are resolved
/// through the [`Script`] marker.
pub trait ComponentKind: 'static {
    /// What a successful resolution hands back.
    type Ref;

    /// The kind name, hashed into the [`KindId`] sent to the host.
    fn type_name() -> &'static str;

    /// Returns the [`KindId`] for this kind.
    fn kind_id() -> KindId {
        KindId::from_name(Self::type_name())
    }

    /// Build a fresh proxy bound to `owner`.
    ///
    /// Returns `None` for kinds that cannot be native.
    fn bind_native(owner: EntityId) -> Option<Self::Ref>;

    /// Recover this kind from the instance the host registered for an entity.
    ///
    /// Returns `None` for kinds that cannot be script-authored, or when the
    /// instance is of a different type.
    fn from_script(instance: &ScriptInstance) -> Option<Self::Ref>;
}

/// Resolution marker for a script-authored component type `T`.
///
/// `entity.get_component::<Script<Player>>(host)` yields the shared
/// `Rc<RefCell<Player>>` the host registered for that entity.
pub struct Script<T>(PhantomData<fn() -> T>);

impl<T: ScriptComponent> ComponentKind for Script<T> {
    type Ref = Shared<T>;

    fn type_name() -> &'static str {
        T::type_name()
    }

    fn bind_native(_owner: EntityId) -> Option<Self::Ref> {
        None
    }

    fn from_script(instance: &ScriptInstance) -> Option<Self::Ref> {
        instance.downcast::<T>()
    }
}
