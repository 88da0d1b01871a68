//! Scene storage.
//!
//! The [`SceneWorld`] owns entity allocation and every native component's
//! data. Script instances live in the [`ScriptRegistry`](crate::ScriptRegistry),
//! not here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use script_core::{BodyType, EntityAllocator, EntityId, KindId, NativeKind};
use script_math::{TransformSeed, Vec2};

/// Where a skeletal mesh is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketAttachment {
    /// The entity carrying the socket.
    pub target: EntityId,
    /// Socket name on the target.
    pub socket: String,
}

/// Host-side data of one native component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentData {
    Transform(TransformSeed),
    Rigidbody2D {
        body_type: BodyType,
        linear_velocity: Vec2,
    },
    /// Orthographic camera; `half_height` is half the visible world height.
    Camera { half_height: f32 },
    Animator { state: Option<i32> },
    SkeletalMesh { attachment: Option<SocketAttachment> },
    SphereCollider { radius: f32 },
    /// A native kind that carries no data the host models.
    Marker(NativeKind),
    /// A kind the host was configured to treat as native, by name.
    Custom(String),
}

impl ComponentData {
    /// Default data for a built-in native kind.
    #[must_use]
    pub fn for_kind(kind: NativeKind) -> Self {
        match kind {
            NativeKind::Transform => Self::Transform(TransformSeed::IDENTITY),
            NativeKind::Rigidbody2D => Self::Rigidbody2D {
                body_type: BodyType::default(),
                linear_velocity: Vec2::ZERO,
            },
            NativeKind::Camera => Self::Camera { half_height: 5.0 },
            NativeKind::Animator => Self::Animator { state: None },
            NativeKind::SkeletalMesh => Self::SkeletalMesh { attachment: None },
            NativeKind::SphereCollider => Self::SphereCollider { radius: 0.5 },
            other => Self::Marker(other),
        }
    }

    /// The kind this data is stored under.
    #[must_use]
    pub fn kind_id(&self) -> KindId {
        match self {
            Self::Transform(_) => NativeKind::Transform.kind_id(),
            Self::Rigidbody2D { .. } => NativeKind::Rigidbody2D.kind_id(),
            Self::Camera { .. } => NativeKind::Camera.kind_id(),
            Self::Animator { .. } => NativeKind::Animator.kind_id(),
            Self::SkeletalMesh { .. } => NativeKind::SkeletalMesh.kind_id(),
            Self::SphereCollider { .. } => NativeKind::SphereCollider.kind_id(),
            Self::Marker(kind) => kind.kind_id(),
            Self::Custom(name) => KindId::from_name(name),
        }
    }
}

/// One live entity.
#[derive(Debug, Clone, Default)]
pub struct EntityRecord {
    /// Optional lookup name.
    pub name: Option<String>,
    /// Native component data keyed by kind.
    pub components: HashMap<KindId, ComponentData>,
}

impl EntityRecord {
    /// The entity's transform, if it has one.
    #[must_use]
    pub fn transform(&self) -> Option<&TransformSeed> {
        match self.components.get(&NativeKind::Transform.kind_id()) {
            Some(ComponentData::Transform(seed)) => Some(seed),
            _ => None,
        }
    }
}

/// The canonical scene state of a [`SceneHost`](crate::SceneHost).
#[derive(Debug, Default)]
pub struct SceneWorld {
    /// Generational handle allocator.
    allocator: EntityAllocator,
    /// Live entities.
    records: HashMap<EntityId, EntityRecord>,
}

impl SceneWorld {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an entity with the given components.
    ///
    /// Later entries replace earlier ones of the same kind. Returns `None` if
    /// the allocator is exhausted.
    pub fn spawn(
        &mut self,
        name: Option<String>,
        components: impl IntoIterator<Item = ComponentData>,
    ) -> Option<EntityId> {
        let id = self.allocator.allocate()?;
        let components = components
            .into_iter()
            .map(|data| (data.kind_id(), data))
            .collect();
        self.records.insert(id, EntityRecord { name, components });
        Some(id)
    }

    /// Destroy an entity.
    ///
    /// Returns `true` if the entity was live and has been removed.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.allocator.free(id) {
            return false;
        }
        self.records.remove(&id);
        true
    }

    /// Returns `true` if `id` names a live entity.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.allocator.is_alive(id)
    }

    #[must_use]
    pub fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        self.records.get(&id)
    }

    pub fn record_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.records.get_mut(&id)
    }

    /// Attach or replace a component. Returns `false` if `id` is not live.
    pub fn insert(&mut self, id: EntityId, data: ComponentData) -> bool {
        match self.records.get_mut(&id) {
            Some(record) => {
                record.components.insert(data.kind_id(), data);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the live entity `id` carries `kind`.
    #[must_use]
    pub fn has(&self, id: EntityId, kind: KindId) -> bool {
        self.records
            .get(&id)
            .is_some_and(|record| record.components.contains_key(&kind))
    }

    /// The live entity with the given name and the lowest handle, if any.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.records
            .iter()
            .filter(|(_, record)| record.name.as_deref() == Some(name))
            .map(|(id, _)| *id)
            .min()
    }

    /// Iterate over all live entities.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &EntityRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.records.len()
    }
}
