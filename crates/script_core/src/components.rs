//! Proxies for engine-native components.
//!
//! A proxy is nothing but the owner's handle. It is built fresh by every
//! successful resolution and every accessor is a direct round trip to the
//! host; proxies never hold component data. Two proxies of the same kind
//! compare equal when they share an owner.

use serde::{Deserialize, Serialize};

use script_math::{Vec2, Vec3, look_rotation};

use crate::component::{Component, ScriptInstance};
use crate::entity::Entity;
use crate::error::ScriptError;
use crate::handle::EntityId;
use crate::host::NativeHost;
use crate::kind::{ComponentKind, NativeKind};

macro_rules! native_proxy {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            owner: EntityId,
        }

        impl $name {
            /// The native kind this proxy stands for.
            pub const KIND: NativeKind = $kind;
        }

        impl Component for $name {
            fn owner_id(&self) -> EntityId {
                self.owner
            }
        }

        impl ComponentKind for $name {
            type Ref = Self;

            fn type_name() -> &'static str {
                Self::KIND.name()
            }

            fn bind_native(owner: EntityId) -> Option<Self> {
                Some(Self { owner })
            }

            fn from_script(_instance: &ScriptInstance) -> Option<Self> {
                None
            }
        }
    };
}

native_proxy!(
    /// Position, Euler rotation and scale of an entity.
    Transform => NativeKind::Transform
);
native_proxy!(
    /// 2D rigid body.
    Rigidbody2D => NativeKind::Rigidbody2D
);
native_proxy!(
    /// Scene camera.
    Camera => NativeKind::Camera
);
native_proxy!(
    /// Skeletal animation state machine.
    Animator => NativeKind::Animator
);
native_proxy!(
    /// Skinned mesh with named sockets.
    SkeletalMesh => NativeKind::SkeletalMesh
);
native_proxy!(SpriteRenderer => NativeKind::SpriteRenderer);
native_proxy!(BoxCollider2D => NativeKind::BoxCollider2D);
native_proxy!(CircleCollider2D => NativeKind::CircleCollider2D);
native_proxy!(BoxCollider => NativeKind::BoxCollider);
native_proxy!(SphereCollider => NativeKind::SphereCollider);
native_proxy!(MeshCollider => NativeKind::MeshCollider);

impl Transform {
    /// World-space position.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn position(&self, host: &(impl NativeHost + ?Sized)) -> Result<Vec3, ScriptError> {
        Ok(host.transform_position(self.owner)?)
    }

    /// Move the entity.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn set_position(
        &self,
        host: &(impl NativeHost + ?Sized),
        position: Vec3,
    ) -> Result<(), ScriptError> {
        Ok(host.set_transform_position(self.owner, position)?)
    }

    /// Euler rotation in radians (pitch, yaw, roll).
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn rotation(&self, host: &(impl NativeHost + ?Sized)) -> Result<Vec3, ScriptError> {
        Ok(host.transform_rotation(self.owner)?)
    }

    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn set_rotation(
        &self,
        host: &(impl NativeHost + ?Sized),
        rotation: Vec3,
    ) -> Result<(), ScriptError> {
        Ok(host.set_transform_rotation(self.owner, rotation)?)
    }

    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn scale(&self, host: &(impl NativeHost + ?Sized)) -> Result<Vec3, ScriptError> {
        Ok(host.transform_scale(self.owner)?)
    }

    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn set_scale(&self, host: &(impl NativeHost + ?Sized), scale: Vec3) -> Result<(), ScriptError> {
        Ok(host.set_transform_scale(self.owner, scale)?)
    }

    /// Unit vector the entity faces.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn forward(&self, host: &(impl NativeHost + ?Sized)) -> Result<Vec3, ScriptError> {
        Ok(host.transform_forward(self.owner)?)
    }

    /// Rotate the entity to face `target`, with zero roll.
    ///
    /// Leaves the rotation untouched when `target` is the current position.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn look_at(&self, host: &(impl NativeHost + ?Sized), target: Vec3) -> Result<(), ScriptError> {
        let position = self.position(host)?;
        match look_rotation(position, target) {
            Some(rotation) => self.set_rotation(host, rotation),
            None => Ok(()),
        }
    }
}

/// How a 2D rigid body takes part in the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    #[default]
    Static,
    Dynamic,
    Kinematic,
}

impl Rigidbody2D {
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn body_type(&self, host: &(impl NativeHost + ?Sized)) -> Result<BodyType, ScriptError> {
        Ok(host.rigidbody2d_body_type(self.owner)?)
    }

    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn set_body_type(
        &self,
        host: &(impl NativeHost + ?Sized),
        body_type: BodyType,
    ) -> Result<(), ScriptError> {
        Ok(host.set_rigidbody2d_body_type(self.owner, body_type)?)
    }

    /// Linear velocity in world units per second.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn linear_velocity(&self, host: &(impl NativeHost + ?Sized)) -> Result<Vec2, ScriptError> {
        Ok(host.rigidbody2d_linear_velocity(self.owner)?)
    }
}

impl Camera {
    /// Project a screen-space point (pixels, origin top-left) into the world.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn screen_to_world(
        &self,
        host: &(impl NativeHost + ?Sized),
        screen: Vec2,
    ) -> Result<Vec3, ScriptError> {
        Ok(host.camera_screen_to_world(self.owner, screen)?)
    }
}

impl Animator {
    /// Switch to the state at `state_index`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn play_state(&self, host: &(impl NativeHost + ?Sized), state_index: i32) -> Result<(), ScriptError> {
        Ok(host.animator_play_state(self.owner, state_index)?)
    }
}

impl SkeletalMesh {
    /// Attach `target` to the named socket.
    ///
    /// Attaching an invalid entity is refused locally.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::InvalidOperation`] for an invalid target, or
    /// [`ScriptError::Host`] if the host fails.
    pub fn attach_to_socket(
        &self,
        host: &(impl NativeHost + ?Sized),
        target: Entity,
        socket: &str,
    ) -> Result<(), ScriptError> {
        if !target.is_valid() {
            return Err(ScriptError::InvalidOperation("socket target entity is not set"));
        }
        Ok(host.skeletal_mesh_attach_to_socket(self.owner, target.id(), socket)?)
    }
}
