//! The capability boundary.
//!
//! Everything a script can observe or change lives in the native host. The
//! facade reaches it only through the traits in this module, grouped by
//! concern. [`ScriptHost`] bundles them and is implemented automatically for
//! any type that implements all of them.
//!
//! Every call is a synchronous round trip. Hosts answer "not found" with
//! `false`, `None` or [`EntityId::INVALID`]; [`HostError`] is reserved for
//! requests the host could not carry out.
//!
//! All traits are object safe so scripts can be handed a `&dyn ScriptHost`.

use script_math::{Ray, RayHit, Vec2, Vec3};

use crate::component::ScriptInstance;
use crate::components::BodyType;
use crate::error::HostError;
use crate::handle::{AssetHandle, EntityId};
use crate::input::{KeyCode, MouseButton};
use crate::kind::{KindClass, KindId};

/// Result of a boundary call.
pub type HostResult<T> = Result<T, HostError>;

/// Entity lifecycle and lookup.
pub trait EntityHost {
    /// Destroy an entity. Returns `false` if nothing live was referenced.
    fn destroy_entity(&self, id: EntityId) -> HostResult<bool>;

    /// Find an entity by display name, or [`EntityId::INVALID`].
    fn find_entity_by_name(&self, name: &str) -> HostResult<EntityId>;

    /// Returns `true` if `id` references a live entity.
    fn entity_exists(&self, id: EntityId) -> HostResult<bool>;

    /// Display name of a live entity.
    fn entity_name(&self, id: EntityId) -> HostResult<Option<String>>;
}

/// Kind classification and component lookup.
pub trait ComponentHost {
    /// Decide whether `kind` is engine-native or script-authored.
    fn classify_kind(&self, kind: KindId) -> HostResult<KindClass>;

    /// Returns `true` if the entity carries the native component `kind`.
    fn has_component(&self, id: EntityId, kind: KindId) -> HostResult<bool>;

    /// Returns `true` if a script instance is registered for the entity.
    fn has_script_instance(&self, id: EntityId) -> HostResult<bool>;

    /// The script instance registered for the entity, if it is of `kind`.
    ///
    /// Must return a handle to the same instance on every call.
    fn script_instance(&self, id: EntityId, kind: KindId) -> HostResult<Option<ScriptInstance>>;
}

/// Property access on native components, keyed by entity.
pub trait NativeHost {
    fn transform_position(&self, id: EntityId) -> HostResult<Vec3>;
    fn set_transform_position(&self, id: EntityId, position: Vec3) -> HostResult<()>;
    fn transform_rotation(&self, id: EntityId) -> HostResult<Vec3>;
    fn set_transform_rotation(&self, id: EntityId, rotation: Vec3) -> HostResult<()>;
    fn transform_scale(&self, id: EntityId) -> HostResult<Vec3>;
    fn set_transform_scale(&self, id: EntityId, scale: Vec3) -> HostResult<()>;
    fn transform_forward(&self, id: EntityId) -> HostResult<Vec3>;

    fn rigidbody2d_body_type(&self, id: EntityId) -> HostResult<BodyType>;
    fn set_rigidbody2d_body_type(&self, id: EntityId, body_type: BodyType) -> HostResult<()>;
    fn rigidbody2d_linear_velocity(&self, id: EntityId) -> HostResult<Vec2>;

    /// Project a screen-space point through the entity's camera.
    fn camera_screen_to_world(&self, id: EntityId, screen: Vec2) -> HostResult<Vec3>;

    /// Switch the entity's animator to the state at `state_index`.
    fn animator_play_state(&self, id: EntityId, state_index: i32) -> HostResult<()>;

    /// Attach `target` to the named socket of the entity's skeleton.
    fn skeletal_mesh_attach_to_socket(
        &self,
        id: EntityId,
        target: EntityId,
        socket: &str,
    ) -> HostResult<()>;
}

/// Asset table access.
pub trait AssetHost {
    /// Materialise a new entity from a prefab.
    fn instantiate_prefab(&self, prefab: AssetHandle) -> HostResult<EntityId>;

    /// Materialise a new entity from a prefab with an explicit placement.
    fn instantiate_prefab_with_transform(
        &self,
        prefab: AssetHandle,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> HostResult<EntityId>;
}

/// Frame timing.
pub trait TimeHost {
    /// Seconds elapsed during the last frame.
    fn delta_time(&self) -> f32;

    /// Seconds since the script runtime started.
    fn time_since_start(&self) -> f32;
}

/// Keyboard and mouse polling.
pub trait InputHost {
    /// Held this frame.
    fn key(&self, key: KeyCode) -> bool;
    /// Went down this frame.
    fn key_down(&self, key: KeyCode) -> bool;
    /// Went up this frame.
    fn key_up(&self, key: KeyCode) -> bool;
    fn mouse_button(&self, button: MouseButton) -> bool;
    fn mouse_button_down(&self, button: MouseButton) -> bool;
    fn mouse_button_up(&self, button: MouseButton) -> bool;
    /// Cursor position in screen pixels.
    fn mouse_position(&self) -> Vec2;
}

/// Scene queries answered by the physics world.
pub trait PhysicsHost {
    /// Closest hit along `ray`, if any.
    fn raycast(&self, ray: &Ray) -> HostResult<Option<RayHit>>;
}

/// Messages written by scripts into the host's log.
pub trait LogHost {
    fn log_info(&self, message: &str);
}

/// The full capability set a script may use.
pub trait ScriptHost:
    EntityHost
    + ComponentHost
    + NativeHost
    + AssetHost
    + TimeHost
    + InputHost
    + PhysicsHost
    + LogHost
{
}

impl<T> ScriptHost for T where
    T: EntityHost
        + ComponentHost
        + NativeHost
        + AssetHost
        + TimeHost
        + InputHost
        + PhysicsHost
        + LogHost
        + ?Sized
{
}
