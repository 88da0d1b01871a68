//! Boundary call accounting.
//!
//! [`RecordingHost`] wraps any host and logs the name of every boundary method
//! called through it, in order. Tests use it to check how many round trips a
//! facade operation costs.

use std::cell::RefCell;

use script_core::{
    AssetHandle, AssetHost, BodyType, ComponentHost, EntityHost, EntityId, HostResult, InputHost,
    KeyCode, KindClass, KindId, LogHost, MouseButton, NativeHost, PhysicsHost, ScriptInstance,
    TimeHost,
};
use script_math::{Ray, RayHit, Vec2, Vec3};

/// A host wrapper that records every boundary call.
#[derive(Debug)]
pub struct RecordingHost<H> {
    inner: H,
    log: RefCell<Vec<&'static str>>,
}

impl<H> RecordingHost<H> {
    #[must_use]
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            log: RefCell::new(Vec::new()),
        }
    }

    /// The wrapped host. Calls made through it directly are not recorded.
    #[must_use]
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Total boundary calls recorded.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.log.borrow().len()
    }

    /// Calls to the boundary method `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.log.borrow().iter().filter(|n| **n == name).count()
    }

    /// Method names in call order.
    #[must_use]
    pub fn log(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }

    pub fn reset(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, name: &'static str) -> &H {
        self.log.borrow_mut().push(name);
        &self.inner
    }
}

impl<H: EntityHost> EntityHost for RecordingHost<H> {
    fn destroy_entity(&self, id: EntityId) -> HostResult<bool> {
        self.record("destroy_entity").destroy_entity(id)
    }

    fn find_entity_by_name(&self, name: &str) -> HostResult<EntityId> {
        self.record("find_entity_by_name").find_entity_by_name(name)
    }

    fn entity_exists(&self, id: EntityId) -> HostResult<bool> {
        self.record("entity_exists").entity_exists(id)
    }

    fn entity_name(&self, id: EntityId) -> HostResult<Option<String>> {
        self.record("entity_name").entity_name(id)
    }
}

impl<H: ComponentHost> ComponentHost for RecordingHost<H> {
    fn classify_kind(&self, kind: KindId) -> HostResult<KindClass> {
        self.record("classify_kind").classify_kind(kind)
    }

    fn has_component(&self, id: EntityId, kind: KindId) -> HostResult<bool> {
        self.record("has_component").has_component(id, kind)
    }

    fn has_script_instance(&self, id: EntityId) -> HostResult<bool> {
        self.record("has_script_instance").has_script_instance(id)
    }

    fn script_instance(&self, id: EntityId, kind: KindId) -> HostResult<Option<ScriptInstance>> {
        self.record("script_instance").script_instance(id, kind)
    }
}

impl<H: NativeHost> NativeHost for RecordingHost<H> {
    fn transform_position(&self, id: EntityId) -> HostResult<Vec3> {
        self.record("transform_position").transform_position(id)
    }

    fn set_transform_position(&self, id: EntityId, position: Vec3) -> HostResult<()> {
        self.record("set_transform_position")
            .set_transform_position(id, position)
    }

    fn transform_rotation(&self, id: EntityId) -> HostResult<Vec3> {
        self.record("transform_rotation").transform_rotation(id)
    }

    fn set_transform_rotation(&self, id: EntityId, rotation: Vec3) -> HostResult<()> {
        self.record("set_transform_rotation")
            .set_transform_rotation(id, rotation)
    }

    fn transform_scale(&self, id: EntityId) -> HostResult<Vec3> {
        self.record("transform_scale").transform_scale(id)
    }

    fn set_transform_scale(&self, id: EntityId, scale: Vec3) -> HostResult<()> {
        self.record("set_transform_scale").set_transform_scale(id, scale)
    }

    fn transform_forward(&self, id: EntityId) -> HostResult<Vec3> {
        self.record("transform_forward").transform_forward(id)
    }

    fn rigidbody2d_body_type(&self, id: EntityId) -> HostResult<BodyType> {
        self.record("rigidbody2d_body_type").rigidbody2d_body_type(id)
    }

    fn set_rigidbody2d_body_type(&self, id: EntityId, body_type: BodyType) -> HostResult<()> {
        self.record("set_rigidbody2d_body_type")
            .set_rigidbody2d_body_type(id, body_type)
    }

    fn rigidbody2d_linear_velocity(&self, id: EntityId) -> HostResult<Vec2> {
        self.record("rigidbody2d_linear_velocity")
            .rigidbody2d_linear_velocity(id)
    }

    fn camera_screen_to_world(&self, id: EntityId, screen: Vec2) -> HostResult<Vec3> {
        self.record("camera_screen_to_world")
            .camera_screen_to_world(id, screen)
    }

    fn animator_play_state(&self, id: EntityId, state_index: i32) -> HostResult<()> {
        self.record("animator_play_state")
            .animator_play_state(id, state_index)
    }

    fn skeletal_mesh_attach_to_socket(
        &self,
        id: EntityId,
        target: EntityId,
        socket: &str,
    ) -> HostResult<()> {
        self.record("skeletal_mesh_attach_to_socket")
            .skeletal_mesh_attach_to_socket(id, target, socket)
    }
}

impl<H: AssetHost> AssetHost for RecordingHost<H> {
    fn instantiate_prefab(&self, prefab: AssetHandle) -> HostResult<EntityId> {
        self.record("instantiate_prefab").instantiate_prefab(prefab)
    }

    fn instantiate_prefab_with_transform(
        &self,
        prefab: AssetHandle,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> HostResult<EntityId> {
        self.record("instantiate_prefab_with_transform")
            .instantiate_prefab_with_transform(prefab, position, rotation, scale)
    }
}

impl<H: TimeHost> TimeHost for RecordingHost<H> {
    fn delta_time(&self) -> f32 {
        self.record("delta_time").delta_time()
    }

    fn time_since_start(&self) -> f32 {
        self.record("time_since_start").time_since_start()
    }
}

impl<H: InputHost> InputHost for RecordingHost<H> {
    fn key(&self, key: KeyCode) -> bool {
        self.record("key").key(key)
    }

    fn key_down(&self, key: KeyCode) -> bool {
        self.record("key_down").key_down(key)
    }

    fn key_up(&self, key: KeyCode) -> bool {
        self.record("key_up").key_up(key)
    }

    fn mouse_button(&self, button: MouseButton) -> bool {
        self.record("mouse_button").mouse_button(button)
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.record("mouse_button_down").mouse_button_down(button)
    }

    fn mouse_button_up(&self, button: MouseButton) -> bool {
        self.record("mouse_button_up").mouse_button_up(button)
    }

    fn mouse_position(&self) -> Vec2 {
        self.record("mouse_position").mouse_position()
    }
}

impl<H: PhysicsHost> PhysicsHost for RecordingHost<H> {
    fn raycast(&self, ray: &Ray) -> HostResult<Option<RayHit>> {
        self.record("raycast").raycast(ray)
    }
}

impl<H: LogHost> LogHost for RecordingHost<H> {
    fn log_info(&self, message: &str) {
        self.record("log_info").log_info(message);
    }
}
