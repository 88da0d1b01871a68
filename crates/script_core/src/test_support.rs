//! Call-counting stub host for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use script_math::{Ray, RayHit, TransformSeed, Vec2, Vec3, forward_from_euler};

use crate::component::{Component, ScriptComponent, ScriptInstance};
use crate::components::BodyType;
use crate::error::HostError;
use crate::handle::{AssetHandle, EntityAllocator, EntityId};
use crate::host::{
    AssetHost, ComponentHost, EntityHost, HostResult, InputHost, LogHost, NativeHost, PhysicsHost,
    TimeHost,
};
use crate::input::{KeyCode, MouseButton};
use crate::kind::{KindClass, KindId, NativeKind};

#[derive(Default)]
pub(crate) struct StubHost {
    calls: Cell<usize>,
    fail_next: Cell<bool>,
    allocator: RefCell<EntityAllocator>,
    components: RefCell<HashMap<EntityId, HashSet<KindId>>>,
    names: RefCell<HashMap<EntityId, String>>,
    scripts: RefCell<HashMap<EntityId, ScriptInstance>>,
    extra_native: RefCell<HashSet<KindId>>,
    transforms: RefCell<HashMap<EntityId, TransformSeed>>,
    last_placement: Cell<Option<TransformSeed>>,
    logged: RefCell<Vec<String>>,
}

impl StubHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of boundary calls made so far. Setup helpers are not counted.
    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    pub(crate) fn fail_next(&self) {
        self.fail_next.set(true);
    }

    pub(crate) fn logged(&self) -> Vec<String> {
        self.logged.borrow().clone()
    }

    pub(crate) fn last_placement(&self) -> Option<TransformSeed> {
        self.last_placement.get()
    }

    pub(crate) fn spawn_with(&self, kinds: &[KindId]) -> EntityId {
        let id = self
            .allocator
            .borrow_mut()
            .allocate()
            .expect("stub allocator exhausted");
        self.components
            .borrow_mut()
            .insert(id, kinds.iter().copied().collect());
        self.transforms
            .borrow_mut()
            .insert(id, TransformSeed::IDENTITY);
        id
    }

    pub(crate) fn set_name(&self, id: EntityId, name: &str) {
        self.names.borrow_mut().insert(id, name.to_string());
    }

    pub(crate) fn attach_script<T: ScriptComponent>(&self, id: EntityId, component: T) {
        self.scripts
            .borrow_mut()
            .insert(id, ScriptInstance::new(component));
    }

    pub(crate) fn classify_as_native(&self, name: &str) {
        self.extra_native.borrow_mut().insert(KindId::from_name(name));
    }

    fn hit(&self) -> HostResult<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_next.replace(false) {
            return Err(HostError::Rejected("stub failure".to_string()));
        }
        Ok(())
    }

    fn alive(&self, id: EntityId) -> HostResult<()> {
        if self.allocator.borrow().is_alive(id) {
            Ok(())
        } else {
            Err(HostError::EntityNotFound(id))
        }
    }

    fn with_transform<R>(
        &self,
        id: EntityId,
        f: impl FnOnce(&mut TransformSeed) -> R,
    ) -> HostResult<R> {
        self.hit()?;
        self.alive(id)?;
        let mut transforms = self.transforms.borrow_mut();
        let transform = transforms.entry(id).or_default();
        Ok(f(transform))
    }

    fn spawn_placed(&self, placement: TransformSeed) -> EntityId {
        let id = self.spawn_with(&[NativeKind::Transform.kind_id()]);
        self.transforms.borrow_mut().insert(id, placement);
        id
    }
}

impl EntityHost for StubHost {
    fn destroy_entity(&self, id: EntityId) -> HostResult<bool> {
        self.hit()?;
        let freed = self.allocator.borrow_mut().free(id);
        if freed {
            self.components.borrow_mut().remove(&id);
            self.scripts.borrow_mut().remove(&id);
            self.names.borrow_mut().remove(&id);
        }
        Ok(freed)
    }

    fn find_entity_by_name(&self, name: &str) -> HostResult<EntityId> {
        self.hit()?;
        Ok(self
            .names
            .borrow()
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map_or(EntityId::INVALID, |(id, _)| *id))
    }

    fn entity_exists(&self, id: EntityId) -> HostResult<bool> {
        self.hit()?;
        Ok(self.allocator.borrow().is_alive(id))
    }

    fn entity_name(&self, id: EntityId) -> HostResult<Option<String>> {
        self.hit()?;
        Ok(self.names.borrow().get(&id).cloned())
    }
}

impl ComponentHost for StubHost {
    fn classify_kind(&self, kind: KindId) -> HostResult<KindClass> {
        self.hit()?;
        if NativeKind::from_kind_id(kind).is_some() || self.extra_native.borrow().contains(&kind) {
            Ok(KindClass::Native)
        } else {
            Ok(KindClass::Script)
        }
    }

    fn has_component(&self, id: EntityId, kind: KindId) -> HostResult<bool> {
        self.hit()?;
        Ok(self
            .components
            .borrow()
            .get(&id)
            .is_some_and(|kinds| kinds.contains(&kind)))
    }

    fn has_script_instance(&self, id: EntityId) -> HostResult<bool> {
        self.hit()?;
        Ok(self.scripts.borrow().contains_key(&id))
    }

    fn script_instance(&self, id: EntityId, kind: KindId) -> HostResult<Option<ScriptInstance>> {
        self.hit()?;
        Ok(self
            .scripts
            .borrow()
            .get(&id)
            .filter(|instance| instance.kind() == kind)
            .cloned())
    }
}

impl NativeHost for StubHost {
    fn transform_position(&self, id: EntityId) -> HostResult<Vec3> {
        self.with_transform(id, |t| t.position)
    }

    fn set_transform_position(&self, id: EntityId, position: Vec3) -> HostResult<()> {
        self.with_transform(id, |t| t.position = position)
    }

    fn transform_rotation(&self, id: EntityId) -> HostResult<Vec3> {
        self.with_transform(id, |t| t.rotation)
    }

    fn set_transform_rotation(&self, id: EntityId, rotation: Vec3) -> HostResult<()> {
        self.with_transform(id, |t| t.rotation = rotation)
    }

    fn transform_scale(&self, id: EntityId) -> HostResult<Vec3> {
        self.with_transform(id, |t| t.scale)
    }

    fn set_transform_scale(&self, id: EntityId, scale: Vec3) -> HostResult<()> {
        self.with_transform(id, |t| t.scale = scale)
    }

    fn transform_forward(&self, id: EntityId) -> HostResult<Vec3> {
        self.with_transform(id, |t| forward_from_euler(t.rotation))
    }

    fn rigidbody2d_body_type(&self, id: EntityId) -> HostResult<BodyType> {
        self.hit()?;
        self.alive(id)?;
        Ok(BodyType::Static)
    }

    fn set_rigidbody2d_body_type(&self, id: EntityId, _body_type: BodyType) -> HostResult<()> {
        self.hit()?;
        self.alive(id)
    }

    fn rigidbody2d_linear_velocity(&self, id: EntityId) -> HostResult<Vec2> {
        self.hit()?;
        self.alive(id)?;
        Ok(Vec2::ZERO)
    }

    fn camera_screen_to_world(&self, id: EntityId, screen: Vec2) -> HostResult<Vec3> {
        self.hit()?;
        self.alive(id)?;
        Ok(screen.extend(0.0))
    }

    fn animator_play_state(&self, id: EntityId, _state_index: i32) -> HostResult<()> {
        self.hit()?;
        self.alive(id)
    }

    fn skeletal_mesh_attach_to_socket(
        &self,
        id: EntityId,
        target: EntityId,
        _socket: &str,
    ) -> HostResult<()> {
        self.hit()?;
        self.alive(id)?;
        self.alive(target)
    }
}

impl AssetHost for StubHost {
    fn instantiate_prefab(&self, _prefab: AssetHandle) -> HostResult<EntityId> {
        self.hit()?;
        self.last_placement.set(None);
        Ok(self.spawn_placed(TransformSeed::IDENTITY))
    }

    fn instantiate_prefab_with_transform(
        &self,
        _prefab: AssetHandle,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> HostResult<EntityId> {
        self.hit()?;
        let placement = TransformSeed::new(position, rotation, scale);
        self.last_placement.set(Some(placement));
        Ok(self.spawn_placed(placement))
    }
}

impl TimeHost for StubHost {
    fn delta_time(&self) -> f32 {
        self.calls.set(self.calls.get() + 1);
        1.0 / 60.0
    }

    fn time_since_start(&self) -> f32 {
        self.calls.set(self.calls.get() + 1);
        0.0
    }
}

impl LogHost for StubHost {
    fn log_info(&self, message: &str) {
        self.calls.set(self.calls.get() + 1);
        self.logged.borrow_mut().push(message.to_string());
    }
}

impl InputHost for StubHost {
    fn key(&self, _key: KeyCode) -> bool {
        false
    }

    fn key_down(&self, _key: KeyCode) -> bool {
        false
    }

    fn key_up(&self, _key: KeyCode) -> bool {
        false
    }

    fn mouse_button(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_button_down(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_button_up(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_position(&self) -> Vec2 {
        Vec2::ZERO
    }
}

impl PhysicsHost for StubHost {
    fn raycast(&self, ray: &Ray) -> HostResult<Option<RayHit>> {
        self.hit()?;
        Ok(Some(RayHit {
            position: ray.point_at(ray.length),
            normal: -ray.direction.normalize_or_zero(),
            distance: ray.length,
        }))
    }
}

/// Script component used by resolution tests.
pub(crate) struct Beacon {
    owner: EntityId,
}

impl Beacon {
    pub(crate) fn new(owner: EntityId) -> Self {
        Self { owner }
    }
}

impl Component for Beacon {
    fn owner_id(&self) -> EntityId {
        self.owner
    }
}

impl ScriptComponent for Beacon {
    fn type_name() -> &'static str {
        "Beacon"
    }
}

/// A second script type, never registered by the stub helpers.
pub(crate) struct Other {
    owner: EntityId,
}

impl Component for Other {
    fn owner_id(&self) -> EntityId {
        self.owner
    }
}

impl ScriptComponent for Other {
    fn type_name() -> &'static str {
        "Other"
    }
}
