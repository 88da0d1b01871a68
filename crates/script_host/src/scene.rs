//! The in-process reference host.
//!
//! [`SceneHost`] implements every boundary trait over a [`SceneWorld`], a
//! [`ScriptRegistry`], a prefab table and per-frame input and clock state.
//! All trait methods take `&self`; state sits behind `RefCell`/`Cell` and no
//! borrow outlives a single boundary call, so scripts may call back into the
//! host from their hooks.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use script_core::{
    AssetHandle, AssetHost, BodyType, ComponentHost, EntityHost, EntityId, HostError, HostResult,
    InputHost, KeyCode, KindClass, KindId, LogHost, MouseButton, NativeHost, NativeKind,
    PhysicsHost, Prefab, ScriptComponent, ScriptInstance, TimeHost,
};
use script_math::{Ray, RayHit, TransformSeed, Vec2, Vec3, forward_from_euler};

use crate::config::HostConfig;
use crate::error::SceneError;
use crate::prefab::PrefabDef;
use crate::registry::ScriptRegistry;
use crate::world::{ComponentData, SceneWorld, SocketAttachment};

type ScriptFactory = Rc<dyn Fn(EntityId) -> ScriptInstance>;

struct PrefabEntry {
    def: PrefabDef,
    script: Option<ScriptFactory>,
}

impl std::fmt::Debug for PrefabEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefabEntry")
            .field("def", &self.def)
            .field("has_script", &self.script.is_some())
            .finish()
    }
}

/// Keyboard and mouse state for the current frame.
#[derive(Debug, Default)]
struct InputState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
    released: HashSet<KeyCode>,
    buttons_held: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_position: Vec2,
}

impl InputState {
    fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }
}

/// Reference implementation of the script boundary.
#[derive(Debug)]
pub struct SceneHost {
    config: HostConfig,
    /// Every kind classified as native: the built-ins plus configured names.
    native_kinds: HashSet<KindId>,
    world: RefCell<SceneWorld>,
    scripts: RefCell<ScriptRegistry>,
    prefabs: RefCell<HashMap<AssetHandle, PrefabEntry>>,
    input: RefCell<InputState>,
    /// Frames completed so far.
    frame: Cell<u64>,
    elapsed: Cell<f32>,
}

impl SceneHost {
    /// Create an empty scene.
    #[must_use]
    pub fn new(config: HostConfig) -> Self {
        let native_kinds = NativeKind::ALL
            .into_iter()
            .map(NativeKind::kind_id)
            .chain(config.native_kinds.iter().map(|name| KindId::from_name(name)))
            .collect();

        info!(
            scene = config.scene_name,
            fixed_delta = config.fixed_delta,
            extra_native_kinds = config.native_kinds.len(),
            "scene host ready"
        );

        Self {
            config,
            native_kinds,
            world: RefCell::new(SceneWorld::new()),
            scripts: RefCell::new(ScriptRegistry::new()),
            prefabs: RefCell::new(HashMap::new()),
            input: RefCell::new(InputState::default()),
            frame: Cell::new(0),
            elapsed: Cell::new(0.0),
        }
    }

    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Frames completed so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.world.borrow().entity_count()
    }

    /// Returns the number of registered script instances.
    #[must_use]
    pub fn script_count(&self) -> usize {
        self.scripts.borrow().len()
    }

    // -- scene construction ------------------------------------------------

    /// Create an entity with the given components.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Rejected`] if the allocator is exhausted.
    pub fn spawn(
        &self,
        name: Option<&str>,
        components: impl IntoIterator<Item = ComponentData>,
    ) -> HostResult<EntityId> {
        let id = self
            .world
            .borrow_mut()
            .spawn(name.map(str::to_string), components)
            .ok_or_else(|| HostError::Rejected("entity allocator exhausted".to_string()))?;
        debug!(entity = %id, name, "spawned entity");
        Ok(id)
    }

    /// Attach or replace a native component.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::EntityNotFound`] if `id` is not live.
    pub fn attach_component(&self, id: EntityId, data: ComponentData) -> HostResult<()> {
        if self.world.borrow_mut().insert(id, data) {
            Ok(())
        } else {
            Err(HostError::EntityNotFound(id))
        }
    }

    /// A copy of the data stored for `kind` on `id`.
    #[must_use]
    pub fn component(&self, id: EntityId, kind: KindId) -> Option<ComponentData> {
        self.world
            .borrow()
            .record(id)
            .and_then(|record| record.components.get(&kind).cloned())
    }

    /// Give `id` a lookup name.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::EntityNotFound`] if `id` is not live.
    pub fn set_entity_name(&self, id: EntityId, name: &str) -> HostResult<()> {
        let mut world = self.world.borrow_mut();
        let record = world.record_mut(id).ok_or(HostError::EntityNotFound(id))?;
        record.name = Some(name.to_string());
        Ok(())
    }

    /// Register `component` as the script instance of its owner.
    ///
    /// Any previous instance on the same entity is retired. The new one runs
    /// its create and start hooks on the next runtime pass.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::EntityNotFound`] if the owner is not live.
    pub fn attach_script<T: ScriptComponent>(&self, component: T) -> HostResult<ScriptInstance> {
        self.register_script(ScriptInstance::new(component))
    }

    fn register_script(&self, instance: ScriptInstance) -> HostResult<ScriptInstance> {
        let owner = instance.owner_id();
        if !self.world.borrow().contains(owner) {
            return Err(HostError::EntityNotFound(owner));
        }
        if let Some(replaced) = self.scripts.borrow_mut().register(instance.clone()) {
            debug!(entity = %owner, kind = %replaced.kind(), "replaced script instance");
        }
        trace!(entity = %owner, kind = %instance.kind(), "registered script instance");
        Ok(instance)
    }

    // -- prefabs -----------------------------------------------------------

    /// Add a prefab to the asset table under a fresh handle.
    pub fn register_prefab(&self, def: PrefabDef) -> Prefab {
        let mut prefabs = self.prefabs.borrow_mut();
        let handle = loop {
            let candidate = AssetHandle::from_raw(Uuid::new_v4().as_u64_pair().0);
            if !candidate.is_invalid() && !prefabs.contains_key(&candidate) {
                break candidate;
            }
        };
        debug!(prefab = %handle, name = def.name, "registered prefab");
        prefabs.insert(handle, PrefabEntry { def, script: None });
        Prefab::from_handle(handle)
    }

    /// Decode a MessagePack prefab definition and register it.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Decode`] if the bytes are not a prefab.
    pub fn load_prefab(&self, bytes: &[u8]) -> Result<Prefab, SceneError> {
        Ok(self.register_prefab(PrefabDef::from_bytes(bytes)?))
    }

    /// Attach a script to every future instance of `prefab`.
    ///
    /// `factory` receives the new entity's handle and must build a component
    /// owned by it.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::AssetNotFound`] if the prefab is not registered.
    pub fn set_prefab_script<T, F>(&self, prefab: Prefab, factory: F) -> HostResult<()>
    where
        T: ScriptComponent,
        F: Fn(EntityId) -> T + 'static,
    {
        let handle = prefab.handle();
        let mut prefabs = self.prefabs.borrow_mut();
        let entry = prefabs
            .get_mut(&handle)
            .ok_or(HostError::AssetNotFound(handle))?;
        entry.script = Some(Rc::new(move |id| ScriptInstance::new(factory(id))));
        Ok(())
    }

    fn spawn_prefab(
        &self,
        handle: AssetHandle,
        placement: Option<TransformSeed>,
    ) -> HostResult<EntityId> {
        let (id, factory) = {
            let prefabs = self.prefabs.borrow();
            let entry = prefabs.get(&handle).ok_or(HostError::AssetNotFound(handle))?;
            let placement = placement.unwrap_or(entry.def.transform);
            let id = self.spawn(
                Some(entry.def.name.as_str()),
                entry.def.instance_components(placement),
            )?;
            (id, entry.script.clone())
        };

        if let Some(factory) = factory {
            if let Err(err) = self.attach_prefab_script(handle, id, factory.as_ref()) {
                // Instantiation is all or nothing.
                self.world.borrow_mut().despawn(id);
                return Err(err);
            }
        }

        debug!(prefab = %handle, entity = %id, placed = placement.is_some(), "instantiated prefab");
        Ok(id)
    }

    fn attach_prefab_script(
        &self,
        handle: AssetHandle,
        id: EntityId,
        factory: &dyn Fn(EntityId) -> ScriptInstance,
    ) -> HostResult<()> {
        let instance = factory(id);
        if instance.owner_id() != id {
            warn!(prefab = %handle, entity = %id, owner = %instance.owner_id(), "prefab script built for another entity");
            return Err(HostError::Rejected(
                "prefab script owner does not match the new entity".to_string(),
            ));
        }
        self.register_script(instance)?;
        Ok(())
    }

    // -- input -------------------------------------------------------------

    pub fn press_key(&self, key: KeyCode) {
        let mut input = self.input.borrow_mut();
        if input.held.insert(key) {
            input.pressed.insert(key);
        }
    }

    pub fn release_key(&self, key: KeyCode) {
        let mut input = self.input.borrow_mut();
        if input.held.remove(&key) {
            input.released.insert(key);
        }
    }

    pub fn press_mouse_button(&self, button: MouseButton) {
        let mut input = self.input.borrow_mut();
        if input.buttons_held.insert(button) {
            input.buttons_pressed.insert(button);
        }
    }

    pub fn release_mouse_button(&self, button: MouseButton) {
        let mut input = self.input.borrow_mut();
        if input.buttons_held.remove(&button) {
            input.buttons_released.insert(button);
        }
    }

    pub fn set_mouse_position(&self, position: Vec2) {
        self.input.borrow_mut().mouse_position = position;
    }

    // -- runtime plumbing --------------------------------------------------

    pub(crate) fn take_pending_scripts(&self) -> Vec<ScriptInstance> {
        self.scripts.borrow_mut().take_pending()
    }

    pub(crate) fn take_retired_scripts(&self) -> Vec<ScriptInstance> {
        self.scripts.borrow_mut().take_retired()
    }

    pub(crate) fn started_scripts(&self) -> Vec<ScriptInstance> {
        self.scripts.borrow().started()
    }

    pub(crate) fn is_script_live(&self, instance: &ScriptInstance) -> bool {
        self.scripts.borrow().is_live(instance)
    }

    pub(crate) fn drain_scripts(&self) -> Vec<ScriptInstance> {
        self.scripts.borrow_mut().drain()
    }

    /// Close the current frame: advance the clock and clear edge-triggered
    /// input.
    pub(crate) fn advance_frame(&self) {
        self.elapsed.set(self.elapsed.get() + self.config.fixed_delta);
        self.frame.set(self.frame.get() + 1);
        self.input.borrow_mut().end_frame();
    }

    // -- native component access ------------------------------------------

    fn with_component<R>(
        &self,
        id: EntityId,
        kind: NativeKind,
        f: impl FnOnce(&mut ComponentData) -> Option<R>,
    ) -> HostResult<R> {
        let mut world = self.world.borrow_mut();
        let record = world.record_mut(id).ok_or(HostError::EntityNotFound(id))?;
        let kind = kind.kind_id();
        record
            .components
            .get_mut(&kind)
            .and_then(f)
            .ok_or(HostError::MissingComponent { entity: id, kind })
    }

    fn with_transform<R>(
        &self,
        id: EntityId,
        f: impl FnOnce(&mut TransformSeed) -> R,
    ) -> HostResult<R> {
        self.with_component(id, NativeKind::Transform, |data| match data {
            ComponentData::Transform(seed) => Some(f(seed)),
            _ => None,
        })
    }
}

impl EntityHost for SceneHost {
    fn destroy_entity(&self, id: EntityId) -> HostResult<bool> {
        if !self.world.borrow_mut().despawn(id) {
            warn!(entity = %id, "destroy of unknown or stale entity");
            return Ok(false);
        }
        self.scripts.borrow_mut().remove(id);
        debug!(entity = %id, "destroyed entity");
        Ok(true)
    }

    fn find_entity_by_name(&self, name: &str) -> HostResult<EntityId> {
        Ok(self
            .world
            .borrow()
            .find_by_name(name)
            .unwrap_or(EntityId::INVALID))
    }

    fn entity_exists(&self, id: EntityId) -> HostResult<bool> {
        Ok(self.world.borrow().contains(id))
    }

    fn entity_name(&self, id: EntityId) -> HostResult<Option<String>> {
        let world = self.world.borrow();
        let record = world.record(id).ok_or(HostError::EntityNotFound(id))?;
        Ok(record.name.clone())
    }
}

impl ComponentHost for SceneHost {
    fn classify_kind(&self, kind: KindId) -> HostResult<KindClass> {
        if self.native_kinds.contains(&kind) {
            Ok(KindClass::Native)
        } else {
            Ok(KindClass::Script)
        }
    }

    fn has_component(&self, id: EntityId, kind: KindId) -> HostResult<bool> {
        Ok(self.world.borrow().has(id, kind))
    }

    fn has_script_instance(&self, id: EntityId) -> HostResult<bool> {
        Ok(self.scripts.borrow().contains(id))
    }

    fn script_instance(&self, id: EntityId, kind: KindId) -> HostResult<Option<ScriptInstance>> {
        Ok(self
            .scripts
            .borrow()
            .get(id)
            .filter(|instance| instance.kind() == kind)
            .cloned())
    }
}

impl NativeHost for SceneHost {
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
        self.with_component(id, NativeKind::Rigidbody2D, |data| match data {
            ComponentData::Rigidbody2D { body_type, .. } => Some(*body_type),
            _ => None,
        })
    }

    fn set_rigidbody2d_body_type(&self, id: EntityId, body_type: BodyType) -> HostResult<()> {
        self.with_component(id, NativeKind::Rigidbody2D, |data| match data {
            ComponentData::Rigidbody2D { body_type: slot, .. } => {
                *slot = body_type;
                Some(())
            }
            _ => None,
        })
    }

    fn rigidbody2d_linear_velocity(&self, id: EntityId) -> HostResult<Vec2> {
        self.with_component(id, NativeKind::Rigidbody2D, |data| match data {
            ComponentData::Rigidbody2D {
                linear_velocity, ..
            } => Some(*linear_velocity),
            _ => None,
        })
    }

    fn camera_screen_to_world(&self, id: EntityId, screen: Vec2) -> HostResult<Vec3> {
        let world = self.world.borrow();
        let record = world.record(id).ok_or(HostError::EntityNotFound(id))?;
        let kind = NativeKind::Camera.kind_id();
        let Some(ComponentData::Camera { half_height }) = record.components.get(&kind) else {
            return Err(HostError::MissingComponent { entity: id, kind });
        };
        let center = record.transform().map_or(Vec3::ZERO, |t| t.position);

        // Screen origin is the top-left corner, y grows downwards.
        let viewport = self.config.viewport;
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Err(HostError::Rejected("viewport has no area".to_string()));
        }
        let ndc = Vec2::new(
            screen.x / viewport.x * 2.0 - 1.0,
            1.0 - screen.y / viewport.y * 2.0,
        );
        let aspect = viewport.x / viewport.y;
        Ok(Vec3::new(
            center.x + ndc.x * half_height * aspect,
            center.y + ndc.y * half_height,
            0.0,
        ))
    }

    fn animator_play_state(&self, id: EntityId, state_index: i32) -> HostResult<()> {
        if state_index < 0 {
            return Err(HostError::Rejected(format!(
                "animator state index {state_index} is negative"
            )));
        }
        self.with_component(id, NativeKind::Animator, |data| match data {
            ComponentData::Animator { state } => {
                *state = Some(state_index);
                Some(())
            }
            _ => None,
        })
    }

    fn skeletal_mesh_attach_to_socket(
        &self,
        id: EntityId,
        target: EntityId,
        socket: &str,
    ) -> HostResult<()> {
        if !self.world.borrow().contains(target) {
            return Err(HostError::EntityNotFound(target));
        }
        if socket.is_empty() {
            return Err(HostError::Rejected("socket name is empty".to_string()));
        }
        self.with_component(id, NativeKind::SkeletalMesh, |data| match data {
            ComponentData::SkeletalMesh { attachment } => {
                *attachment = Some(SocketAttachment {
                    target,
                    socket: socket.to_string(),
                });
                Some(())
            }
            _ => None,
        })
    }
}

impl AssetHost for SceneHost {
    fn instantiate_prefab(&self, prefab: AssetHandle) -> HostResult<EntityId> {
        self.spawn_prefab(prefab, None)
    }

    fn instantiate_prefab_with_transform(
        &self,
        prefab: AssetHandle,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> HostResult<EntityId> {
        self.spawn_prefab(prefab, Some(TransformSeed::new(position, rotation, scale)))
    }
}

impl TimeHost for SceneHost {
    fn delta_time(&self) -> f32 {
        self.config.fixed_delta
    }

    fn time_since_start(&self) -> f32 {
        self.elapsed.get()
    }
}

impl LogHost for SceneHost {
    fn log_info(&self, message: &str) {
        info!(
            target: "script",
            scene = self.config.scene_name,
            frame = self.frame.get(),
            "{message}"
        );
    }
}

impl InputHost for SceneHost {
    fn key(&self, key: KeyCode) -> bool {
        self.input.borrow().held.contains(&key)
    }

    fn key_down(&self, key: KeyCode) -> bool {
        self.input.borrow().pressed.contains(&key)
    }

    fn key_up(&self, key: KeyCode) -> bool {
        self.input.borrow().released.contains(&key)
    }

    fn mouse_button(&self, button: MouseButton) -> bool {
        self.input.borrow().buttons_held.contains(&button)
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.input.borrow().buttons_pressed.contains(&button)
    }

    fn mouse_button_up(&self, button: MouseButton) -> bool {
        self.input.borrow().buttons_released.contains(&button)
    }

    fn mouse_position(&self) -> Vec2 {
        self.input.borrow().mouse_position
    }
}

impl PhysicsHost for SceneHost {
    /// Closest hit against entities carrying both a sphere collider and a
    /// transform. The radius scales with the largest transform scale axis.
    fn raycast(&self, ray: &Ray) -> HostResult<Option<RayHit>> {
        let sphere = NativeKind::SphereCollider.kind_id();
        let world = self.world.borrow();

        let mut closest: Option<(EntityId, RayHit)> = None;
        for (id, record) in world.iter() {
            let Some(ComponentData::SphereCollider { radius }) = record.components.get(&sphere)
            else {
                continue;
            };
            let Some(transform) = record.transform() else {
                continue;
            };
            let center = transform.position;
            let radius = radius * transform.scale.abs().max_element();
            let Some(distance) = ray.intersect_sphere(center, radius) else {
                continue;
            };
            if closest.is_some_and(|(_, hit)| hit.distance <= distance) {
                continue;
            }
            let position = ray.point_at(distance);
            closest = Some((
                id,
                RayHit {
                    position,
                    normal: (position - center).normalize_or_zero(),
                    distance,
                },
            ));
        }

        trace!(
            origin = ?ray.origin,
            direction = ?ray.direction,
            hit = ?closest.map(|(id, _)| id),
            "raycast"
        );
        Ok(closest.map(|(_, hit)| hit))
    }
}

#[cfg(test)]
mod tests {
    use script_core::{
        Camera, Component, Entity, Rigidbody2D, Script, ScriptError, SkeletalMesh, Transform,
    };
    use script_math::{EPSILON, approximately_equal};

    use super::*;

    struct Turret {
        owner: EntityId,
        shots: u32,
    }

    impl Component for Turret {
        fn owner_id(&self) -> EntityId {
            self.owner
        }
    }

    impl ScriptComponent for Turret {
        fn type_name() -> &'static str {
            "Turret"
        }
    }

    fn host() -> SceneHost {
        SceneHost::new(HostConfig::new("test"))
    }

    fn spawn_transform(host: &SceneHost, name: &str) -> EntityId {
        host.spawn(Some(name), [ComponentData::for_kind(NativeKind::Transform)])
            .unwrap()
    }

    #[test]
    fn test_classification() {
        let host = SceneHost::new(HostConfig::new("test").with_native_kind("ParticleSystem"));
        assert_eq!(
            host.classify_kind(NativeKind::Camera.kind_id()).unwrap(),
            KindClass::Native
        );
        assert_eq!(
            host.classify_kind(KindId::from_name("ParticleSystem")).unwrap(),
            KindClass::Native
        );
        assert_eq!(
            host.classify_kind(KindId::from_name("Turret")).unwrap(),
            KindClass::Script
        );
    }

    #[test]
    fn test_destroy_stale_handle_returns_false() {
        let host = host();
        let id = spawn_transform(&host, "crate");
        assert!(host.destroy_entity(id).unwrap());
        assert!(!host.destroy_entity(id).unwrap());
        assert!(!host.destroy_entity(EntityId::from_raw(12345)).unwrap());
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let host = host();
        let stale = spawn_transform(&host, "first");
        host.destroy_entity(stale).unwrap();
        let fresh = spawn_transform(&host, "second");
        assert_eq!(fresh.index(), stale.index());

        assert!(!host.entity_exists(stale).unwrap());
        assert!(!host.has_component(stale, NativeKind::Transform.kind_id()).unwrap());
        assert_eq!(
            host.transform_position(stale),
            Err(HostError::EntityNotFound(stale))
        );
        assert_eq!(host.entity_name(fresh).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_transform_through_facade() {
        let host = host();
        let entity = Entity::from_id(spawn_transform(&host, "player"));
        let transform = entity.get_component::<Transform>(&host).unwrap();

        transform.set_position(&host, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(transform.position(&host).unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.owner(&host).unwrap(), Some(entity));
    }

    #[test]
    fn test_missing_component_on_property_access() {
        let host = host();
        let id = host.spawn(None, []).unwrap();
        assert_eq!(
            host.rigidbody2d_body_type(id),
            Err(HostError::MissingComponent {
                entity: id,
                kind: NativeKind::Rigidbody2D.kind_id(),
            })
        );
    }

    #[test]
    fn test_rigidbody_body_type() {
        let host = host();
        let id = host
            .spawn(None, [ComponentData::for_kind(NativeKind::Rigidbody2D)])
            .unwrap();
        let body = Entity::from_id(id)
            .get_component::<Rigidbody2D>(&host)
            .unwrap();
        assert_eq!(body.body_type(&host).unwrap(), BodyType::Static);
        body.set_body_type(&host, BodyType::Dynamic).unwrap();
        assert_eq!(body.body_type(&host).unwrap(), BodyType::Dynamic);
        assert_eq!(body.linear_velocity(&host).unwrap(), Vec2::ZERO);
    }

    #[test]
    fn test_camera_projection() {
        let host = SceneHost::new(HostConfig::new("test").with_viewport(200.0, 100.0));
        let id = host
            .spawn(
                None,
                [
                    ComponentData::Transform(TransformSeed::from_position(Vec3::new(10.0, 0.0, -5.0))),
                    ComponentData::Camera { half_height: 5.0 },
                ],
            )
            .unwrap();
        let camera = Entity::from_id(id).get_component::<Camera>(&host).unwrap();

        let center = camera.screen_to_world(&host, Vec2::new(100.0, 50.0)).unwrap();
        assert_eq!(center, Vec3::new(10.0, 0.0, 0.0));

        let top_left = camera.screen_to_world(&host, Vec2::ZERO).unwrap();
        assert!(approximately_equal(top_left.x, 0.0, EPSILON));
        assert!(approximately_equal(top_left.y, 5.0, EPSILON));
    }

    #[test]
    fn test_socket_attachment() {
        let host = host();
        let mesh = host
            .spawn(None, [ComponentData::for_kind(NativeKind::SkeletalMesh)])
            .unwrap();
        let target = spawn_transform(&host, "hand");
        let proxy = Entity::from_id(mesh)
            .get_component::<SkeletalMesh>(&host)
            .unwrap();

        proxy
            .attach_to_socket(&host, Entity::from_id(target), "grip")
            .unwrap();
        assert_eq!(
            host.component(mesh, NativeKind::SkeletalMesh.kind_id()),
            Some(ComponentData::SkeletalMesh {
                attachment: Some(SocketAttachment {
                    target,
                    socket: "grip".to_string(),
                }),
            })
        );

        host.destroy_entity(target).unwrap();
        let err = proxy
            .attach_to_socket(&host, Entity::from_id(target), "grip")
            .unwrap_err();
        assert_eq!(err, ScriptError::Host(HostError::EntityNotFound(target)));
    }

    #[test]
    fn test_animator_rejects_negative_state() {
        let host = host();
        let id = host
            .spawn(None, [ComponentData::for_kind(NativeKind::Animator)])
            .unwrap();
        assert!(host.animator_play_state(id, -1).is_err());
        host.animator_play_state(id, 2).unwrap();
        assert_eq!(
            host.component(id, NativeKind::Animator.kind_id()),
            Some(ComponentData::Animator { state: Some(2) })
        );
    }

    #[test]
    fn test_script_instance_identity() {
        let host = host();
        let id = spawn_transform(&host, "turret");
        host.attach_script(Turret { owner: id, shots: 0 }).unwrap();
        let entity = Entity::from_id(id);

        let a = entity.get_component::<Script<Turret>>(&host).unwrap();
        let b = entity.get_component::<Script<Turret>>(&host).unwrap();
        a.borrow_mut().shots += 1;
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(b.borrow().shots, 1);
    }

    #[test]
    fn test_attach_script_to_dead_entity() {
        let host = host();
        let ghost = EntityId::from_parts(3, 0);
        assert_eq!(
            host.attach_script(Turret { owner: ghost, shots: 0 }).unwrap_err(),
            HostError::EntityNotFound(ghost)
        );
    }

    #[test]
    fn test_destroy_removes_script() {
        let host = host();
        let id = spawn_transform(&host, "turret");
        host.attach_script(Turret { owner: id, shots: 0 }).unwrap();
        host.destroy_entity(id).unwrap();
        assert!(!host.has_script_instance(id).unwrap());
        assert_eq!(host.script_count(), 0);
    }

    #[test]
    fn test_prefab_instantiation() {
        let host = host();
        let prefab = host.register_prefab(
            PrefabDef::new("bullet")
                .with_transform(TransformSeed::from_position(Vec3::Y))
                .with_kind(NativeKind::SphereCollider),
        );
        assert!(prefab.as_asset().is_set());

        let default_placed = prefab.instantiate(&host).unwrap();
        let transform = default_placed.get_component::<Transform>(&host).unwrap();
        assert_eq!(transform.position(&host).unwrap(), Vec3::Y);
        assert_eq!(default_placed.name(&host).unwrap().as_deref(), Some("bullet"));

        let placed = prefab.instantiate_at(&host, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        let transform = placed.get_component::<Transform>(&host).unwrap();
        assert_eq!(transform.position(&host).unwrap(), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(transform.scale(&host).unwrap(), Vec3::ONE);
        assert!(placed.has_component::<script_core::SphereCollider>(&host).unwrap());
        assert_ne!(placed, default_placed);
    }

    #[test]
    fn test_unknown_prefab() {
        let host = host();
        let prefab = Prefab::from_handle(AssetHandle::from_raw(7));
        assert_eq!(
            prefab.instantiate(&host).unwrap_err(),
            ScriptError::Host(HostError::AssetNotFound(AssetHandle::from_raw(7)))
        );
    }

    #[test]
    fn test_prefab_script_attached_to_instances() {
        let host = host();
        let prefab = host.register_prefab(PrefabDef::new("turret"));
        host.set_prefab_script(prefab, |owner| Turret { owner, shots: 0 })
            .unwrap();

        let entity = prefab.instantiate(&host).unwrap();
        let turret = entity.get_component::<Script<Turret>>(&host).unwrap();
        assert_eq!(turret.borrow().owner_id(), entity.id());
    }

    #[test]
    fn test_prefab_script_owner_mismatch() {
        let host = host();
        let prefab = host.register_prefab(PrefabDef::new("turret"));
        host.set_prefab_script(prefab, |_| Turret {
            owner: EntityId::from_raw(999),
            shots: 0,
        })
        .unwrap();
        assert!(matches!(
            prefab.instantiate(&host),
            Err(ScriptError::Host(HostError::Rejected(_)))
        ));
        assert_eq!(host.entity_count(), 0);
        assert_eq!(host.script_count(), 0);
        assert_eq!(
            host.find_entity_by_name("turret").unwrap(),
            EntityId::INVALID
        );
    }

    #[test]
    fn test_load_prefab_bytes() {
        let host = host();
        let bytes = PrefabDef::new("rock").to_bytes().unwrap();
        let prefab = host.load_prefab(&bytes).unwrap();
        let entity = prefab.instantiate(&host).unwrap();
        assert_eq!(entity.name(&host).unwrap().as_deref(), Some("rock"));
        assert!(host.load_prefab(&[0xC1]).is_err());
    }

    #[test]
    fn test_raycast_closest_sphere() {
        let host = host();
        let near = host
            .spawn(
                None,
                [
                    ComponentData::Transform(TransformSeed::from_position(Vec3::new(0.0, 0.0, 5.0))),
                    ComponentData::SphereCollider { radius: 1.0 },
                ],
            )
            .unwrap();
        host.spawn(
            None,
            [
                ComponentData::Transform(TransformSeed::from_position(Vec3::new(0.0, 0.0, 10.0))),
                ComponentData::SphereCollider { radius: 1.0 },
            ],
        )
        .unwrap();

        let hit = host
            .raycast(&Ray::new(Vec3::ZERO, Vec3::Z, 100.0))
            .unwrap()
            .unwrap();
        assert!(approximately_equal(hit.distance, 4.0, EPSILON));
        assert_eq!(hit.normal, -Vec3::Z);

        host.destroy_entity(near).unwrap();
        let hit = host
            .raycast(&Ray::new(Vec3::ZERO, Vec3::Z, 100.0))
            .unwrap()
            .unwrap();
        assert!(approximately_equal(hit.distance, 9.0, EPSILON));
        assert!(host.raycast(&Ray::new(Vec3::ZERO, Vec3::X, 100.0)).unwrap().is_none());
    }

    #[test]
    fn test_input_edges_clear_each_frame() {
        let host = host();
        host.press_key(KeyCode::Space);
        assert!(host.key(KeyCode::Space));
        assert!(host.key_down(KeyCode::Space));

        host.advance_frame();
        assert!(host.key(KeyCode::Space));
        assert!(!host.key_down(KeyCode::Space));

        host.release_key(KeyCode::Space);
        assert!(!host.key(KeyCode::Space));
        assert!(host.key_up(KeyCode::Space));

        host.press_mouse_button(MouseButton::Left);
        host.set_mouse_position(Vec2::new(3.0, 4.0));
        assert!(host.mouse_button_down(MouseButton::Left));
        assert_eq!(host.mouse_position(), Vec2::new(3.0, 4.0));
        host.release_mouse_button(MouseButton::Left);
        assert!(host.mouse_button_up(MouseButton::Left));
    }

    #[test]
    fn test_clock_advances_by_fixed_delta() {
        let host = SceneHost::new(HostConfig::new("test").with_fixed_delta(0.5));
        assert_eq!(host.delta_time(), 0.5);
        assert_eq!(host.time_since_start(), 0.0);
        host.advance_frame();
        host.advance_frame();
        assert_eq!(host.time_since_start(), 1.0);
        assert_eq!(host.frame(), 2);
    }

    #[test]
    fn test_find_by_name() {
        let host = host();
        let id = spawn_transform(&host, "boss");
        assert_eq!(Entity::find_by_name(&host, "boss").unwrap().id(), id);
        assert_eq!(
            Entity::find_by_name(&host, "missing").unwrap().id(),
            EntityId::INVALID
        );
    }
}
