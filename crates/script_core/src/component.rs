//! Component base and script-authored components.
//!
//! Every component a script can hold, native proxy or script behaviour,
//! implements [`Component`]: it knows the [`EntityId`] of its owner and
//! re-exposes the entity-level queries for convenience. The owner is a
//! back-reference, not an ownership relation; a component never keeps its
//! entity alive.
//!
//! Script-authored components additionally implement [`ScriptComponent`]. The
//! host constructs one instance per entity at registration time and hands out
//! the same [`ScriptInstance`] on every lookup.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::entity::Entity;
use crate::error::ScriptError;
use crate::handle::EntityId;
use crate::host::{ComponentHost, EntityHost, ScriptHost};
use crate::kind::{ComponentKind, KindId};

/// Shared, mutable handle to a script component.
pub type Shared<T> = Rc<RefCell<T>>;

/// The component base.
pub trait Component {
    /// Handle of the entity this component belongs to.
    fn owner_id(&self) -> EntityId;

    /// Resolve the owning entity.
    ///
    /// Returns `None` when the owner handle is invalid (no host call) or the
    /// host no longer knows the entity.
    fn owner(&self, host: &(impl EntityHost + ?Sized)) -> Result<Option<Entity>, ScriptError>
    where
        Self: Sized,
    {
        let id = self.owner_id();
        if id.is_invalid() {
            return Ok(None);
        }
        Ok(host.entity_exists(id)?.then_some(Entity::from_id(id)))
    }

    /// [`Entity::has_component`] on the owner; `false` if the owner is gone.
    fn has_component<K: ComponentKind>(
        &self,
        host: &(impl EntityHost + ComponentHost + ?Sized),
    ) -> Result<bool, ScriptError>
    where
        Self: Sized,
    {
        match self.owner(host)? {
            Some(owner) => owner.has_component::<K>(host),
            None => Ok(false),
        }
    }

    /// [`Entity::try_get_component`] on the owner; `None` if the owner is gone.
    fn try_get_component<K: ComponentKind>(
        &self,
        host: &(impl EntityHost + ComponentHost + ?Sized),
    ) -> Result<Option<K::Ref>, ScriptError>
    where
        Self: Sized,
    {
        match self.owner(host)? {
            Some(owner) => owner.try_get_component::<K>(host),
            None => Ok(None),
        }
    }

    /// [`Entity::get_component`] on the owner.
    fn get_component<K: ComponentKind>(
        &self,
        host: &(impl EntityHost + ComponentHost + ?Sized),
    ) -> Result<K::Ref, ScriptError>
    where
        Self: Sized,
    {
        self.try_get_component::<K>(host)?
            .ok_or(ScriptError::ComponentNotFound {
                entity: self.owner_id(),
                kind: K::type_name(),
            })
    }

    /// [`Entity::find_by_name`].
    fn find_entity_by_name(
        &self,
        host: &(impl EntityHost + ?Sized),
        name: &str,
    ) -> Result<Entity, ScriptError>
    where
        Self: Sized,
    {
        Entity::find_by_name(host, name)
    }
}

/// A user-authored behaviour attached to an entity.
///
/// Hooks receive the host so they can reach other entities and components.
/// A hook must not resolve its *own* instance through the host while running:
/// the instance is already mutably borrowed for the duration of the call.
pub trait ScriptComponent: Component + Any {
    /// The kind name the host registers this behaviour under.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Called once after the instance is registered.
    fn on_create(&mut self, _host: &dyn ScriptHost) -> Result<(), ScriptError> {
        Ok(())
    }

    /// Called once, after every pending instance has been created.
    fn on_start(&mut self, _host: &dyn ScriptHost) -> Result<(), ScriptError> {
        Ok(())
    }

    /// Called every frame.
    fn on_update(&mut self, _host: &dyn ScriptHost) -> Result<(), ScriptError> {
        Ok(())
    }

    /// Called once when the owning entity is destroyed or the runtime ends.
    fn on_destroy(&mut self, _host: &dyn ScriptHost) -> Result<(), ScriptError> {
        Ok(())
    }
}

/// A registered script component, type-erased.
///
/// Cloning shares the underlying instance.
#[derive(Clone)]
pub struct ScriptInstance {
    kind: KindId,
    owner: EntityId,
    value: Rc<dyn Any>,
    behaviour: Rc<RefCell<dyn ScriptComponent>>,
}

impl ScriptInstance {
    /// Wrap a freshly constructed component.
    #[must_use]
    pub fn new<T: ScriptComponent>(component: T) -> Self {
        let owner = component.owner_id();
        let shared: Shared<T> = Rc::new(RefCell::new(component));
        Self {
            kind: KindId::from_name(T::type_name()),
            owner,
            value: shared.clone(),
            behaviour: shared,
        }
    }

    /// The kind this instance was registered as.
    #[must_use]
    pub fn kind(&self) -> KindId {
        self.kind
    }

    /// Owner handle captured at construction.
    #[must_use]
    pub fn owner_id(&self) -> EntityId {
        self.owner
    }

    /// Typed handle to the instance, if it is a `T`.
    #[must_use]
    pub fn downcast<T: ScriptComponent>(&self) -> Option<Shared<T>> {
        Rc::clone(&self.value).downcast::<RefCell<T>>().ok()
    }

    /// The instance as a lifecycle target.
    #[must_use]
    pub fn behaviour(&self) -> &Rc<RefCell<dyn ScriptComponent>> {
        &self.behaviour
    }

    /// Returns `true` if both handles share one instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &ScriptInstance) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.value), Rc::as_ptr(&other.value))
    }
}

impl std::fmt::Debug for ScriptInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptInstance")
            .field("kind", &self.kind)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}
