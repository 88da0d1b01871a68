//! The script-side entity value.
//!
//! An [`Entity`] wraps one [`EntityId`] and nothing else. It is `Copy`, holds
//! no host state, and every query it answers is a fresh round trip through the
//! host passed to the call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScriptError;
use crate::handle::EntityId;
use crate::host::{ComponentHost, EntityHost};
use crate::kind::ComponentKind;
use crate::resolve;

/// The primary object scripts address.
///
/// `Entity::default()` holds [`EntityId::INVALID`]. Queries on an invalid
/// entity answer "absent" without reaching the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
}

impl Entity {
    /// An entity holding the invalid handle.
    pub const INVALID: Entity = Entity {
        id: EntityId::INVALID,
    };

    /// Wrap a handle.
    #[must_use]
    pub const fn from_id(id: EntityId) -> Self {
        Self { id }
    }

    /// The wrapped handle.
    #[must_use]
    pub const fn id(self) -> EntityId {
        self.id
    }

    /// Returns `false` if this value holds the invalid handle.
    ///
    /// A `true` answer says nothing about whether the host still knows the
    /// entity; use [`Entity::exists`] for that.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !self.id.is_invalid()
    }

    /// Returns `true` if the entity carries a component of kind `K`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn has_component<K: ComponentKind>(
        &self,
        host: &(impl ComponentHost + ?Sized),
    ) -> Result<bool, ScriptError> {
        Ok(resolve::probe::<K, _>(self.id, host)?)
    }

    /// Resolve a component of kind `K`, or `None` if the entity lacks it.
    ///
    /// Native kinds yield a fresh proxy bound to this entity; script kinds
    /// yield the instance the host registered for it.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn try_get_component<K: ComponentKind>(
        &self,
        host: &(impl ComponentHost + ?Sized),
    ) -> Result<Option<K::Ref>, ScriptError> {
        Ok(resolve::resolve::<K, _>(self.id, host)?)
    }

    /// Resolve a component of kind `K` that the caller expects to exist.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::ComponentNotFound`] if the entity lacks it, or
    /// [`ScriptError::Host`] if the host fails.
    pub fn get_component<K: ComponentKind>(
        &self,
        host: &(impl ComponentHost + ?Sized),
    ) -> Result<K::Ref, ScriptError> {
        self.try_get_component::<K>(host)?
            .ok_or(ScriptError::ComponentNotFound {
                entity: self.id,
                kind: K::type_name(),
            })
    }

    /// Ask the host to destroy this entity, then forget the handle.
    ///
    /// Does nothing on an invalid entity. Other copies of the same handle are
    /// not touched; the host recognises them as stale by their generation.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails. The local handle is
    /// kept in that case.
    pub fn destroy(&mut self, host: &(impl EntityHost + ?Sized)) -> Result<(), ScriptError> {
        if self.id.is_invalid() {
            return Ok(());
        }
        let destroyed = host.destroy_entity(self.id)?;
        debug!(entity = %self.id, destroyed, "destroyed entity");
        self.id = EntityId::INVALID;
        Ok(())
    }

    /// Look an entity up by display name.
    ///
    /// Returns [`Entity::INVALID`] when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn find_by_name(host: &(impl EntityHost + ?Sized), name: &str) -> Result<Entity, ScriptError> {
        Ok(Entity::from_id(host.find_entity_by_name(name)?))
    }

    /// Returns `true` if the host still knows this entity.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn exists(&self, host: &(impl EntityHost + ?Sized)) -> Result<bool, ScriptError> {
        if self.id.is_invalid() {
            return Ok(false);
        }
        Ok(host.entity_exists(self.id)?)
    }

    /// Display name of the entity, if the host knows it.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Host`] if the host fails.
    pub fn name(&self, host: &(impl EntityHost + ?Sized)) -> Result<Option<String>, ScriptError> {
        if self.id.is_invalid() {
            return Ok(None);
        }
        Ok(host.entity_name(self.id)?)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}
