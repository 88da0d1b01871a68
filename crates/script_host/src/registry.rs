//! Script registry: tracks the script instance attached to each entity.
//!
//! An entity carries at most one script instance. New instances wait in a
//! pending queue until the runtime runs their create and start hooks; removed
//! instances that already started wait in a retired queue for their destroy
//! hook. The registry never calls hooks itself.

use std::collections::HashMap;

use script_core::{EntityId, ScriptInstance};

/// Registry of all script instances known to a host.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    /// Instances keyed by owner.
    instances: HashMap<EntityId, ScriptInstance>,
    /// Registered but not yet started.
    pending: Vec<ScriptInstance>,
    /// Removed after starting, awaiting their destroy hook.
    retired: Vec<ScriptInstance>,
}

impl ScriptRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instance` for its owner, replacing any previous instance.
    ///
    /// Returns the replaced instance, which is retired like a removal.
    pub fn register(&mut self, instance: ScriptInstance) -> Option<ScriptInstance> {
        let owner = instance.owner_id();
        let replaced = self.remove(owner);
        self.pending.push(instance.clone());
        self.instances.insert(owner, instance);
        replaced
    }

    /// Remove the instance attached to `owner`.
    ///
    /// A started instance moves to the retired queue. One that never started
    /// is dropped without a destroy hook.
    pub fn remove(&mut self, owner: EntityId) -> Option<ScriptInstance> {
        let instance = self.instances.remove(&owner)?;
        if let Some(pos) = self.pending.iter().position(|p| p.ptr_eq(&instance)) {
            self.pending.remove(pos);
        } else {
            self.retired.push(instance.clone());
        }
        Some(instance)
    }

    #[must_use]
    pub fn get(&self, owner: EntityId) -> Option<&ScriptInstance> {
        self.instances.get(&owner)
    }

    #[must_use]
    pub fn contains(&self, owner: EntityId) -> bool {
        self.instances.contains_key(&owner)
    }

    /// Returns `true` if `instance` is still the one registered for its owner.
    #[must_use]
    pub fn is_live(&self, instance: &ScriptInstance) -> bool {
        self.instances
            .get(&instance.owner_id())
            .is_some_and(|current| current.ptr_eq(instance))
    }

    /// Take every instance waiting for its create and start hooks.
    pub fn take_pending(&mut self) -> Vec<ScriptInstance> {
        std::mem::take(&mut self.pending)
    }

    /// Take every instance waiting for its destroy hook.
    pub fn take_retired(&mut self) -> Vec<ScriptInstance> {
        std::mem::take(&mut self.retired)
    }

    /// Started instances, ordered by owner.
    #[must_use]
    pub fn started(&self) -> Vec<ScriptInstance> {
        let mut started: Vec<ScriptInstance> = self
            .instances
            .values()
            .filter(|instance| !self.pending.iter().any(|p| p.ptr_eq(instance)))
            .cloned()
            .collect();
        started.sort_by_key(ScriptInstance::owner_id);
        started
    }

    /// Empty the registry, returning every instance that needs a destroy
    /// hook: the started ones plus anything already retired.
    pub fn drain(&mut self) -> Vec<ScriptInstance> {
        let mut out = self.started();
        out.append(&mut self.retired);
        self.instances.clear();
        self.pending.clear();
        out
    }

    /// Returns the number of registered instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
