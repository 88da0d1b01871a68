//! Asset handles and prefab instantiation.
//!
//! Instantiation is the one place an invalid handle is an error rather than a
//! quiet absence: a prefab whose handle was never set must never reach the
//! host.

use serde::{Deserialize, Serialize};
use tracing::debug;

use script_math::{TransformSeed, Vec3};

use crate::entity::Entity;
use crate::error::ScriptError;
use crate::handle::AssetHandle;
use crate::host::AssetHost;

/// A reference to any asset in the host's asset table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Asset {
    handle: AssetHandle,
}

impl Asset {
    /// Wrap a handle.
    #[must_use]
    pub const fn from_handle(handle: AssetHandle) -> Self {
        Self { handle }
    }

    /// The wrapped handle.
    #[must_use]
    pub const fn handle(self) -> AssetHandle {
        self.handle
    }

    /// Returns `false` if this asset holds the invalid handle.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !self.handle.is_invalid()
    }
}

/// A prefab asset that can be materialised into new entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Prefab {
    asset: Asset,
}

impl Prefab {
    /// Wrap a prefab handle.
    #[must_use]
    pub const fn from_handle(handle: AssetHandle) -> Self {
        Self {
            asset: Asset::from_handle(handle),
        }
    }

    /// The wrapped handle.
    #[must_use]
    pub const fn handle(self) -> AssetHandle {
        self.asset.handle()
    }

    /// The prefab as a plain asset reference.
    #[must_use]
    pub const fn as_asset(self) -> Asset {
        self.asset
    }

    /// Instantiate with the placement stored in the prefab.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::InvalidOperation`] if the handle is not set
    /// (no host call is made), or [`ScriptError::Host`] if the host fails.
    pub fn instantiate(&self, host: &(impl AssetHost + ?Sized)) -> Result<Entity, ScriptError> {
        self.spawn(host, None)
    }

    /// Instantiate at `position` with zero rotation and unit scale.
    ///
    /// # Errors
    ///
    /// See [`Prefab::instantiate`].
    pub fn instantiate_at(
        &self,
        host: &(impl AssetHost + ?Sized),
        position: Vec3,
    ) -> Result<Entity, ScriptError> {
        self.spawn(host, Some(TransformSeed::from_position(position)))
    }

    /// Instantiate at `position` with `rotation` and unit scale.
    ///
    /// # Errors
    ///
    /// See [`Prefab::instantiate`].
    pub fn instantiate_with_rotation(
        &self,
        host: &(impl AssetHost + ?Sized),
        position: Vec3,
        rotation: Vec3,
    ) -> Result<Entity, ScriptError> {
        self.spawn(host, Some(TransformSeed::from_position_rotation(position, rotation)))
    }

    /// Instantiate with a full placement.
    ///
    /// # Errors
    ///
    /// See [`Prefab::instantiate`].
    pub fn instantiate_with_transform(
        &self,
        host: &(impl AssetHost + ?Sized),
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<Entity, ScriptError> {
        self.spawn(host, Some(TransformSeed::new(position, rotation, scale)))
    }

    fn spawn(
        &self,
        host: &(impl AssetHost + ?Sized),
        seed: Option<TransformSeed>,
    ) -> Result<Entity, ScriptError> {
        let handle = self.handle();
        if handle.is_invalid() {
            return Err(ScriptError::InvalidOperation("prefab handle is not set"));
        }

        let id = match seed {
            None => host.instantiate_prefab(handle)?,
            Some(seed) => host.instantiate_prefab_with_transform(
                handle,
                seed.position,
                seed.rotation,
                seed.scale,
            )?,
        };
        debug!(prefab = %handle, entity = %id, "instantiated prefab");
        Ok(Entity::from_id(id))
    }
}
