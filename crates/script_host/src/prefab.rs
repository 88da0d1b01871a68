//! Prefab definitions.
//!
//! A [`PrefabDef`] is plain data: a name, a placement, and the native
//! components every instance starts with. Definitions serialise to
//! MessagePack so scenes can ship them as blobs.

use serde::{Deserialize, Serialize};

use script_core::NativeKind;
use script_math::TransformSeed;

use crate::error::SceneError;
use crate::world::ComponentData;

/// Template for entities created by prefab instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabDef {
    /// Name given to every instance.
    pub name: String,
    /// Placement used when instantiation does not supply one.
    pub transform: TransformSeed,
    /// Components besides the transform.
    pub components: Vec<ComponentData>,
}

impl PrefabDef {
    /// A prefab with an identity transform and no other components.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: TransformSeed::IDENTITY,
            components: Vec::new(),
        }
    }

    /// Set the default placement.
    #[must_use]
    pub fn with_transform(mut self, transform: TransformSeed) -> Self {
        self.transform = transform;
        self
    }

    /// Add a component with explicit data.
    #[must_use]
    pub fn with_component(mut self, data: ComponentData) -> Self {
        self.components.push(data);
        self
    }

    /// Add a built-in native kind with its default data.
    #[must_use]
    pub fn with_kind(self, kind: NativeKind) -> Self {
        self.with_component(ComponentData::for_kind(kind))
    }

    /// Component list for an instance placed at `placement`.
    ///
    /// The transform always comes last so it overrides any stray transform
    /// entry in `components`.
    pub(crate) fn instance_components(
        &self,
        placement: TransformSeed,
    ) -> impl Iterator<Item = ComponentData> + '_ {
        self.components
            .iter()
            .cloned()
            .chain(std::iter::once(ComponentData::Transform(placement)))
    }

    /// Encode to MessagePack bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Encode`] if serialisation fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SceneError> {
        rmp_serde::to_vec(self).map_err(SceneError::Encode)
    }

    /// Decode from MessagePack bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Decode`] if deserialisation fails.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneError> {
        rmp_serde::from_slice(bytes).map_err(SceneError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use script_math::Vec3;

    use super::*;

    #[test]
    fn test_bytes_roundtrip() {
        let def = PrefabDef::new("bullet")
            .with_transform(TransformSeed::from_position(Vec3::new(0.0, 1.0, 0.0)))
            .with_kind(NativeKind::SphereCollider)
            .with_component(ComponentData::Custom("Trail".to_string()));
        let bytes = def.to_bytes().unwrap();
        assert_eq!(PrefabDef::from_bytes(&bytes).unwrap(), def);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        assert!(matches!(
            PrefabDef::from_bytes(&[0xFF, 0xFF]),
            Err(SceneError::Decode(_))
        ));
    }

    #[test]
    fn test_placement_overrides_stored_transform() {
        let def = PrefabDef::new("rock")
            .with_component(ComponentData::Transform(TransformSeed::from_position(Vec3::X)));
        let placement = TransformSeed::from_position(Vec3::Y);
        let last = def.instance_components(placement).last().unwrap();
        assert_eq!(last, ComponentData::Transform(placement));
    }
}
