//! # script_core
//!
//! The script-side facade over a native entity-component host.
//!
//! Scripts never own engine state. Everything they touch is a 64-bit handle
//! plus a question for the host:
//!
//! - [`Entity`] wraps an [`EntityId`] and answers component queries.
//! - [`ComponentKind`] names a resolvable kind: either a native proxy such as
//!   [`Transform`] or a script type wrapped in [`Script`].
//! - [`Component`] and [`ScriptComponent`] are the contract every component
//!   and every script behaviour satisfies.
//! - [`Prefab`] instantiates new entities from a prefab asset.
//! - [`ScriptHost`] bundles the host capability traits a script may call.
//!
//! Resolution asks the host to classify a kind before it decides how to build
//! the reference. Script instances are always fetched from the host, never
//! constructed by the facade.

pub mod asset;
pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod handle;
pub mod host;
pub mod input;
pub mod kind;
pub mod log;
pub mod physics;
mod resolve;
pub mod time;

#[cfg(test)]
mod test_support;

pub use asset::{Asset, Prefab};
pub use component::{Component, ScriptComponent, ScriptInstance, Shared};
pub use components::{
    Animator, BodyType, BoxCollider, BoxCollider2D, Camera, CircleCollider2D, MeshCollider,
    Rigidbody2D, SkeletalMesh, SphereCollider, SpriteRenderer, Transform,
};
pub use entity::Entity;
pub use error::{HostError, ScriptError};
pub use handle::{AssetHandle, EntityAllocator, EntityId};
pub use host::{
    AssetHost, ComponentHost, EntityHost, HostResult, InputHost, LogHost, NativeHost, PhysicsHost,
    ScriptHost, TimeHost,
};
pub use input::{KeyCode, MouseButton};
pub use kind::{ComponentKind, KindClass, KindId, NativeKind, Script};
