//! # script_host
//!
//! An in-process host for the script facade in [`script_core`].
//!
//! - [`SceneHost`] implements every boundary trait over an in-memory scene:
//!   generational entities, native component data, prefabs, script
//!   instances, input and a fixed-step clock.
//! - [`ScriptRuntime`] drives script lifecycle hooks frame by frame.
//! - [`RecordingHost`] wraps any host and logs each boundary call.
//! - [`HostConfig`] configures a scene.

pub mod config;
pub mod error;
pub mod prefab;
pub mod recording;
pub mod registry;
pub mod runtime;
pub mod scene;
pub mod world;

pub use config::HostConfig;
pub use error::SceneError;
pub use prefab::PrefabDef;
pub use recording::RecordingHost;
pub use registry::ScriptRegistry;
pub use runtime::{FrameStats, ScriptRuntime};
pub use scene::SceneHost;
pub use world::{ComponentData, EntityRecord, SceneWorld, SocketAttachment};
