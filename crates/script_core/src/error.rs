//! Error types for the facade and for the host boundary.

use crate::handle::{AssetHandle, EntityId};
use crate::kind::KindId;

/// Failures reported by the host across the boundary.
///
/// "Not found" answers to existence queries are *not* errors; they come back
/// as `false` or `None`. A `HostError` means the host could not carry out a
/// request it was given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// The entity handle does not reference a live entity.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// The asset handle does not reference a loaded asset.
    #[error("asset not found: {0}")]
    AssetNotFound(AssetHandle),

    /// The entity exists but lacks the component a property access needs.
    #[error("{entity} has no component of kind {kind}")]
    MissingComponent {
        /// The entity that was addressed.
        entity: EntityId,
        /// The kind the operation required.
        kind: KindId,
    },

    /// The host refused the request for a reason of its own.
    #[error("host rejected request: {0}")]
    Rejected(String),
}

/// Errors surfaced to scripts by the facade.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    /// An operation that requires a valid handle was called with the sentinel.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// The unchecked component lookup found nothing.
    #[error("component `{kind}` not found on {entity}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: EntityId,
        /// Name of the requested kind.
        kind: &'static str,
    },

    /// A failure inside the host, passed through unchanged.
    #[error(transparent)]
    Host(#[from] HostError),
}
