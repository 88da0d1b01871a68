//! Host-side error types.

/// Errors raised while loading scene data.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Failed to encode a prefab definition to MessagePack.
    #[error("failed to encode prefab: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a prefab definition from MessagePack.
    #[error("failed to decode prefab: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}
