//! Component resolution.
//!
//! Turns an `(EntityId, kind)` pair into either a typed component reference
//! or a definite absence:
//!
//! 1. An invalid handle is absent without asking the host.
//! 2. The host classifies the kind as native or script.
//! 3. Native: the host confirms the entity carries the kind, and a fresh proxy
//!    bound to the entity is built locally.
//! 4. Script: the host confirms an instance is registered for the entity and
//!    returns it. The facade never builds script instances itself.
//! 5. Every negative answer in 3 or 4 is absence, not an error.
//!
//! Nothing here caches host answers. Host failures propagate unchanged.

use tracing::trace;

use crate::error::HostError;
use crate::handle::EntityId;
use crate::host::ComponentHost;
use crate::kind::{ComponentKind, KindClass};

/// Returns `true` if `id` resolves to a component of kind `K`.
///
/// For script kinds this asks whether *any* instance is registered for the
/// entity; an entity carries at most one.
pub(crate) fn probe<K, H>(id: EntityId, host: &H) -> Result<bool, HostError>
where
    K: ComponentKind,
    H: ComponentHost + ?Sized,
{
    if id.is_invalid() {
        return Ok(false);
    }

    let kind = K::kind_id();
    let found = match host.classify_kind(kind)? {
        KindClass::Native => host.has_component(id, kind)?,
        KindClass::Script => host.has_script_instance(id)?,
    };
    trace!(entity = %id, kind = K::type_name(), found, "probed component");
    Ok(found)
}

/// Resolve `id` to a component of kind `K`.
pub(crate) fn resolve<K, H>(id: EntityId, host: &H) -> Result<Option<K::Ref>, HostError>
where
    K: ComponentKind,
    H: ComponentHost + ?Sized,
{
    if id.is_invalid() {
        return Ok(None);
    }

    let kind = K::kind_id();
    let class = host.classify_kind(kind)?;
    let resolved = match class {
        KindClass::Native => {
            if host.has_component(id, kind)? {
                K::bind_native(id)
            } else {
                None
            }
        }
        KindClass::Script => {
            if host.has_script_instance(id)? {
                host.script_instance(id, kind)?
                    .and_then(|instance| K::from_script(&instance))
            } else {
                None
            }
        }
    };

    trace!(
        entity = %id,
        kind = K::type_name(),
        ?class,
        found = resolved.is_some(),
        "resolved component"
    );
    Ok(resolved)
}
