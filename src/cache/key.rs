//! Cache key derivation using SHA-256 hashes

use sha2::{Digest, Sha256};

use crate::stats::EntityRef;

/// Derive the cache key for one entity.
///
/// SHA-256 over the type key and id, with a separator so the two parts
/// cannot bleed into each other. Injective over the whole (type, id)
/// domain: distinct entities can never share a key.
pub fn cache_key(entity: &EntityRef) -> String {
    let mut hasher = Sha256::new();
    hasher.update(entity.entity_type.type_key().as_bytes());
    hasher.update(b"|");
    hasher.update(entity.id.as_bytes());
    format!("{:x}", hasher.finalize())
}
