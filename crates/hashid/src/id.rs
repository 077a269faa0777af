//! Identifier derivation: digests of business-key tuples, family prefixes,
//! namespaced object UUIDs and time-ordered random UUIDs.

use md5::{Digest, Md5};
use uuid::Uuid;

use crate::types::IdFamily;

pub const KEY_SEPARATOR: &str = ":";

/// Namespace for object ids (the RFC 4122 URL namespace). Every object id ever
/// issued depends on it.
pub const OBJECT_NAMESPACE: Uuid = Uuid::NAMESPACE_URL;

/// Stable 32-char hex digest of an ordered key tuple.
///
/// The joined string is hashed as UTF-16LE code units rather than UTF-8 so the
/// digests match identifiers issued by existing JVM clients.
pub fn derive(keys: &[&str]) -> String {
    let joined = keys.join(KEY_SEPARATOR);
    let mut hasher = Md5::new();
    for unit in joined.encode_utf16() {
        hasher.update(unit.to_le_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

pub fn prefixed(family: IdFamily, keys: &[&str]) -> String {
    format!("{}{}", family.prefix(), derive(keys))
}

pub fn object_uuid(analysis_id: &str, file_name: &str) -> Uuid {
    let name = format!("{analysis_id}/{file_name}");
    Uuid::new_v5(&OBJECT_NAMESPACE, name.as_bytes())
}

pub fn object_id(analysis_id: &str, file_name: &str) -> String {
    object_uuid(analysis_id, file_name).to_string()
}

/// A fresh UUIDv7: millisecond timestamp followed by random bits.
pub fn time_ordered_uuid() -> String {
    Uuid::now_v7().to_string()
}
