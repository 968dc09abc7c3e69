//! Binary runtime resources of the Lightn engine
//!
//! Every resource file produced by the asset tools is a flat little endian byte stream. Scene
//! files (`.level`) are split into sections, each introduced by a 4-byte [`Tag`]. The smaller
//! resources (materials, material instances, meshes) are single records without any tags.
//!
//! Cross references between resources are never stored as paths. Instead, every path is turned
//! into a [`ResourceHash`], which the runtime resolves through its own table.

use lightn_utils::{xxh32_hash, xxh64_hash};

pub mod level;
pub mod material;
pub mod mesh;
pub mod reader;
pub mod tag;
pub mod writer;

pub use tag::Tag;
pub use writer::{ResourceWriter, WriteError};

/// 64-bit content hash of a resource path.
pub type ResourceHash = u64;

/// Hashes a resource path the way the runtime expects it.
///
/// ## Example
/// ```
/// use lightn_res::resource_hash;
/// assert_eq!(resource_hash("abc"), 0x44BC2CF5AD770999);
/// ```
pub fn resource_hash(path: &str) -> ResourceHash {
    xxh64_hash(path.as_bytes())
}

/// Hashes a short symbolic name, like a material parameter name.
pub fn name_hash(name: &str) -> u32 {
    xxh32_hash(name.as_bytes())
}
