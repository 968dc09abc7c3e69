//! Various utilities shared by the Lightn asset tools

use std::fmt::Debug;

pub mod packed;
pub mod xxhash;
pub use xxhash::{xxh32_hash, xxh64_hash, XxHashExt};

mod result_ext;
pub use result_ext::AnyhowResultExt;

pub type AnyResult<T = (), E = anyhow::Error> = anyhow::Result<T, E>;

/// Shorthand for `Ok(())`, cause it looks ugly
pub const fn ok<E>() -> Result<(), E> {
    Ok(())
}

/// Converts a `Vec` of known length into an array.
///
/// ## Panics
/// Panics if the lengths don't match, which is a bug in the caller.
///
/// ## Example
/// ```
/// use lightn_utils::vec_into_array;
/// let array: [u32; 3] = vec_into_array(vec![1, 2, 3]);
/// assert_eq!(array, [1, 2, 3]);
/// ```
pub fn vec_into_array<T: Debug, const N: usize>(v: Vec<T>) -> [T; N] {
    let len = v.len();
    match v.try_into() {
        Ok(array) => array,
        Err(_) => panic!("expected {N} elements, got {len}"),
    }
}
