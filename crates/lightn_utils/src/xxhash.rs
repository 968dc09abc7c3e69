//! xxHash64 and xxHash32, seed 0.
//!
//! These are the only link between compiled resources and the runtime, so the output must match
//! the reference xxHash implementation bit for bit.

use twox_hash::{XxHash32, XxHash64};

/// Performs a 64-bit xxHash (seed 0). Used for every path-like resource reference.
///
/// ## Example
/// ```
/// use lightn_utils::xxh64_hash;
///
/// assert_eq!(xxh64_hash(b""), 0xEF46DB3751D8E999);
/// assert_eq!(xxh64_hash(b"abc"), 0x44BC2CF5AD770999);
/// ```
pub fn xxh64_hash(buffer: &[u8]) -> u64 {
    XxHash64::oneshot(0, buffer)
}

/// Performs a 32-bit xxHash (seed 0). Used for short symbolic names, like material parameters.
///
/// ## Example
/// ```
/// use lightn_utils::xxh32_hash;
///
/// assert_eq!(xxh32_hash(b""), 0x02CC5D05);
/// assert_eq!(xxh32_hash(b"abc"), 0x32D153FF);
/// ```
pub fn xxh32_hash(buffer: &[u8]) -> u32 {
    XxHash32::oneshot(0, buffer)
}

pub trait XxHashExt {
    /// Verifies if given string's 64-bit xxHash matches this value.
    ///
    /// ## Example
    /// ```
    /// use lightn_utils::XxHashExt;
    ///
    /// let hash: u64 = 0x44BC2CF5AD770999;
    /// assert!(hash.xxh64_matches("abc"))
    /// ```
    fn xxh64_matches(self, string: &str) -> bool;
}

impl XxHashExt for u64 {
    fn xxh64_matches(self, string: &str) -> bool {
        xxh64_hash(string.as_bytes()) == self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Longer than one stripe of either variant
    const SPAM: &str = "Nobody inspects the spammish repetition";

    #[test]
    fn known_vectors_64() {
        assert_eq!(xxh64_hash(b""), 0xEF46DB3751D8E999);
        assert_eq!(xxh64_hash(b"a"), 0xD24EC4F1A98C6E5B);
        assert_eq!(xxh64_hash(b"abc"), 0x44BC2CF5AD770999);
        assert_eq!(xxh64_hash(SPAM.as_bytes()), 0xFBCEA83C8A378BF1);
    }

    #[test]
    fn known_vectors_32() {
        assert_eq!(xxh32_hash(b""), 0x02CC5D05);
        assert_eq!(xxh32_hash(b"a"), 0x550D7456);
        assert_eq!(xxh32_hash(b"abc"), 0x32D153FF);
        assert_eq!(xxh32_hash(SPAM.as_bytes()), 0xE2293B2F);
    }

    #[test]
    fn streaming_and_oneshot_agree() {
        use std::hash::Hasher;

        // Lengths around the 16 and 32 byte stripe boundaries
        for len in [0, 1, 3, 4, 15, 16, 17, 31, 32, 33, 64, 100] {
            let data: Vec<u8> = (0..len as u8).map(|i| i.wrapping_mul(31)).collect();
            let (a, b) = data.split_at(len / 2);

            let mut hasher64 = XxHash64::with_seed(0);
            hasher64.write(a);
            hasher64.write(b);
            assert_eq!(hasher64.finish(), xxh64_hash(&data), "length {len}");

            let mut hasher32 = XxHash32::with_seed(0);
            hasher32.write(a);
            hasher32.write(b);
            assert_eq!(hasher32.finish_32(), xxh32_hash(&data), "length {len}");
        }
    }

    #[test]
    fn paths_hash_apart() {
        let paths = [
            "Mesh/Box/Box.mesh",
            "Mesh/Box/box.mesh",
            "Mesh/Box/Box.mesh ",
            "Mesh/Sphere/Sphere.mesh",
            "Material/Standard.mti",
        ];
        for (i, a) in paths.iter().enumerate() {
            assert_eq!(xxh64_hash(a.as_bytes()), xxh64_hash(a.as_bytes()));
            for b in &paths[i + 1..] {
                assert_ne!(xxh64_hash(a.as_bytes()), xxh64_hash(b.as_bytes()));
            }
        }
    }
}
