use std::fmt::{self, Display};

/// A 4-byte section identifier, like `MSHG` or `TEX `. Tags are written verbatim, without any
/// padding or terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Converts given string into a [`Tag`].
    ///
    /// ## Panics
    /// Panics if the string isn't 4 bytes long. In a `const` context that's a compile error.
    pub const fn new(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() == 4, "invalid tag length");
        Self([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for Tag {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

impl<'a> From<&'a [u8; 4]> for Tag {
    fn from(value: &'a [u8; 4]) -> Self {
        Self(*value)
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<'a> PartialEq<&'a [u8; 4]> for Tag {
    fn eq(&self, other: &&'a [u8; 4]) -> bool {
        &self.0 == *other
    }
}

/// Printable bytes (spaces included) are shown as they are, everything else as `\xNN`.
impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            match byte {
                b'\\' => write!(f, "\\\\")?,
                b' ' | 0x21..=0x7E => write!(f, "{}", byte as char)?,
                _ => write!(f, r"\x{byte:02X}")?,
            }
        }
        Ok(())
    }
}
