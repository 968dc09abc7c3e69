//! Sequential resource writer
//!
//! Unlike chunked container formats, Lightn resources never patch sizes after the fact: every
//! count and length is known up front and written before the data it describes. That makes the
//! writer a plain append-only sink over any [`Write`], no seeking required.

use crate::{ResourceHash, Tag};
use byteorder::{WriteBytesExt, LE};
use lightn_utils::packed::{PackedData, PackedWriteExt};
use std::{
    io::{self, Write},
    path::PathBuf,
};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O failure while writing resource data")]
    IoFailure(#[from] io::Error),
    #[error("couldn't create output directory `{}`", path.display())]
    DirectoryCreateFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type WriteResult<T = ()> = Result<T, WriteError>;

/// Converts a length or count into its on-disk `u32` form.
pub fn to_u32(n: usize, what: &str) -> io::Result<u32> {
    n.try_into().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{what} ({n}) doesn't fit in 32 bits"),
        )
    })
}

/// Append-only little endian writer for resource files.
///
/// ## Example
/// ```
/// use lightn_res::{ResourceWriter, Tag};
///
/// let mut writer = ResourceWriter::new(Vec::new());
/// writer.write_tag(Tag::new("MAT ")).unwrap();
/// writer.write_string_table(&["a", "bc"]).unwrap();
///
/// let bytes = writer.into_inner();
/// assert_eq!(bytes, b"MAT \x02\0\0\0\x03\0\0\0a\0bc\0");
/// ```
pub struct ResourceWriter<W: Write> {
    w: W,
    written: u64,
}

impl<W: Write> ResourceWriter<W> {
    pub fn new(w: W) -> Self {
        Self { w, written: 0 }
    }

    /// Writes exactly 4 bytes of the tag.
    pub fn write_tag(&mut self, tag: Tag) -> WriteResult {
        self.write_all(tag.as_bytes())?;
        Ok(())
    }

    /// Writes a string table: first every string's length (including a terminator) as a `u32`,
    /// then every string followed by a zero byte.
    ///
    /// Keeping the lengths together lets the reader build an offset table before touching any
    /// string data.
    pub fn write_string_table<S: AsRef<str>>(&mut self, strings: &[S]) -> WriteResult {
        for string in strings {
            let length = to_u32(string.as_ref().len() + 1, "string length")?;
            self.write_u32(length)?;
        }
        for string in strings {
            self.write_all(string.as_ref().as_bytes())?;
            self.write_all(&[0])?;
        }
        Ok(())
    }

    /// Writes a `u32` count of a collection.
    pub fn write_count(&mut self, count: usize, what: &str) -> WriteResult {
        let count = to_u32(count, what)?;
        self.write_u32(count)
    }

    pub fn write_u8(&mut self, value: u8) -> WriteResult {
        WriteBytesExt::write_u8(self, value)?;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> WriteResult {
        WriteBytesExt::write_u32::<LE>(self, value)?;
        Ok(())
    }

    pub fn write_hash(&mut self, hash: ResourceHash) -> WriteResult {
        WriteBytesExt::write_u64::<LE>(self, hash)?;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> WriteResult {
        WriteBytesExt::write_f32::<LE>(self, value)?;
        Ok(())
    }

    /// Writes a fixed layout record, such as a matrix.
    pub fn write_record(&mut self, data: &impl PackedData) -> WriteResult {
        PackedWriteExt::write_packed(self, data)?;
        Ok(())
    }

    /// Amount of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

impl<W: Write> Write for ResourceWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.w.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.flush()
    }
}
