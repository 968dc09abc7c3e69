//! Reading primitives, mirroring [`crate::writer`]. The runtime has its own loader, these exist
//! for inspection tools and verification.

use crate::Tag;
use anyhow::{bail, ensure};
use byteorder::{ReadBytesExt, LE};
use lightn_utils::AnyResult;
use std::io::Read;

/// Longest string accepted from a string table. Paths are nowhere near that.
pub const STRING_SIZE_LIMIT: u32 = 1 << 20;

pub fn read_tag<R: Read>(r: &mut R) -> AnyResult<Tag> {
    let mut tag = [0u8; 4];
    r.read_exact(&mut tag)?;
    Ok(Tag(tag))
}

/// Reads a tag and verifies that it's the expected one.
pub fn expect_tag<R: Read>(r: &mut R, expected: Tag) -> AnyResult {
    let tag = read_tag(r)?;
    if tag != expected {
        bail!("expected section `{expected}`, found `{tag}`");
    }
    Ok(())
}

/// Reads a string table of `count` strings, see
/// [`ResourceWriter::write_string_table`](crate::ResourceWriter::write_string_table).
pub fn read_string_table<R: Read>(r: &mut R, count: u32) -> AnyResult<Vec<String>> {
    let mut lengths = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        let length = r.read_u32::<LE>()?;
        ensure!(length != 0, "string table entry without a terminator");
        ensure!(length <= STRING_SIZE_LIMIT, "string table entry too long ({length} bytes)");
        lengths.push(length);
    }

    let mut strings = Vec::with_capacity(lengths.len());
    for length in lengths {
        let mut bytes = vec![0u8; length as usize];
        r.read_exact(&mut bytes)?;
        if bytes.pop() != Some(0) {
            bail!("string table entry isn't null terminated");
        }
        strings.push(String::from_utf8(bytes)?);
    }

    Ok(strings)
}
