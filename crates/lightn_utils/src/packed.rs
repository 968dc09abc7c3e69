use crate::vec_into_array;
use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use std::{
    fmt::Debug,
    io::{self, Read, Write},
};

/// Special trait for fixed layout binary data, always assumed to be little endian.
pub trait PackedData: Sized {
    fn read_packed<R: Read>(r: &mut R) -> io::Result<Self>;
    fn write_packed<W: Write>(&self, w: &mut W) -> io::Result<()>;
}

impl<T: PackedData + Debug, const N: usize> PackedData for [T; N] {
    fn read_packed<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut elements = Vec::with_capacity(N);
        for _ in 0..N {
            elements.push(T::read_packed(r)?);
        }
        Ok(vec_into_array(elements))
    }

    fn write_packed<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for value in self {
            value.write_packed(w)?;
        }
        Ok(())
    }
}

macro_rules! impl_data {
    ($type:ty, $r:ident, $reader:expr, $w:ident, $self:ident, $writer:expr) => {
        impl PackedData for $type {
            fn read_packed<R: Read>($r: &mut R) -> io::Result<Self> {
                Ok($reader)
            }

            fn write_packed<W: Write>(&self, $w: &mut W) -> io::Result<()> {
                let $self = self;
                $writer;
                Ok(())
            }
        }
    };
}

impl_data!(u8, r, r.read_u8()?, w, value, w.write_u8(*value)?);
impl_data!(u32, r, r.read_u32::<LE>()?, w, value, w.write_u32::<LE>(*value)?);
impl_data!(u64, r, r.read_u64::<LE>()?, w, value, w.write_u64::<LE>(*value)?);
impl_data!(f32, r, r.read_f32::<LE>()?, w, value, w.write_f32::<LE>(*value)?);

/// Trait with a `write_packed` wrapper method for any [`Write`] type, purely for clarity.
pub trait PackedWriteExt {
    /// Writes the specified [`PackedData`] object into this stream.
    fn write_packed(&mut self, t: &impl PackedData) -> io::Result<()>;
}

impl<T: Write> PackedWriteExt for T {
    fn write_packed(&mut self, t: &impl PackedData) -> io::Result<()> {
        t.write_packed(self)
    }
}

/// Trait with a `read_packed` wrapper method for any [`Read`] type, purely for clarity.
pub trait PackedReadExt {
    /// Reads the specified [`PackedData`] type from this stream.
    fn read_packed<T: PackedData>(&mut self) -> io::Result<T>;
}

impl<T: Read> PackedReadExt for T {
    fn read_packed<R: PackedData>(&mut self) -> io::Result<R> {
        R::read_packed(self)
    }
}
