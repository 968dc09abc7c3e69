//! Materials (`.mto`) and material instances (`.mti`)
//!
//! Both are a single record: a hash of the resource they're based on, followed by a parameter
//! block.
//! ```c
//! struct Material {
//!     u64 base_hash;        // pipeline set for materials, material for instances
//!     u32 parameter_count;
//!     u32 parameter_block_size;
//!     struct {
//!         u32 name_hash;    // 32-bit xxHash of the parameter name
//!         u8  kind;
//!         u8  value[];      // size depends on kind
//!     } parameters[parameter_count];
//! }
//! ```
//!
//! The runtime sizes parameter blocks differently for the two: materials reserve an 8 byte
//! header per parameter, instances count the 5 bytes that are actually written.

use crate::{name_hash, writer::WriteResult, ResourceHash, ResourceWriter};
use std::io::Write;

/// Per-parameter header size used by `.mto` block sizes.
pub const MATERIAL_PARAMETER_HEADER_SIZE: usize = 8;
/// Per-parameter header size used by `.mti` block sizes.
pub const INSTANCE_PARAMETER_HEADER_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Float(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Uint(u32),
    Texture(ResourceHash),
}

impl ParameterValue {
    /// Type code as understood by the runtime.
    pub fn kind(&self) -> u8 {
        match self {
            ParameterValue::Float(_) => 0,
            ParameterValue::Float2(_) => 1,
            ParameterValue::Float3(_) => 2,
            ParameterValue::Float4(_) => 3,
            ParameterValue::Uint(_) => 4,
            ParameterValue::Texture(_) => 5,
        }
    }

    /// Size of the value in bytes.
    pub fn size(&self) -> usize {
        match self {
            ParameterValue::Float(_) => 4,
            ParameterValue::Float2(_) => 8,
            ParameterValue::Float3(_) => 12,
            ParameterValue::Float4(_) => 16,
            ParameterValue::Uint(_) => 4,
            ParameterValue::Texture(_) => 8,
        }
    }

    fn write<W: Write>(&self, w: &mut ResourceWriter<W>) -> WriteResult {
        match self {
            ParameterValue::Float(v) => w.write_f32(*v),
            ParameterValue::Float2(v) => w.write_record(v),
            ParameterValue::Float3(v) => w.write_record(v),
            ParameterValue::Float4(v) => w.write_record(v),
            ParameterValue::Uint(v) => w.write_u32(*v),
            ParameterValue::Texture(hash) => w.write_hash(*hash),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialParameter {
    pub name_hash: u32,
    pub value: ParameterValue,
}

impl MaterialParameter {
    pub fn new(name: &str, value: ParameterValue) -> Self {
        Self {
            name_hash: name_hash(name),
            value,
        }
    }
}

fn write_parameters<W: Write>(
    w: &mut ResourceWriter<W>,
    parameters: &[MaterialParameter],
    header_size: usize,
) -> WriteResult {
    let block_size: usize = parameters
        .iter()
        .map(|p| header_size + p.value.size())
        .sum();

    w.write_count(parameters.len(), "parameter count")?;
    w.write_count(block_size, "parameter block size")?;
    for parameter in parameters {
        w.write_u32(parameter.name_hash)?;
        w.write_u8(parameter.value.kind())?;
        parameter.value.write(w)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub pipeline_set: ResourceHash,
    pub parameters: Vec<MaterialParameter>,
}

impl Material {
    pub fn write<W: Write>(&self, w: &mut ResourceWriter<W>) -> WriteResult {
        w.write_hash(self.pipeline_set)?;
        write_parameters(w, &self.parameters, MATERIAL_PARAMETER_HEADER_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialInstance {
    pub material: ResourceHash,
    pub parameters: Vec<MaterialParameter>,
}

impl MaterialInstance {
    /// Parameters every instance gets when its source doesn't list any: a white base color and
    /// no base color texture.
    pub fn default_parameters() -> Vec<MaterialParameter> {
        vec![
            MaterialParameter::new("BaseColor", ParameterValue::Float4([1.0; 4])),
            MaterialParameter::new("BaseColorTexture", ParameterValue::Texture(0)),
        ]
    }

    pub fn write<W: Write>(&self, w: &mut ResourceWriter<W>) -> WriteResult {
        w.write_hash(self.material)?;
        write_parameters(w, &self.parameters, INSTANCE_PARAMETER_HEADER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_hash;

    fn to_bytes(f: impl FnOnce(&mut ResourceWriter<Vec<u8>>) -> WriteResult) -> Vec<u8> {
        let mut writer = ResourceWriter::new(Vec::new());
        f(&mut writer).unwrap();
        writer.into_inner()
    }

    #[test]
    fn default_instance_matches_runtime_expectations() {
        let instance = MaterialInstance {
            material: resource_hash("Material/Standard.mto"),
            parameters: MaterialInstance::default_parameters(),
        };
        let bytes = to_bytes(|w| instance.write(w));

        assert_eq!(&bytes[0..8], &resource_hash("Material/Standard.mto").to_le_bytes());
        assert_eq!(&bytes[8..12], &2u32.to_le_bytes());
        // (5 + 16) + (5 + 8)
        assert_eq!(&bytes[12..16], &34u32.to_le_bytes());
        assert_eq!(&bytes[16..20], &name_hash("BaseColor").to_le_bytes());
        assert_eq!(bytes[20], 3);
        assert_eq!(&bytes[21..25], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[37..41], &name_hash("BaseColorTexture").to_le_bytes());
        assert_eq!(bytes[41], 5);
        assert_eq!(&bytes[42..50], &[0u8; 8]);
        assert_eq!(bytes.len(), 50);
    }

    #[test]
    fn material_block_size_reserves_full_headers() {
        let material = Material {
            pipeline_set: resource_hash("Shader/Standard.pipelineset"),
            parameters: vec![
                MaterialParameter::new("Roughness", ParameterValue::Float(0.5)),
                MaterialParameter::new(
                    "Albedo",
                    ParameterValue::Texture(resource_hash("Texture/Albedo.dds")),
                ),
            ],
        };
        let bytes = to_bytes(|w| material.write(w));

        // (8 + 4) + (8 + 8)
        assert_eq!(&bytes[12..16], &28u32.to_le_bytes());
        assert_eq!(bytes[20], 0);
        assert_eq!(&bytes[21..25], &0.5f32.to_le_bytes());
        assert_eq!(bytes[29], 5);
        assert_eq!(&bytes[30..38], &resource_hash("Texture/Albedo.dds").to_le_bytes());
        assert_eq!(bytes.len(), 16 + (4 + 1 + 4) + (4 + 1 + 8));
    }
}
