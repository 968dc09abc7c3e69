//! Meshes (`.mesh`) and static meshes (`.smesh`), which share one layout:
//! ```c
//! struct Mesh {
//!     u64 mesh_geometry_hash;
//!     u32 slot_count;
//!     u64 slot_name_hashes[slot_count];
//!     u64 material_hashes[slot_count];
//! }
//! ```

use crate::{writer::WriteResult, ResourceHash, ResourceWriter};
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSlot {
    pub name: ResourceHash,
    pub material: ResourceHash,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub mesh_geometry: ResourceHash,
    pub material_slots: Vec<MaterialSlot>,
}

impl Mesh {
    pub fn write<W: Write>(&self, w: &mut ResourceWriter<W>) -> WriteResult {
        w.write_hash(self.mesh_geometry)?;
        w.write_count(self.material_slots.len(), "material slot count")?;
        for slot in &self.material_slots {
            w.write_hash(slot.name)?;
        }
        for slot in &self.material_slots {
            w.write_hash(slot.material)?;
        }
        Ok(())
    }
}
