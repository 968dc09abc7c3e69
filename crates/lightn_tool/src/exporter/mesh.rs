use lightn_res::{
    mesh::{MaterialSlot, Mesh},
    resource_hash,
};
use serde::Deserialize;

/// A mesh: a geometry plus the materials bound to its slots.
///
/// ```toml
/// Mesh = "Mesh/Box/Box.mshg"
///
/// [[Materials]]
/// Slot = "Body"
/// Path = "Material/Red.mti"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MeshSpecification {
    pub mesh: String,
    #[serde(default, alias = "Material")]
    pub materials: Vec<SlotSpecification>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SlotSpecification {
    pub slot: String,
    pub path: String,
}

impl MeshSpecification {
    pub fn export(self) -> Mesh {
        Mesh {
            mesh_geometry: resource_hash(&self.mesh),
            material_slots: self
                .materials
                .iter()
                .map(|slot| MaterialSlot {
                    name: resource_hash(&slot.slot),
                    material: resource_hash(&slot.path),
                })
                .collect(),
        }
    }
}
