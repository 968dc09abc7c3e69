//! Scene (`.level`) files
//!
//! ## Layout
//! ```c
//! struct Level {
//!     char magic[4];                // "RESH"
//!     u32  mesh_geometry_count;
//!     u32  mesh_count;
//!     u32  texture_count;
//!     u32  pipeline_set_count;      // counted, but there is no section for pipeline sets
//!     u32  material_count;
//!     u32  instance_group_count;
//!
//!     char mshg[4];  StringTable mesh_geometries;
//!     char tex_[4];  StringTable textures;         // tag is "TEX " with a trailing space
//!     char mat_[4];  StringTable materials;        // "MAT "
//!     char mesh[4];  StringTable meshes;
//!
//!     char mesi[4];
//!     u32  group_count;
//!     struct {
//!         u64 mesh_path_hash;
//!         u32 instance_count;
//!         f32 world_matrices[instance_count][4][4];  // column major
//!     } groups[group_count];
//! }
//! ```
//!
//! String tables are described in [`ResourceWriter::write_string_table`].

use crate::{
    reader::{expect_tag, read_string_table},
    resource_hash,
    writer::WriteResult,
    ResourceHash, ResourceWriter, Tag,
};
use ahash::AHashMap;
use anyhow::ensure;
use byteorder::{ReadBytesExt, LE};
use lightn_utils::{packed::PackedReadExt, AnyResult, XxHashExt};
use serde::Deserialize;
use std::io::{Read, Write};

pub const LEVEL_MAGIC: Tag = Tag::new("RESH");
pub const MESH_GEOMETRY_TAG: Tag = Tag::new("MSHG");
pub const TEXTURE_TAG: Tag = Tag::new("TEX ");
pub const MATERIAL_TAG: Tag = Tag::new("MAT ");
pub const MESH_TAG: Tag = Tag::new("MESH");
pub const MESH_INSTANCE_TAG: Tag = Tag::new("MESI");

/// 4 columns of 4 floats.
pub type WorldMatrix = [[f32; 4]; 4];

pub const IDENTITY: WorldMatrix = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// A single placement of a mesh in the scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MeshInstance {
    /// Path of the owning mesh, as listed in the scene's mesh list.
    pub mesh: String,
    pub world_matrix: WorldMatrix,
}

/// All instances of a single mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceGroup {
    pub mesh: String,
    pub instances: Vec<MeshInstance>,
}

/// Decides the order in which instance groups are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum InstanceOrder {
    /// Groups appear in the order their mesh is first referenced.
    #[default]
    FirstSeen,
    /// Instances are stably sorted by mesh path before grouping, so groups appear in byte-wise
    /// ascending mesh path order.
    SortedByMesh,
}

/// Groups instances by their mesh.
///
/// Group order follows [`InstanceOrder`]. Inside of a group, instances keep their input order.
pub fn group_instances(instances: Vec<MeshInstance>, order: InstanceOrder) -> Vec<InstanceGroup> {
    let mut instances = instances;
    if order == InstanceOrder::SortedByMesh {
        // sort_by is stable
        instances.sort_by(|a, b| a.mesh.cmp(&b.mesh));
    }

    let mut groups: Vec<InstanceGroup> = Vec::new();
    let mut index: AHashMap<String, usize> = AHashMap::new();

    for instance in instances {
        match index.get(&instance.mesh) {
            Some(&position) => groups[position].instances.push(instance),
            None => {
                index.insert(instance.mesh.clone(), groups.len());
                groups.push(InstanceGroup {
                    mesh: instance.mesh.clone(),
                    instances: vec![instance],
                });
            }
        }
    }

    groups
}

/// Everything that goes into a `.level` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelScene {
    pub mesh_geometries: Vec<String>,
    pub meshes: Vec<String>,
    pub textures: Vec<String>,
    pub pipeline_sets: Vec<String>,
    pub materials: Vec<String>,
    pub instance_groups: Vec<InstanceGroup>,
}

impl LevelScene {
    /// Total amount of placed instances, across all groups.
    pub fn instance_count(&self) -> usize {
        self.instance_groups.iter().map(|g| g.instances.len()).sum()
    }

    pub fn write<W: Write>(&self, w: &mut ResourceWriter<W>) -> WriteResult {
        w.write_tag(LEVEL_MAGIC)?;
        w.write_count(self.mesh_geometries.len(), "mesh geometry count")?;
        w.write_count(self.meshes.len(), "mesh count")?;
        w.write_count(self.textures.len(), "texture count")?;
        w.write_count(self.pipeline_sets.len(), "pipeline set count")?;
        w.write_count(self.materials.len(), "material count")?;
        w.write_count(self.instance_groups.len(), "instance group count")?;

        w.write_tag(MESH_GEOMETRY_TAG)?;
        w.write_string_table(&self.mesh_geometries)?;

        w.write_tag(TEXTURE_TAG)?;
        w.write_string_table(&self.textures)?;

        w.write_tag(MATERIAL_TAG)?;
        w.write_string_table(&self.materials)?;

        w.write_tag(MESH_TAG)?;
        w.write_string_table(&self.meshes)?;

        w.write_tag(MESH_INSTANCE_TAG)?;
        w.write_count(self.instance_groups.len(), "instance group count")?;
        for group in &self.instance_groups {
            w.write_hash(resource_hash(&group.mesh))?;
            w.write_count(group.instances.len(), "instance count")?;
            for instance in &group.instances {
                w.write_record(&instance.world_matrix)?;
            }
        }

        Ok(())
    }
}

/// A `.level` file as read back from disk. Mesh paths of instance groups are only known by
/// their hashes at this point.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelImage {
    pub mesh_geometries: Vec<String>,
    pub meshes: Vec<String>,
    pub textures: Vec<String>,
    pub pipeline_set_count: u32,
    pub materials: Vec<String>,
    pub instance_groups: Vec<(ResourceHash, Vec<WorldMatrix>)>,
}

impl LevelImage {
    /// Looks up the mesh path that hashes to `hash`, if the mesh list has one.
    pub fn mesh_for_hash(&self, hash: ResourceHash) -> Option<&str> {
        self.meshes
            .iter()
            .find(|mesh| hash.xxh64_matches(mesh))
            .map(String::as_str)
    }
}

pub fn read_level<R: Read>(r: &mut R) -> AnyResult<LevelImage> {
    expect_tag(r, LEVEL_MAGIC)?;
    let mesh_geometry_count = r.read_u32::<LE>()?;
    let mesh_count = r.read_u32::<LE>()?;
    let texture_count = r.read_u32::<LE>()?;
    let pipeline_set_count = r.read_u32::<LE>()?;
    let material_count = r.read_u32::<LE>()?;
    let instance_group_count = r.read_u32::<LE>()?;

    expect_tag(r, MESH_GEOMETRY_TAG)?;
    let mesh_geometries = read_string_table(r, mesh_geometry_count)?;
    expect_tag(r, TEXTURE_TAG)?;
    let textures = read_string_table(r, texture_count)?;
    expect_tag(r, MATERIAL_TAG)?;
    let materials = read_string_table(r, material_count)?;
    expect_tag(r, MESH_TAG)?;
    let meshes = read_string_table(r, mesh_count)?;

    expect_tag(r, MESH_INSTANCE_TAG)?;
    let group_count = r.read_u32::<LE>()?;
    ensure!(
        group_count == instance_group_count,
        "header declares {instance_group_count} instance groups, but the section has {group_count}"
    );

    let mut instance_groups = Vec::with_capacity(group_count.min(4096) as usize);
    for _ in 0..group_count {
        let hash = r.read_u64::<LE>()?;
        let instance_count = r.read_u32::<LE>()?;
        let mut matrices = Vec::with_capacity(instance_count.min(4096) as usize);
        for _ in 0..instance_count {
            matrices.push(r.read_packed::<WorldMatrix>()?);
        }
        instance_groups.push((hash, matrices));
    }

    Ok(LevelImage {
        mesh_geometries,
        meshes,
        textures,
        pipeline_set_count,
        materials,
        instance_groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn instance(mesh: &str, world_matrix: WorldMatrix) -> MeshInstance {
        MeshInstance {
            mesh: mesh.to_string(),
            world_matrix,
        }
    }

    fn translation(x: f32, y: f32, z: f32) -> WorldMatrix {
        let mut m = IDENTITY;
        m[3] = [x, y, z, 1.0];
        m
    }

    fn to_bytes(scene: &LevelScene) -> Vec<u8> {
        let mut writer = ResourceWriter::new(Vec::new());
        scene.write(&mut writer).unwrap();
        writer.into_inner()
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let m1 = translation(1.0, 0.0, 0.0);
        let m2 = translation(0.0, 2.0, 0.0);
        let groups = group_instances(
            vec![instance("A", IDENTITY), instance("B", m1), instance("A", m2)],
            InstanceOrder::FirstSeen,
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].mesh, "A");
        assert_eq!(groups[0].instances, [instance("A", IDENTITY), instance("A", m2)]);
        assert_eq!(groups[1].mesh, "B");
        assert_eq!(groups[1].instances, [instance("B", m1)]);
    }

    #[test]
    fn first_seen_order_isnt_sorted() {
        let groups = group_instances(
            vec![instance("Z", IDENTITY), instance("A", IDENTITY)],
            InstanceOrder::FirstSeen,
        );
        let meshes: Vec<_> = groups.iter().map(|g| g.mesh.as_str()).collect();
        assert_eq!(meshes, ["Z", "A"]);
    }

    #[test]
    fn sorted_order_is_stable() {
        let m1 = translation(1.0, 0.0, 0.0);
        let m2 = translation(2.0, 0.0, 0.0);
        let groups = group_instances(
            vec![instance("Z", m1), instance("A", IDENTITY), instance("Z", m2)],
            InstanceOrder::SortedByMesh,
        );

        let meshes: Vec<_> = groups.iter().map(|g| g.mesh.as_str()).collect();
        assert_eq!(meshes, ["A", "Z"]);
        assert_eq!(groups[1].instances, [instance("Z", m1), instance("Z", m2)]);
    }

    #[test]
    fn no_instances_no_groups() {
        assert!(group_instances(vec![], InstanceOrder::FirstSeen).is_empty());
    }

    #[test]
    fn empty_scene_layout() {
        let bytes = to_bytes(&LevelScene::default());

        let mut expected = Vec::new();
        expected.extend_from_slice(b"RESH");
        expected.extend_from_slice(&[0u8; 6 * 4]);
        expected.extend_from_slice(b"MSHG");
        expected.extend_from_slice(b"TEX ");
        expected.extend_from_slice(b"MAT ");
        expected.extend_from_slice(b"MESH");
        expected.extend_from_slice(b"MESI");
        expected.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn instance_section_layout() {
        let m1 = translation(4.0, 5.0, 6.0);
        let scene = LevelScene {
            meshes: vec!["A".into(), "B".into()],
            instance_groups: group_instances(
                vec![instance("A", IDENTITY), instance("B", m1), instance("A", IDENTITY)],
                InstanceOrder::FirstSeen,
            ),
            ..Default::default()
        };
        let bytes = to_bytes(&scene);

        // Header: instance group count is the last of six counts
        assert_eq!(&bytes[4 + 20..4 + 24], &2u32.to_le_bytes());

        let section = bytes
            .windows(4)
            .position(|w| w == b"MESI")
            .map(|p| &bytes[p + 4..])
            .unwrap();
        assert_eq!(&section[0..4], &2u32.to_le_bytes());
        assert_eq!(&section[4..12], &resource_hash("A").to_le_bytes());
        assert_eq!(&section[12..16], &2u32.to_le_bytes());

        let second_group = &section[16 + 2 * 64..];
        assert_eq!(&second_group[0..8], &resource_hash("B").to_le_bytes());
        assert_eq!(&second_group[8..12], &1u32.to_le_bytes());
        // Column 3, row 0 of the matrix
        assert_eq!(&second_group[12 + 48..12 + 52], &4.0f32.to_le_bytes());
        assert_eq!(second_group.len(), 12 + 64);
    }

    #[test]
    fn read_back() {
        let m1 = translation(1.0, 2.0, 3.0);
        let scene = LevelScene {
            mesh_geometries: vec!["Mesh/Box.mshg".into()],
            meshes: vec!["Mesh/Box.mesh".into(), "Mesh/Cone.mesh".into()],
            textures: vec!["Texture/Checker.dds".into()],
            pipeline_sets: vec!["Shader/Standard.pipelineset".into()],
            materials: vec!["Material/Red.mti".into()],
            instance_groups: group_instances(
                vec![instance("Mesh/Cone.mesh", m1), instance("Mesh/Box.mesh", IDENTITY)],
                InstanceOrder::FirstSeen,
            ),
        };

        let image = read_level(&mut Cursor::new(to_bytes(&scene))).unwrap();
        assert_eq!(image.meshes, scene.meshes);
        assert_eq!(image.textures, scene.textures);
        assert_eq!(image.pipeline_set_count, 1);
        assert_eq!(image.instance_groups.len(), 2);

        let (cone_hash, cone_matrices) = &image.instance_groups[0];
        assert_eq!(image.mesh_for_hash(*cone_hash), Some("Mesh/Cone.mesh"));
        assert_eq!(cone_matrices, &[m1]);
    }

    #[test]
    fn truncated_file_is_rejected() {
        let mut bytes = to_bytes(&LevelScene {
            meshes: vec!["A".into()],
            instance_groups: group_instances(
                vec![instance("A", IDENTITY)],
                InstanceOrder::FirstSeen,
            ),
            ..Default::default()
        });
        bytes.truncate(bytes.len() - 1);
        assert!(read_level(&mut Cursor::new(bytes)).is_err());
    }
}
