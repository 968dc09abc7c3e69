use super::{parse_source, read_source, LoadError};
use lightn_res::level::{group_instances, InstanceOrder, LevelScene, MeshInstance};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};

/// Top level lists every scene must declare, even if empty.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "MeshGeometry",
    "Mesh",
    "Texture",
    "Material",
    "PipelineSet",
    "MeshInstance",
];

/// A parsed scene description.
///
/// ```toml
/// MeshGeometry = ["Mesh/Box/Box.mshg"]
/// Mesh = ["Mesh/Box/Box.mesh"]
/// Texture = []
/// Material = ["Material/Standard.mti"]
/// PipelineSet = ["Shader/Standard.pipelineset"]
///
/// [[MeshInstance]]
/// Mesh = "Mesh/Box/Box.mesh"
/// WorldMatrix = [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneDocument {
    #[serde(rename = "MeshGeometry")]
    pub mesh_geometries: Vec<String>,
    #[serde(rename = "Mesh")]
    pub meshes: Vec<String>,
    #[serde(rename = "Texture")]
    pub textures: Vec<String>,
    #[serde(rename = "Material")]
    pub materials: Vec<String>,
    #[serde(rename = "PipelineSet")]
    pub pipeline_sets: Vec<String>,
    #[serde(rename = "MeshInstance")]
    pub instances: Vec<MeshInstance>,
}

impl SceneDocument {
    /// Loads a scene description from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = read_source(path)?;
        Self::parse(path, &text)
    }

    /// Parses a scene description. `path` is only used for error reporting.
    pub fn parse(path: &Path, text: &str) -> Result<Self, LoadError> {
        // Checked up front, so that an absent list is reported as such instead of as a generic
        // deserialization failure
        let table: toml::Table = parse_source(path, text)?;
        for field in REQUIRED_FIELDS {
            if !table.contains_key(field) {
                return Err(LoadError::MissingField {
                    path: path.to_path_buf(),
                    field,
                });
            }
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|source| LoadError::Malformed {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Checks every instance's mesh reference. Unknown meshes are only rejected if
    /// `check_references` is set.
    pub fn validate(&self, path: &Path, check_references: bool) -> Result<(), LoadError> {
        let known: HashSet<&str> = self.meshes.iter().map(String::as_str).collect();

        for (index, instance) in self.instances.iter().enumerate() {
            if instance.mesh.is_empty() {
                return Err(LoadError::EmptyMeshReference {
                    path: path.to_path_buf(),
                    index,
                });
            }
            if check_references && !known.contains(instance.mesh.as_str()) {
                return Err(LoadError::DanglingReference {
                    path: path.to_path_buf(),
                    index,
                    mesh: instance.mesh.clone(),
                });
            }
        }

        Ok(())
    }

    /// Turns the document into a writable scene, grouping instances by mesh.
    pub fn export(self, order: InstanceOrder) -> LevelScene {
        let SceneDocument {
            mesh_geometries,
            meshes,
            textures,
            materials,
            pipeline_sets,
            instances,
        } = self;

        LevelScene {
            mesh_geometries,
            meshes,
            textures,
            pipeline_sets,
            materials,
            instance_groups: group_instances(instances, order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightn_res::level::IDENTITY;

    const SCENE: &str = r#"
MeshGeometry = ["Mesh/Box/Box.mshg"]
Mesh = ["Mesh/Box/Box.mesh", "Mesh/Cone/Cone.mesh"]
Texture = ["Texture/Checker.dds"]
Material = ["Material/Standard.mti"]
PipelineSet = ["Shader/Standard.pipelineset"]

[[MeshInstance]]
Mesh = "Mesh/Box/Box.mesh"
WorldMatrix = [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]

[[MeshInstance]]
Mesh = "Mesh/Cone/Cone.mesh"
WorldMatrix = [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [2.5, 0, -1, 1]]
"#;

    fn path() -> &'static Path {
        Path::new("Work/Level/Test.toml")
    }

    #[test]
    fn parses_all_lists() {
        let document = SceneDocument::parse(path(), SCENE).unwrap();
        assert_eq!(document.mesh_geometries, ["Mesh/Box/Box.mshg"]);
        assert_eq!(document.meshes.len(), 2);
        assert_eq!(document.pipeline_sets, ["Shader/Standard.pipelineset"]);
        assert_eq!(document.instances.len(), 2);
        assert_eq!(document.instances[0].world_matrix, IDENTITY);
        assert_eq!(document.instances[1].world_matrix[3], [2.5, 0.0, -1.0, 1.0]);
        document.validate(path(), true).unwrap();
    }

    #[test]
    fn every_list_is_required() {
        for missing in REQUIRED_FIELDS {
            let text: String = REQUIRED_FIELDS
                .iter()
                .filter(|&&field| field != missing)
                .map(|field| format!("{field} = []\n"))
                .collect();

            match SceneDocument::parse(path(), &text) {
                Err(LoadError::MissingField { field, .. }) => assert_eq!(field, missing),
                other => panic!("expected `{missing}` to be missing, got {other:?}"),
            }
        }
    }

    #[test]
    fn bad_matrix_is_malformed() {
        let text = SCENE.replace("[2.5, 0, -1, 1]", "[2.5, 0, -1]");
        assert!(matches!(
            SceneDocument::parse(path(), &text),
            Err(LoadError::Malformed { .. })
        ));
    }

    #[test]
    fn empty_scene() {
        let text: String = REQUIRED_FIELDS
            .iter()
            .map(|field| format!("{field} = []\n"))
            .collect();
        let document = SceneDocument::parse(path(), &text).unwrap();
        document.validate(path(), true).unwrap();

        let scene = document.export(InstanceOrder::FirstSeen);
        assert_eq!(scene, LevelScene::default());
    }

    #[test]
    fn dangling_reference() {
        let text = SCENE.replace("Mesh = [\"Mesh/Box/Box.mesh\", ", "Mesh = [");
        let document = SceneDocument::parse(path(), &text).unwrap();

        match document.validate(path(), true) {
            Err(LoadError::DanglingReference { index, mesh, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(mesh, "Mesh/Box/Box.mesh");
            }
            other => panic!("expected a dangling reference, got {other:?}"),
        }
        document.validate(path(), false).unwrap();
    }

    #[test]
    fn empty_mesh_reference() {
        let text = SCENE.replace("Mesh = \"Mesh/Cone/Cone.mesh\"", "Mesh = \"\"");
        let document = SceneDocument::parse(path(), &text).unwrap();
        assert!(matches!(
            document.validate(path(), false),
            Err(LoadError::EmptyMeshReference { index: 1, .. })
        ));
    }

    #[test]
    fn export_groups_instances() {
        let text = format!(
            "{SCENE}
[[MeshInstance]]
Mesh = \"Mesh/Box/Box.mesh\"
WorldMatrix = [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 1]]
"
        );
        let scene = SceneDocument::parse(path(), &text)
            .unwrap()
            .export(InstanceOrder::FirstSeen);

        assert_eq!(scene.instance_groups.len(), 2);
        assert_eq!(scene.instance_groups[0].mesh, "Mesh/Box/Box.mesh");
        assert_eq!(scene.instance_groups[0].instances.len(), 2);
        assert_eq!(scene.instance_groups[0].instances[1].world_matrix[0][0], 2.0);
        assert_eq!(scene.instance_count(), 3);
    }
}
