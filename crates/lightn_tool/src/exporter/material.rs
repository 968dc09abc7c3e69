use lightn_res::{
    material::{Material, MaterialInstance, MaterialParameter, ParameterValue},
    resource_hash,
};
use lightn_utils::{AnyResult, AnyhowResultExt};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ParameterKind {
    Float,
    Float2,
    Float3,
    Float4,
    Uint,
    Texture,
}

/// A single shader parameter.
///
/// ```toml
/// [[Parameters]]
/// Name = "BaseColor"
/// Type = "Float4"
/// Value = [1.0, 0.5, 0.5, 1.0]
/// ```
///
/// Texture parameters take a texture path, which is hashed like every other resource path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterSpecification {
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: ParameterKind,
    pub value: toml::Value,
}

impl ParameterSpecification {
    pub fn export(self) -> AnyResult<MaterialParameter> {
        let ParameterSpecification { name, kind, value } = self;
        let context = || format!("parameter `{name}` doesn't hold a valid {kind:?}");

        use ParameterKind::*;
        let value = match kind {
            Float => ParameterValue::Float(value.try_into().otherwise_with(context)?),
            Float2 => ParameterValue::Float2(value.try_into().otherwise_with(context)?),
            Float3 => ParameterValue::Float3(value.try_into().otherwise_with(context)?),
            Float4 => ParameterValue::Float4(value.try_into().otherwise_with(context)?),
            Uint => ParameterValue::Uint(value.try_into().otherwise_with(context)?),
            Texture => {
                let path: String = value.try_into().otherwise_with(context)?;
                ParameterValue::Texture(resource_hash(&path))
            }
        };

        Ok(MaterialParameter::new(&name, value))
    }
}

fn export_parameters(parameters: Vec<ParameterSpecification>) -> AnyResult<Vec<MaterialParameter>> {
    parameters
        .into_iter()
        .map(ParameterSpecification::export)
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MaterialSpecification {
    pub pipeline_set: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpecification>,
}

impl MaterialSpecification {
    pub fn export(self) -> AnyResult<Material> {
        Ok(Material {
            pipeline_set: resource_hash(&self.pipeline_set),
            parameters: export_parameters(self.parameters)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MaterialInstanceSpecification {
    pub material: String,
    /// If not given, instances get [`MaterialInstance::default_parameters`].
    pub parameters: Option<Vec<ParameterSpecification>>,
}

impl MaterialInstanceSpecification {
    pub fn export(self) -> AnyResult<MaterialInstance> {
        Ok(MaterialInstance {
            material: resource_hash(&self.material),
            parameters: match self.parameters {
                Some(parameters) => export_parameters(parameters)?,
                None => MaterialInstance::default_parameters(),
            },
        })
    }
}
