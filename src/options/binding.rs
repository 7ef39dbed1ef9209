use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shader stage that reads the light volume buffers.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Fragment shader.
    Fragment,
    /// Compute shader.
    Compute,
}

impl ShaderStage {
    /// wgpu stage flag.
    pub fn to_wgpu(self) -> wgpu::ShaderStages {
        match self {
            Self::Vertex => wgpu::ShaderStages::VERTEX,
            Self::Fragment => wgpu::ShaderStages::FRAGMENT,
            Self::Compute => wgpu::ShaderStages::COMPUTE,
        }
    }
}

/// Where the two buffers are bound.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Binding", inline)]
#[serde(default)]
pub struct BindingOptions {
    /// Bind group index the buffers are set at.
    #[schemars(title = "Group", range(max = 3))]
    pub group: u32,
    /// Binding of the info buffer; the range buffer uses the next slot.
    #[schemars(title = "First Binding")]
    pub first_binding: u32,
    /// Stages the bindings are visible to.
    #[schemars(title = "Stages")]
    pub stages: Vec<ShaderStage>,
}

impl BindingOptions {
    /// Union of the configured stages.
    pub fn visibility(&self) -> wgpu::ShaderStages {
        self.stages
            .iter()
            .fold(wgpu::ShaderStages::NONE, |acc, s| acc | s.to_wgpu())
    }

    /// Binding of the info buffer.
    pub fn info_binding(&self) -> u32 {
        self.first_binding
    }

    /// Binding of the range buffer.
    pub fn range_binding(&self) -> u32 {
        self.first_binding + 1
    }
}

impl Default for BindingOptions {
    fn default() -> Self {
        Self {
            group: 0,
            first_binding: 5,
            stages: vec![ShaderStage::Vertex, ShaderStage::Fragment],
        }
    }
}
