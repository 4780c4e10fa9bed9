//! Raw platform definition types matching the massdriver.yaml layout.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One platform definition, read from `<platform dir>/massdriver.yaml`.
/// `name` doubles as the artifact file stem; `schema` is carried verbatim
/// into the top level of the built artifact.
#[derive(Clone, Debug, Deserialize)]
pub struct PlatformConfig {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, rename = "containerRepositories")]
    pub container_repositories: Option<Value>,
    #[serde(default)]
    pub ui: Option<UiConfig>,
    #[serde(default)]
    pub exports: Vec<ExportConfig>,
    pub schema: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default)]
    pub connection_orientation: Option<String>,
    #[serde(default)]
    pub environment_default_group: Option<String>,
    #[serde(default)]
    pub instructions: Vec<InstructionConfig>,
}

/// A markdown document to inline into the artifact, path relative to the platform dir.
#[derive(Clone, Debug, Deserialize)]
pub struct InstructionConfig {
    #[serde(default)]
    pub label: Option<String>,
    pub path: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    #[serde(default)]
    pub download_button_text: Option<String>,
    #[serde(default)]
    pub file_format: Option<String>,
    pub template_path: String,
    #[serde(default)]
    pub template_lang: Option<String>,
}
