//! Assemble the `$md` envelope from a platform definition.

use crate::config::{ExportConfig, InstructionConfig, PlatformConfig};
use crate::error::BuildError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Compiled metadata block. Serialized field order matches the artifact contract:
/// name, label, icon, containerRepositories, ui, export.
#[derive(Debug, Serialize)]
pub struct MdBlock {
    pub name: String,
    pub label: Option<String>,
    pub icon: Option<String>,
    #[serde(rename = "containerRepositories", skip_serializing_if = "Option::is_none")]
    pub container_repositories: Option<Value>,
    pub ui: UiBlock,
    pub export: Vec<ExportBlock>,
}

#[derive(Debug, Serialize)]
pub struct UiBlock {
    #[serde(rename = "connectionOrientation", skip_serializing_if = "Option::is_none")]
    pub connection_orientation: Option<String>,
    #[serde(rename = "environmentDefaultGroup", skip_serializing_if = "Option::is_none")]
    pub environment_default_group: Option<String>,
    /// Present (possibly empty) whenever the definition has a `ui` section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<InstructionBlock>>,
}

#[derive(Debug, Serialize)]
pub struct InstructionBlock {
    pub label: Option<String>,
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBlock {
    pub download_button_text: Option<String>,
    pub file_format: Option<String>,
    pub template: String,
    pub template_lang: Option<String>,
}

/// Build the envelope, inlining instruction and template files as base64.
/// A referenced file that does not exist is skipped with a warning.
pub fn assemble(config: &PlatformConfig, platform_dir: &Path) -> Result<MdBlock, BuildError> {
    let ui = match &config.ui {
        Some(ui) => {
            let mut instructions = Vec::with_capacity(ui.instructions.len());
            for instruction in &ui.instructions {
                if let Some(block) = read_instruction(instruction, platform_dir)? {
                    instructions.push(block);
                }
            }
            UiBlock {
                connection_orientation: ui.connection_orientation.clone(),
                environment_default_group: ui.environment_default_group.clone(),
                instructions: Some(instructions),
            }
        }
        None => UiBlock {
            connection_orientation: None,
            environment_default_group: None,
            instructions: None,
        },
    };

    let mut export = Vec::with_capacity(config.exports.len());
    for declared in &config.exports {
        if let Some(block) = read_export(declared, platform_dir)? {
            export.push(block);
        }
    }

    Ok(MdBlock {
        name: config.name.clone(),
        label: config.label.clone(),
        icon: config.icon.clone(),
        container_repositories: config.container_repositories.clone(),
        ui,
        export,
    })
}

fn read_instruction(
    instruction: &InstructionConfig,
    platform_dir: &Path,
) -> Result<Option<InstructionBlock>, BuildError> {
    let path = platform_dir.join(&instruction.path);
    match encode_file(&path)? {
        Some(content) => {
            tracing::info!(label = ?instruction.label, "instruction added");
            Ok(Some(InstructionBlock {
                label: instruction.label.clone(),
                content,
            }))
        }
        None => {
            tracing::warn!(path = %instruction.path, "instruction file not found, skipping");
            Ok(None)
        }
    }
}

fn read_export(export: &ExportConfig, platform_dir: &Path) -> Result<Option<ExportBlock>, BuildError> {
    let path = platform_dir.join(&export.template_path);
    match encode_file(&path)? {
        Some(template) => {
            tracing::info!(button = ?export.download_button_text, "export template added");
            Ok(Some(ExportBlock {
                download_button_text: export.download_button_text.clone(),
                file_format: export.file_format.clone(),
                template,
                template_lang: export.template_lang.clone(),
            }))
        }
        None => {
            tracing::warn!(path = %export.template_path, "export template not found, skipping");
            Ok(None)
        }
    }
}

/// Raw bytes of `path` as standard base64, or None when the file is absent.
fn encode_file(path: &Path) -> Result<Option<String>, BuildError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(STANDARD.encode(bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BuildError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformConfig;
    use std::fs;

    fn parse(yaml: &str) -> PlatformConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn instruction_content_round_trips_through_base64() {
        let dir = tempfile::tempdir().unwrap();
        let body = "# Hello\n\nnon-ascii: \u{e9}\u{1F680}\n";
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/intro.md"), body).unwrap();

        let config = parse(
            "name: p\nui:\n  instructions:\n    - label: Intro\n      path: docs/intro.md\nschema: {}\n",
        );
        let md = assemble(&config, dir.path()).unwrap();
        let instructions = md.ui.instructions.unwrap();
        assert_eq!(instructions.len(), 1);
        let decoded = STANDARD.decode(&instructions[0].content).unwrap();
        assert_eq!(decoded, body.as_bytes());
    }

    #[test]
    fn missing_instruction_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse(
            "name: p\nui:\n  instructions:\n    - label: Ghost\n      path: docs/ghost.md\nschema: {}\n",
        );
        let md = assemble(&config, dir.path()).unwrap();
        assert_eq!(md.ui.instructions.unwrap().len(), 0);
    }

    #[test]
    fn export_template_round_trips_through_base64() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("values.tpl"), "cluster: {{ name }}\n").unwrap();
        let config = parse(
            "name: p\nexports:\n  - downloadButtonText: Download\n    fileFormat: yaml\n    templatePath: values.tpl\n    templateLang: mustache\nschema: {}\n",
        );
        let md = assemble(&config, dir.path()).unwrap();
        assert_eq!(md.export.len(), 1);
        let decoded = STANDARD.decode(&md.export[0].template).unwrap();
        assert_eq!(decoded, b"cluster: {{ name }}\n");
        assert_eq!(md.export[0].file_format.as_deref(), Some("yaml"));
    }

    #[test]
    fn no_exports_key_yields_empty_export_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse("name: p\nschema: {}\n");
        let md = assemble(&config, dir.path()).unwrap();
        assert!(md.export.is_empty());
    }

    #[test]
    fn ui_without_instructions_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse("name: p\nui:\n  connectionOrientation: environment\nschema: {}\n");
        let md = assemble(&config, dir.path()).unwrap();
        assert_eq!(md.ui.instructions.unwrap().len(), 0);
    }

    #[test]
    fn absent_ui_section_omits_the_instructions_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse("name: p\nschema: {}\n");
        let md = assemble(&config, dir.path()).unwrap();
        assert!(md.ui.instructions.is_none());
        let ui_json = serde_json::to_value(&md.ui).unwrap();
        assert_eq!(ui_json, serde_json::json!({}));
    }

    #[test]
    fn label_and_icon_serialize_as_null_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse("name: p\nschema: {}\n");
        let md = assemble(&config, dir.path()).unwrap();
        let value = serde_json::to_value(&md).unwrap();
        assert!(value["label"].is_null());
        assert!(value["icon"].is_null());
        assert!(value.get("containerRepositories").is_none());
    }
}
