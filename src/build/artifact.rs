//! Merge the envelope with the platform schema and write the artifact.

use crate::build::envelope::MdBlock;
use crate::error::BuildError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Reserved top-level key holding the compiled metadata.
pub const MD_KEY: &str = "$md";

/// Shallow-merge: `$md` first, then the schema's keys as top-level peers.
/// A `$md` key inside the schema is silently replaced by the envelope.
pub fn merge_with_schema(md: MdBlock, schema: &Map<String, Value>) -> Result<Value, BuildError> {
    let envelope =
        serde_json::to_value(&md).map_err(|e| BuildError::Serialize(md.name.clone(), e))?;
    let mut out = Map::with_capacity(schema.len() + 1);
    out.insert(MD_KEY.to_string(), envelope);
    for (key, value) in schema {
        if key != MD_KEY {
            out.insert(key.clone(), value.clone());
        }
    }
    Ok(Value::Object(out))
}

/// Write `<out_dir>/<name>.json` as indented JSON, creating the directory and
/// overwriting any previous artifact.
pub fn write_artifact(out_dir: &Path, name: &str, artifact: &Value) -> Result<PathBuf, BuildError> {
    fs::create_dir_all(out_dir).map_err(|source| BuildError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let path = out_dir.join(format!("{name}.json"));
    let mut body = serde_json::to_string_pretty(artifact)
        .map_err(|e| BuildError::Serialize(name.to_string(), e))?;
    body.push('\n');
    fs::write(&path, body).map_err(|source| BuildError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
