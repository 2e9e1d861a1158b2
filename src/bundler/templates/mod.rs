//! Template discovery and rendering.
//!
//! Templates are handlebars files rendered against the serialized manifest.
//! Besides the manifest fields the render context carries:
//!
//! - `properties` - resolved `{id, value}` pairs in declaration order
//! - `property` - id to value map, last definition wins
//! - `directories_flat` - every directory below the root as `{id, parent_id, name}`
//! - `files_flat` - every file as `{id, guid, path, directory_id}`
//!
//! The flat lists let WiX templates declare the tree with `DirectoryRef`
//! elements instead of recursive partials.

use crate::bundler::{
    Result,
    error::{Context, Error, ErrorExt},
    manifest::{Directory, WixManifest},
};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Directory id of the manifest's root directory in the render context.
pub const ROOT_DIRECTORY_ID: &str = "INSTALLDIR";

/// Lists template files in `dir` whose name matches `pattern`.
///
/// The search is not recursive; results are sorted by file name so the
/// rendering and compile order is stable.
pub fn find(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = glob::Pattern::new(pattern)?;
    if !dir.is_dir() {
        return Err(Error::NotFound(format!(
            "template directory {} does not exist",
            dir.display()
        )));
    }

    let mut found = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| Error::GenericError(e.to_string()))?;
        if entry.file_type().is_file() && matcher.matches(&entry.file_name().to_string_lossy()) {
            found.push(entry.into_path());
        }
    }
    found.sort();

    if found.is_empty() {
        return Err(Error::NotFound(format!(
            "No templates {pattern} found in {}",
            dir.display()
        )));
    }
    Ok(found)
}

#[derive(Serialize)]
struct FlatDirectory {
    id: String,
    parent_id: String,
    name: String,
}

#[derive(Serialize)]
struct FlatFile {
    id: String,
    guid: String,
    path: String,
    name: String,
    directory_id: String,
}

fn flatten(
    dir: &Directory,
    dir_id: &str,
    dirs: &mut Vec<FlatDirectory>,
    files: &mut Vec<FlatFile>,
) {
    for file in &dir.files {
        let name = file.path.rsplit('/').next().unwrap_or(&file.path).to_string();
        files.push(FlatFile {
            id: format!("File{}", files.len() + 1),
            guid: file.guid.clone().unwrap_or_default(),
            path: file.path.clone(),
            name,
            directory_id: dir_id.to_string(),
        });
    }
    for child in &dir.directories {
        let id = format!("Dir{}", dirs.len() + 1);
        dirs.push(FlatDirectory {
            id: id.clone(),
            parent_id: dir_id.to_string(),
            name: child.name.clone(),
        });
        flatten(child, &id, dirs, files);
    }
}

/// Builds the handlebars context for `manifest`.
///
/// Property values are resolved here, so checksum properties read their file
/// at render time.
pub async fn render_context(manifest: &WixManifest) -> Result<Value> {
    let mut context = match serde_json::to_value(manifest)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut list = Vec::with_capacity(manifest.properties.len());
    let mut by_id = BTreeMap::new();
    for prop in &manifest.properties {
        let value = prop.value.resolve(&manifest.version).await?;
        by_id.insert(prop.id.clone(), value.clone());
        list.push(json!({ "id": prop.id, "value": value }));
    }
    context.insert("properties".into(), Value::Array(list));
    context.insert("property".into(), serde_json::to_value(by_id)?);

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    flatten(&manifest.directory, ROOT_DIRECTORY_ID, &mut dirs, &mut files);
    context.insert("root_directory_id".into(), json!(ROOT_DIRECTORY_ID));
    context.insert("directories_flat".into(), serde_json::to_value(dirs)?);
    context.insert("files_flat".into(), serde_json::to_value(files)?);

    Ok(Value::Object(context))
}

/// Renders one template file to `dst`.
pub async fn render(context: &Value, template: &Path, dst: &Path) -> Result<()> {
    let source = tokio::fs::read_to_string(template)
        .await
        .fs_context("reading template", template)?;

    let mut handlebars = Handlebars::new();
    let name = template.to_string_lossy();
    handlebars.register_template_string(&name, source)?;
    let rendered = handlebars.render(&name, context)?;

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating template output directory", parent)?;
    }
    tokio::fs::write(dst, rendered)
        .await
        .fs_context("writing rendered template", dst)?;
    log::debug!("Rendered {} -> {}", template.display(), dst.display());
    Ok(())
}

/// Renders every template into `out_dir`, keeping file names.
///
/// Returns the rendered paths in template order.
pub async fn render_all(
    manifest: &WixManifest,
    templates: &[PathBuf],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let context = render_context(manifest).await?;
    let mut rendered = Vec::with_capacity(templates.len());
    for template in templates {
        let file_name = template
            .file_name()
            .context(format_args!("{} has no file name", template.display()))?;
        let dst = out_dir.join(file_name);
        render(&context, template, &dst).await?;
        rendered.push(dst);
    }
    Ok(rendered)
}
