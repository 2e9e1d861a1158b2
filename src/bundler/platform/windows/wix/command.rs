//! Build script generation.

use super::ScriptFlavor;
use crate::bundler::{Result, error::Error, manifest::WixManifest};
use std::path::{Path, PathBuf};

/// Extensions loaded by both the compiler and the linker.
const COMPILE_EXTENSIONS: [&str; 2] = ["WixUtilExtension", "WixUIExtension"];
const LINK_EXTENSIONS: [&str; 2] = ["WixUIExtension", "WixUtilExtension"];

/// Translates Go-style architecture names to WiX ones.
///
/// `386` and `amd64` become `x86` and `x64`; any other value is returned
/// unchanged and left for `candle` to accept or reject.
pub fn map_arch(arch: &str) -> &str {
    match arch {
        "386" => "x86",
        "amd64" => "x64",
        other => other,
    }
}

fn quote(arg: &str, flavor: ScriptFlavor) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./\\:=+,".contains(c));
    if plain {
        return arg.to_string();
    }
    match flavor {
        ScriptFlavor::Batch => format!("\"{arg}\""),
        ScriptFlavor::Shell => format!("'{}'", arg.replace('\'', r"'\''")),
    }
}

fn tool(bin_dir: Option<&Path>, name: &str) -> String {
    match bin_dir {
        Some(dir) => dir.join(name).to_string_lossy().into_owned(),
        None => name.to_string(),
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Validation(format!("template {} has no file name", path.display())))
}

/// Generates the candle/light script for `templates`.
///
/// One compile step per template, in the given order, then one link step
/// over all compiled objects producing `artifact`. Templates are referenced
/// by file name and `artifact` is used as given, so relative paths resolve
/// against the staging directory the script runs in.
///
/// # Errors
///
/// [`Error::IncompleteManifest`] if any identifier is unassigned, and
/// [`Error::Validation`] for an empty template list.
pub fn generate_cmd(
    manifest: &WixManifest,
    templates: &[PathBuf],
    artifact: &Path,
    arch: &str,
    bin_dir: Option<&Path>,
    flavor: ScriptFlavor,
) -> Result<String> {
    if manifest.needs_guid() {
        return Err(Error::IncompleteManifest);
    }
    if templates.is_empty() {
        return Err(Error::Validation("no templates to compile".into()));
    }

    let candle = quote(&tool(bin_dir, "candle"), flavor);
    let light = quote(&tool(bin_dir, "light"), flavor);
    let mut lines: Vec<String> = match flavor {
        ScriptFlavor::Batch => vec!["@echo off".into()],
        ScriptFlavor::Shell => vec!["#!/bin/sh".into(), "set -e".into()],
    };
    let mut push = |command: Vec<String>| {
        lines.push(command.join(" "));
        if flavor == ScriptFlavor::Batch {
            lines.push("if errorlevel 1 exit /b 1".into());
        }
    };

    let mut objects = Vec::with_capacity(templates.len());
    for template in templates {
        let source = file_name(template)?;
        let object = match source.rsplit_once('.') {
            Some((stem, _)) => format!("{stem}.wixobj"),
            None => format!("{source}.wixobj"),
        };

        let mut command = vec![candle.clone()];
        if !arch.is_empty() {
            command.push("-arch".into());
            command.push(quote(map_arch(arch), flavor));
        }
        for ext in COMPILE_EXTENSIONS {
            command.push("-ext".into());
            command.push(ext.into());
        }
        command.push("-out".into());
        command.push(quote(&object, flavor));
        command.push(quote(&source, flavor));
        push(command);

        objects.push(object);
    }

    let mut command = vec![light];
    for ext in LINK_EXTENSIONS {
        command.push("-ext".into());
        command.push(ext.into());
    }
    command.extend(["-sacl".into(), "-spdb".into(), "-out".into()]);
    command.push(quote(&artifact.to_string_lossy(), flavor));
    command.extend(objects.iter().map(|o| quote(o, flavor)));
    push(command);

    let eol = flavor.line_ending();
    let mut script = lines.join(eol);
    script.push_str(eol);
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::manifest::File;

    fn complete() -> WixManifest {
        let mut m = WixManifest::default();
        m.directory.files.push(File::new("a.txt"));
        m.set_guids(false);
        m
    }

    #[test]
    fn maps_go_arch_names_and_passes_others_through() {
        assert_eq!(map_arch("amd64"), "x64");
        assert_eq!(map_arch("386"), "x86");
        assert_eq!(map_arch("arm64"), "arm64");
        assert_eq!(map_arch("ia64"), "ia64");
    }

    #[test]
    fn rejects_incomplete_manifest() {
        let mut m = complete();
        m.directory.files[0].guid = None;
        let err = generate_cmd(
            &m,
            &[PathBuf::from("a.wxs")],
            Path::new("out.msi"),
            "",
            None,
            ScriptFlavor::Shell,
        )
        .unwrap_err();
        assert!(matches!(err, Error::IncompleteManifest));
    }

    #[test]
    fn batch_checks_errorlevel_after_each_step() {
        let script = generate_cmd(
            &complete(),
            &[PathBuf::from("a.wxs")],
            Path::new("out.msi"),
            "",
            None,
            ScriptFlavor::Batch,
        )
        .unwrap();
        assert!(script.starts_with("@echo off\r\n"));
        assert_eq!(script.matches("if errorlevel 1 exit /b 1").count(), 2);
        assert!(!script.contains("-arch"));
    }

    #[test]
    fn bin_dir_and_spaces_are_quoted() {
        let script = generate_cmd(
            &complete(),
            &[PathBuf::from("my product.wxs")],
            Path::new("/abs/dist/hello app.msi"),
            "x86",
            Some(Path::new("/opt/wix tools")),
            ScriptFlavor::Shell,
        )
        .unwrap();
        assert!(script.contains("'/opt/wix tools/candle' -arch x86"));
        assert!(script.contains("-out 'my product.wixobj' 'my product.wxs'"));
        assert!(script.contains("-out '/abs/dist/hello app.msi' 'my product.wixobj'"));
    }
}
