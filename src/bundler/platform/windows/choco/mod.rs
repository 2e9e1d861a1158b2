//! Chocolatey repackaging of a built MSI.
//!
//! Wraps an existing installer into a `.nupkg`: the MSI is checksummed and
//! copied into the staging directory, the chocolatey templates are rendered
//! next to it and `choco pack` builds the package there.

mod changelog;

pub use changelog::{capture_changelog, drop_leading_lines};

use crate::bundler::{
    builder::{calculate_sha256, resolve_tool},
    error::{Context, Error, Result},
    manifest::WixManifest,
    settings::ChocoSettings,
    templates,
    utils::fs,
};
use path_absolutize::Absolutize;
use std::{path::PathBuf, process::Stdio};

/// Builds the chocolatey package and returns the path of the copied `.nupkg`.
///
/// The staging directory is left in place on failure.
pub async fn bundle_project(settings: &ChocoSettings) -> Result<PathBuf> {
    let mut manifest = WixManifest::load(&settings.manifest_path)?;

    let out_dir = settings.out_dir.absolutize()?.into_owned();
    fs::create_dir_all(&out_dir, true).await?;

    settings.overrides.apply_identity(&mut manifest);
    manifest.normalize()?;

    let tpls = templates::find(&settings.template_dir, "*")?;

    let msi_file = settings
        .input
        .file_name()
        .context("--input must name an msi file")?
        .to_string_lossy()
        .into_owned();
    manifest.choco.build_dir = out_dir.to_string_lossy().into_owned();
    manifest.choco.msi_sum = calculate_sha256(&settings.input).await?;
    manifest.choco.msi_file = msi_file.clone();

    if let Some(cmd) = settings.changelog_cmd.as_deref().filter(|c| !c.trim().is_empty()) {
        manifest.choco.changelog = capture_changelog(cmd, settings.changelog_skip_lines).await?;
    }

    fs::copy_file(&settings.input, &out_dir.join(&msi_file)).await?;

    templates::render_all(&manifest, &tpls, &out_dir).await?;

    let choco = resolve_tool(None, "choco")?;
    log::info!("Running choco pack in {}", out_dir.display());
    let status = tokio::process::Command::new(&choco)
        .arg("pack")
        .current_dir(&out_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "choco pack".into(),
            error: e,
        })?;
    if !status.success() {
        return Err(Error::ExternalTool {
            command: "choco pack".into(),
            status,
        });
    }

    let built = out_dir.join(nupkg_name(&manifest.choco.id, &manifest.version.msi));
    let user_version = if manifest.version.user.is_empty() {
        &manifest.version.msi
    } else {
        &manifest.version.user
    };
    let dst = settings
        .package_dir
        .join(nupkg_name(&manifest.choco.id, user_version));
    fs::copy_file(&built, &dst).await?;

    if settings.keep {
        log::info!("Build files are available in {}", out_dir.display());
    } else {
        fs::remove_dir_all(&out_dir).await?;
    }

    Ok(dst)
}

/// `<id>.<version>.nupkg`, the file name `choco pack` produces.
pub fn nupkg_name(id: &str, version: &str) -> String {
    format!("{id}.{version}.nupkg")
}
