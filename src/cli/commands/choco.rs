//! `choco`: wrap a built MSI into a chocolatey package.

use crate::{
    bundler::{ChocoSettings, ManifestOverrides, platform::windows::choco, settings},
    cli::{ChocoArgs, RuntimeConfig},
    error::Result,
};
use std::path::PathBuf;

pub async fn choco(args: ChocoArgs, config: &RuntimeConfig) -> Result<i32> {
    let settings = ChocoSettings {
        manifest_path: args.manifest.path,
        template_dir: args.src,
        out_dir: args.out.unwrap_or_else(settings::default_staging_dir),
        input: args.input,
        overrides: ManifestOverrides {
            version: args.version,
            ..Default::default()
        },
        changelog_cmd: args.changelog_cmd,
        changelog_skip_lines: args.skip_changelog_lines,
        package_dir: PathBuf::from("."),
        keep: args.keep,
    };

    config.section("Building chocolatey package")?;
    let package = choco::bundle_project(&settings).await?;
    config.success(&format!("Package created: {}", package.display()))?;
    Ok(0)
}
