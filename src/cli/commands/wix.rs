//! WiX commands: `generate-templates`, `gen-wix-cmd`, `run-wix-cmd`, `make`.

use crate::{
    bundler::{
        ManifestOverrides, MsiBundler, SettingsBuilder,
        platform::windows::wix::{ScriptFlavor, run_script},
    },
    cli::{DirArgs, MakeArgs, ManifestArg, RunWixCmdArgs, RuntimeConfig, TemplateArgs, WixCmdArgs},
    error::Result,
};
use std::path::PathBuf;

fn base_settings(manifest: &ManifestArg, dirs: &DirArgs) -> SettingsBuilder {
    let builder = SettingsBuilder::new()
        .manifest_path(&manifest.path)
        .template_dir(&dirs.src);
    match &dirs.out {
        Some(out) => builder.out_dir(out),
        None => builder,
    }
}

fn with_tooling(
    builder: SettingsBuilder,
    arch: &str,
    msi: Option<&PathBuf>,
    bin: Option<&PathBuf>,
) -> SettingsBuilder {
    let builder = builder.arch(arch);
    let builder = match msi {
        Some(msi) => builder.msi(msi),
        None => builder,
    };
    match bin {
        Some(bin) => builder.bin_dir(bin),
        None => builder,
    }
}

pub async fn generate_templates(args: TemplateArgs, config: &RuntimeConfig) -> Result<i32> {
    let settings = base_settings(&args.manifest, &args.dirs)
        .overrides(ManifestOverrides::from(&args.overrides))
        .build();
    let bundler = MsiBundler::new(settings);

    config.section("Generating templates")?;
    let rendered = bundler.generate_templates().await?;
    for path in &rendered {
        config.indent(&path.display().to_string())?;
    }
    config.success(&format!(
        "Templates rendered into {}",
        bundler.settings().out_dir().display()
    ))?;
    Ok(0)
}

pub async fn gen_wix_cmd(args: WixCmdArgs, config: &RuntimeConfig) -> Result<i32> {
    let settings = with_tooling(
        base_settings(&args.manifest, &args.dirs),
        &args.arch,
        args.msi.as_ref(),
        args.bin.as_ref(),
    )
    .build();
    let bundler = MsiBundler::new(settings);

    let script = bundler.generate_command_script().await?;
    config.success(&format!("Build script written to {}", script.display()))?;
    Ok(0)
}

pub async fn run_wix_cmd(args: RunWixCmdArgs, config: &RuntimeConfig) -> Result<i32> {
    config.progress(&format!("Running build script in {}", args.out.display()))?;
    run_script(&args.out, ScriptFlavor::host()).await?;
    config.success("Build script completed")?;
    Ok(0)
}

pub async fn make(args: MakeArgs, config: &RuntimeConfig) -> Result<i32> {
    let settings = with_tooling(
        base_settings(&args.manifest, &args.dirs),
        &args.arch,
        args.msi.as_ref(),
        args.bin.as_ref(),
    )
    .overrides(ManifestOverrides::from(&args.overrides))
    .keep(args.keep)
    .build();
    let bundler = MsiBundler::new(settings);

    config.section("Building MSI")?;
    let msi = bundler.make().await?;
    config.success(&format!("Package created: {}", msi.display()))?;
    Ok(0)
}
