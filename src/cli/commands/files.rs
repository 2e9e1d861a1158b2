//! Manifest editing commands: `add-files` and `set-guid`.

use crate::{
    bundler::{WixManifest, manifest},
    cli::{AddFilesArgs, RuntimeConfig, SetGuidArgs},
    error::{CliError, Result},
};

pub fn add_files(args: AddFilesArgs, config: &RuntimeConfig) -> Result<i32> {
    let path = &args.manifest.path;
    let mut wix = WixManifest::load(path)?;

    config.section(&format!("Adding files from {}", args.dir.display()))?;
    let report = manifest::add_files(&mut wix, &args.dir, &args.includes, &args.excludes)?;

    if args.test {
        if report.changed() {
            for added in &report.added {
                config.indent(&format!("missing {added}"))?;
            }
            return Err(CliError::ExecutionFailed {
                command: "add-files --test".into(),
                reason: "file list not up to date".into(),
            }
            .into());
        }
        config.success("The file list is up to date")?;
        return Ok(0);
    }

    wix.write(path)?;
    config.success(&format!(
        "{} added, {} already listed, {} excluded",
        report.added.len(),
        report.skipped.len(),
        report.excluded.len()
    ))?;
    config.success("The file is saved on disk")?;
    Ok(0)
}

pub fn set_guid(args: SetGuidArgs, config: &RuntimeConfig) -> Result<i32> {
    let path = &args.manifest.path;
    let mut wix = WixManifest::load(path)?;

    if wix.set_guids(args.force) {
        config.success("The manifest was updated")?;
    } else {
        config.progress("The manifest was not updated")?;
    }

    wix.write(path)?;
    config.success("The file is saved on disk")?;
    Ok(0)
}
