//! Main MSI pipeline orchestration.
//!
//! This module provides the [`MsiBundler`] orchestrator. A build is a linear
//! sequence of [`MakeStep`]s; the first failing step ends the build with its
//! error. Nothing is rolled back, and the staging directory is left in place
//! for inspection.

use crate::bundler::{
    Result,
    error::{Error, ErrorExt},
    manifest::WixManifest,
    platform::windows::wix,
    settings::MsiSettings,
    templates,
    utils::{fs, rtf},
};
use path_absolutize::Absolutize;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// One step of [`MsiBundler::make`], in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MakeStep {
    Load,
    AssignIdentifiers,
    RemoveOutputDir,
    CreateOutputDir,
    LicenseToRtf,
    AddProperties,
    Normalize,
    RewriteFilePaths,
    FindTemplates,
    RenderTemplates,
    GenerateCommandScript,
    RunScript,
    Finish,
}

impl MakeStep {
    /// Every step, in the order `make` runs them.
    pub const SEQUENCE: [MakeStep; 13] = [
        Self::Load,
        Self::AssignIdentifiers,
        Self::RemoveOutputDir,
        Self::CreateOutputDir,
        Self::LicenseToRtf,
        Self::AddProperties,
        Self::Normalize,
        Self::RewriteFilePaths,
        Self::FindTemplates,
        Self::RenderTemplates,
        Self::GenerateCommandScript,
        Self::RunScript,
        Self::Finish,
    ];
}

impl fmt::Display for MakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "loading manifest",
            Self::AssignIdentifiers => "assigning identifiers",
            Self::RemoveOutputDir => "removing output directory",
            Self::CreateOutputDir => "creating output directory",
            Self::LicenseToRtf => "preparing license",
            Self::AddProperties => "adding properties",
            Self::Normalize => "normalizing manifest",
            Self::RewriteFilePaths => "rewriting file paths",
            Self::FindTemplates => "finding templates",
            Self::RenderTemplates => "rendering templates",
            Self::GenerateCommandScript => "generating build script",
            Self::RunScript => "running build script",
            Self::Finish => "finishing",
        };
        f.write_str(name)
    }
}

/// State threaded through the steps of one build.
#[derive(Default)]
struct MakeState {
    manifest: WixManifest,
    templates: Vec<PathBuf>,
    rendered: Vec<PathBuf>,
}

/// Main MSI orchestrator.
///
/// Each public operation is one CLI command: `generate-templates`,
/// `gen-wix-cmd` and `make`.
#[derive(Debug)]
pub struct MsiBundler {
    settings: MsiSettings,
}

impl MsiBundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: MsiSettings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &MsiSettings {
        &self.settings
    }

    /// Absolute MSI destination; required by script generation.
    fn artifact(&self) -> Result<PathBuf> {
        let msi = self
            .settings
            .msi()
            .ok_or_else(|| Error::Validation("--msi parameter must be set".into()))?;
        Ok(msi.absolutize()?.into_owned())
    }

    fn bin_dir(&self) -> Result<Option<PathBuf>> {
        match self.settings.bin_dir() {
            Some(dir) => Ok(Some(dir.absolutize()?.into_owned())),
            None => Ok(None),
        }
    }

    fn load_complete(&self) -> Result<WixManifest> {
        let manifest = WixManifest::load(self.settings.manifest_path())?;
        if manifest.needs_guid() {
            log::warn!("The manifest needs Guid, run: kodegen_bundler_msi set-guid");
            return Err(Error::IncompleteManifest);
        }
        Ok(manifest)
    }

    /// Renders the templates into the staging directory.
    ///
    /// Applies command line overrides and properties, normalizes and rewrites
    /// file paths first. The manifest on disk is not modified.
    pub async fn generate_templates(&self) -> Result<Vec<PathBuf>> {
        let out_dir = self.settings.out_dir();
        let overrides = self.settings.overrides();

        let mut manifest = self.load_complete()?;
        overrides.apply_identity(&mut manifest);
        overrides.add_properties(&mut manifest)?;
        manifest.normalize()?;
        manifest.rewrite_file_paths(out_dir)?;

        let tpls = templates::find(self.settings.template_dir(), "*.wxs")?;
        fs::create_dir_all(out_dir, false).await?;
        let rendered = templates::render_all(&manifest, &tpls, out_dir).await?;

        log::info!("Generated {} templates", rendered.len());
        Ok(rendered)
    }

    /// Writes the candle/light script for already rendered templates.
    ///
    /// Returns the script path.
    pub async fn generate_command_script(&self) -> Result<PathBuf> {
        let out_dir = self.settings.out_dir();
        let artifact = self.artifact()?;

        let tpls = templates::find(self.settings.template_dir(), "*.wxs")?;
        let built: Vec<PathBuf> = tpls
            .iter()
            .filter_map(|t| t.file_name().map(|n| out_dir.join(n)))
            .collect();

        let mut manifest = self.load_complete()?;
        manifest.normalize()?;
        manifest.rewrite_file_paths(out_dir)?;

        self.write_script(&manifest, &built, &artifact).await
    }

    async fn write_script(
        &self,
        manifest: &WixManifest,
        built: &[PathBuf],
        artifact: &Path,
    ) -> Result<PathBuf> {
        let flavor = self.settings.script_flavor();
        let bin_dir = self.bin_dir()?;
        let script = wix::generate_cmd(
            manifest,
            built,
            artifact,
            self.settings.arch(),
            bin_dir.as_deref(),
            flavor,
        )?;
        fs::create_dir_all(self.settings.out_dir(), false).await?;
        wix::write_script(self.settings.out_dir(), flavor, &script).await
    }

    /// Runs the full pipeline and returns the path of the built MSI.
    pub async fn make(&self) -> Result<PathBuf> {
        let artifact = self.artifact()?;
        let mut state = MakeState::default();

        for step in MakeStep::SEQUENCE {
            log::info!("{step}");
            if let Err(e) = self.run_step(step, &mut state, &artifact).await {
                log::error!(
                    "{step} failed; build files left in {}",
                    self.settings.out_dir().display()
                );
                return Err(e);
            }
        }

        log::info!("Created MSI: {}", artifact.display());
        Ok(artifact)
    }

    async fn run_step(&self, step: MakeStep, state: &mut MakeState, artifact: &Path) -> Result<()> {
        let out_dir = self.settings.out_dir();
        let overrides = self.settings.overrides();

        match step {
            MakeStep::Load => {
                state.manifest = WixManifest::load(self.settings.manifest_path())?;
                overrides.apply_identity(&mut state.manifest);
            }
            MakeStep::AssignIdentifiers => {
                if state.manifest.set_guids(false) {
                    log::warn!(
                        "Assigned missing identifiers for this build only; run set-guid to persist them"
                    );
                }
            }
            MakeStep::RemoveOutputDir => fs::remove_dir_all(out_dir).await?,
            MakeStep::CreateOutputDir => fs::create_dir_all(out_dir, false).await?,
            MakeStep::LicenseToRtf => {
                if !state.manifest.license.is_empty() {
                    let license = PathBuf::from(&state.manifest.license);
                    if !rtf::is_rtf(&license).await? {
                        let name = license
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| "license".into());
                        let target = out_dir.join(format!("{name}.rtf"));
                        log::info!("Converting license to RTF");
                        rtf::write_as_rtf(&license, &target, true).await?;
                        state.manifest.license = target.to_string_lossy().into_owned();
                    }
                }
            }
            MakeStep::AddProperties => overrides.add_properties(&mut state.manifest)?,
            MakeStep::Normalize => state.manifest.normalize()?,
            MakeStep::RewriteFilePaths => state.manifest.rewrite_file_paths(out_dir)?,
            MakeStep::FindTemplates => {
                state.templates = templates::find(self.settings.template_dir(), "*.wxs")?;
            }
            MakeStep::RenderTemplates => {
                state.rendered =
                    templates::render_all(&state.manifest, &state.templates, out_dir).await?;
            }
            MakeStep::GenerateCommandScript => {
                if let Some(parent) = artifact.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .fs_context("creating msi output directory", parent)?;
                }
                self.write_script(&state.manifest, &state.rendered, artifact)
                    .await?;
            }
            MakeStep::RunScript => wix::run_script(out_dir, self.settings.script_flavor()).await?,
            MakeStep::Finish => {
                if self.settings.keep() {
                    log::info!("Build files are available in {}", out_dir.display());
                } else {
                    fs::remove_dir_all(out_dir).await?;
                }
            }
        }
        Ok(())
    }
}
