//! Command line argument parsing and validation.
//!
//! This module provides the CLI argument model using clap. Every command
//! works on a wix.json manifest; flags that name directories fall back to
//! environment variables where a build machine typically sets them.

use crate::bundler::{
    ManifestOverrides,
    settings::{DEFAULT_CHANGELOG_SKIP_LINES, DEFAULT_MANIFEST, DEFAULT_TEMPLATE_DIR},
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Windows installer packager driven by a JSON manifest
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_msi",
    version,
    about = "Windows installer packager driven by a JSON manifest",
    long_about = "Builds MSI packages with the WiX toolset from a wix.json manifest.

Usage:
  kodegen_bundler_msi add-files --dir build -i '**/*.exe' -i '**/*.dll'
  kodegen_bundler_msi set-guid
  kodegen_bundler_msi make --msi dist/hello.msi --version 1.2.3 --arch amd64
  kodegen_bundler_msi choco --input dist/hello.msi --version 1.2.3

Exit code 0 = the requested artifact exists."
)]
pub struct Args {
    /// Print only warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the WiX toolset and chocolatey are installed
    CheckEnv(CheckEnvArgs),

    /// Add files matched by glob patterns to the manifest's file tree
    AddFiles(AddFilesArgs),

    /// Assign identifiers to the upgrade code and every file
    SetGuid(SetGuidArgs),

    /// Render the WiX templates into the output directory
    GenerateTemplates(TemplateArgs),

    /// Write the candle/light build script for rendered templates
    GenWixCmd(WixCmdArgs),

    /// Run the build script in the output directory
    RunWixCmd(RunWixCmdArgs),

    /// Render, compile and link the MSI in one go
    Make(MakeArgs),

    /// Wrap a built MSI into a chocolatey package
    Choco(ChocoArgs),

    /// Convert a text file to RTF
    ToRtf(ConvertArgs),

    /// Re-encode a UTF-8 text file as windows-1252
    ToWindows(ConvertArgs),
}

/// Manifest location shared by every manifest command.
#[derive(ClapArgs, Debug, Clone)]
pub struct ManifestArg {
    /// Path to the wix.json manifest
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_MANIFEST)]
    pub path: PathBuf,
}

/// `check-env` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct CheckEnvArgs {
    /// Directory holding the WiX binaries
    #[arg(short, long, value_name = "DIR", env = "WIX_BIN")]
    pub bin: Option<PathBuf>,
}

/// `add-files` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct AddFilesArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    /// Directory the patterns are matched in
    #[arg(short, long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Include pattern; may hold several comma separated expressions
    #[arg(short, long, value_name = "GLOB", required = true)]
    pub includes: Vec<String>,

    /// Exclude pattern; may hold several comma separated expressions
    #[arg(short, long, value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Only check that the manifest already lists every matched file
    #[arg(short, long)]
    pub test: bool,
}

/// `set-guid` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct SetGuidArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    /// Replace identifiers that are already set
    #[arg(short, long)]
    pub force: bool,
}

/// Manifest overrides accepted by template rendering and `make`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Product version, e.g. 1.2.3-beta
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Version shown to users
    #[arg(long, value_name = "VERSION")]
    pub display: Option<String>,

    /// License file, converted to RTF when needed
    #[arg(short, long, value_name = "FILE")]
    pub license: Option<PathBuf>,

    /// Additional property as Id=Value; repeatable
    #[arg(long = "property", value_name = "ID=VALUE")]
    pub properties: Vec<String>,

    /// Compression level handed to the templates
    #[arg(long, value_name = "LEVEL")]
    pub compression: Option<String>,
}

impl From<&OverrideArgs> for ManifestOverrides {
    fn from(args: &OverrideArgs) -> Self {
        Self {
            version: args.version.clone(),
            display: args.display.clone(),
            license: args.license.clone(),
            compression: args.compression.clone(),
            properties: args.properties.clone(),
        }
    }
}

/// Template and output directories.
#[derive(ClapArgs, Debug, Clone)]
pub struct DirArgs {
    /// Directory holding the WiX templates
    #[arg(short, long, value_name = "DIR", env = "KODEGEN_MSI_TEMPLATES", default_value = DEFAULT_TEMPLATE_DIR)]
    pub src: PathBuf,

    /// Output directory; a fresh temporary directory when omitted
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

/// `generate-templates` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct TemplateArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    #[command(flatten)]
    pub dirs: DirArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// `gen-wix-cmd` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct WixCmdArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    #[command(flatten)]
    pub dirs: DirArgs,

    /// Target architecture passed to candle (386 and amd64 are accepted)
    #[arg(short, long, value_name = "ARCH", default_value = "")]
    pub arch: String,

    /// Path of the MSI to produce
    #[arg(short, long, value_name = "FILE")]
    pub msi: Option<PathBuf>,

    /// Directory holding the WiX binaries
    #[arg(short, long, value_name = "DIR", env = "WIX_BIN")]
    pub bin: Option<PathBuf>,
}

/// `run-wix-cmd` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct RunWixCmdArgs {
    /// Output directory holding the build script
    #[arg(short, long, value_name = "DIR")]
    pub out: PathBuf,
}

/// `make` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct MakeArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    #[command(flatten)]
    pub dirs: DirArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Target architecture passed to candle (386 and amd64 are accepted)
    #[arg(short, long, value_name = "ARCH", default_value = "")]
    pub arch: String,

    /// Path of the MSI to produce
    #[arg(short, long, value_name = "FILE")]
    pub msi: Option<PathBuf>,

    /// Directory holding the WiX binaries
    #[arg(short, long, value_name = "DIR", env = "WIX_BIN")]
    pub bin: Option<PathBuf>,

    /// Keep the output directory after a successful build
    #[arg(short, long)]
    pub keep: bool,
}

/// `choco` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct ChocoArgs {
    #[command(flatten)]
    pub manifest: ManifestArg,

    /// Directory holding the chocolatey templates
    #[arg(short, long, value_name = "DIR", env = "KODEGEN_MSI_CHOCO_TEMPLATES", default_value = "templates/choco")]
    pub src: PathBuf,

    /// Output directory; a fresh temporary directory when omitted
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Package version
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// MSI to package
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Shell command printing the release notes
    #[arg(short, long, value_name = "CMD")]
    pub changelog_cmd: Option<String>,

    /// Leading lines dropped from the release notes command output
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CHANGELOG_SKIP_LINES)]
    pub skip_changelog_lines: usize,

    /// Keep the output directory after a successful build
    #[arg(short, long)]
    pub keep: bool,
}

/// `to-rtf` and `to-windows` arguments.
#[derive(ClapArgs, Debug, Clone)]
pub struct ConvertArgs {
    /// Source text file
    #[arg(short, long, value_name = "FILE")]
    pub src: PathBuf,

    /// Destination file
    #[arg(short, long, value_name = "FILE")]
    pub out: PathBuf,

    /// Re-encode the text as windows-1252 first (to-rtf only)
    #[arg(short = 'e', long)]
    pub reencode: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::ToWindows(args) if args.reencode => {
                Err("--reencode only applies to to-rtf".to_string())
            }
            Command::AddFiles(args) if args.includes.iter().all(|i| i.trim().is_empty()) => {
                Err("at least one --includes pattern is required".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reencode_is_rejected_for_to_windows() {
        let args = Args::try_parse_from([
            "kodegen_bundler_msi",
            "to-windows",
            "-s",
            "a.txt",
            "-o",
            "b.txt",
            "-e",
        ])
        .unwrap();
        assert!(args.validate().is_err());
        let args = Args::try_parse_from(["kodegen_bundler_msi", "make"]).unwrap();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn repeatable_flags_accumulate() {
        let args = Args::try_parse_from([
            "kodegen_bundler_msi",
            "add-files",
            "--dir",
            "build",
            "-i",
            "**/*.exe",
            "-i",
            "*.dll,*.txt",
            "-e",
            "*.pdb",
        ])
        .unwrap();
        let Command::AddFiles(add) = args.command else {
            panic!("expected add-files");
        };
        assert_eq!(add.includes, ["**/*.exe", "*.dll,*.txt"]);
        assert_eq!(add.excludes, ["*.pdb"]);
        assert_eq!(add.manifest.path, PathBuf::from("wix.json"));
    }

    #[test]
    fn overrides_are_only_set_when_given() {
        let args = Args::try_parse_from([
            "kodegen_bundler_msi",
            "make",
            "--msi",
            "out.msi",
            "--version",
            "1.2.3",
            "--property",
            "A=1",
        ])
        .unwrap();
        let Command::Make(make) = args.command else {
            panic!("expected make");
        };
        let overrides = ManifestOverrides::from(&make.overrides);
        assert_eq!(overrides.version.as_deref(), Some("1.2.3"));
        assert!(overrides.display.is_none());
        assert_eq!(overrides.properties, ["A=1"]);
    }

    #[test]
    fn choco_skip_lines_defaults_to_two() {
        let args =
            Args::try_parse_from(["kodegen_bundler_msi", "choco", "--input", "a.msi"]).unwrap();
        let Command::Choco(choco) = args.command else {
            panic!("expected choco");
        };
        assert_eq!(choco.skip_changelog_lines, 2);
    }
}
