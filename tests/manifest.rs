mod common;

use kodegen_bundler_msi::bundler::{
    WixManifest,
    manifest::{File, add_files},
};
use std::path::Path;

fn paths(dir: &kodegen_bundler_msi::bundler::manifest::Directory) -> Vec<String> {
    dir.all_files().into_iter().map(|f| f.path.clone()).collect()
}

#[test]
fn tree_is_built_from_patterns_with_excludes() {
    let tmp = common::project();
    let build = tmp.path().join("build");
    let mut manifest = WixManifest::default();

    let report = add_files(
        &mut manifest,
        &build,
        &["**/*.txt,**/*.tmp".to_string()],
        &["sub/c.tmp".to_string()],
    )
    .unwrap();

    assert_eq!(report.added.len(), 2);
    assert_eq!(report.excluded.len(), 1);
    let root = &manifest.directory;
    assert_eq!(root.files.len(), 1);
    assert!(root.files[0].path.ends_with("/a.txt"));
    assert_eq!(root.directories.len(), 1);
    assert_eq!(root.directories[0].name, "sub");
    assert_eq!(root.directories[0].files.len(), 1);
    assert!(root.directories[0].files[0].path.ends_with("sub/b.txt"));
}

#[test]
fn adding_files_twice_changes_nothing() {
    let tmp = common::project();
    let build = tmp.path().join("build");
    let includes = ["**/*.txt".to_string()];
    let mut manifest = WixManifest::default();

    add_files(&mut manifest, &build, &includes, &[]).unwrap();
    let first = manifest.clone();
    let report = add_files(&mut manifest, &build, &includes, &[]).unwrap();

    assert!(!report.changed());
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(manifest, first);
}

#[test]
fn missing_include_match_is_an_error() {
    let tmp = common::project();
    let mut manifest = WixManifest::default();
    let result = add_files(
        &mut manifest,
        &tmp.path().join("build"),
        &["*.exe".to_string()],
        &[],
    );
    assert!(result.is_err());
    assert!(manifest.directory.files.is_empty());
}

#[test]
fn identifiers_are_stable_unless_forced() {
    let mut manifest = WixManifest::default();
    manifest.directory.files.push(File::new("a.txt"));

    assert!(manifest.needs_guid());
    assert!(manifest.set_guids(false));
    assert!(!manifest.needs_guid());
    let assigned = manifest.clone();

    assert!(!manifest.set_guids(false));
    assert_eq!(manifest, assigned);

    assert!(manifest.set_guids(true));
    assert_ne!(manifest.upgrade_code, assigned.upgrade_code);
    assert_ne!(
        manifest.directory.files[0].guid,
        assigned.directory.files[0].guid
    );
}

#[test]
fn version_is_derived_from_user_version() {
    let mut manifest: WixManifest = serde_json::from_str(common::FIXTURE).unwrap();
    manifest.normalize().unwrap();

    assert_eq!(manifest.version.msi, "1.2.3");
    assert_eq!(manifest.version.display, "1.2.3-beta");
    assert_eq!(manifest.version.hex, 0x0102_0003);
    assert_eq!(manifest.choco.id, "hello");
    assert_eq!(manifest.choco.authors, "acme");
}

#[test]
fn manifest_survives_save_and_load() {
    let tmp = common::project();
    let path = tmp.path().join("wix.json");
    let mut manifest = WixManifest::load(&path).unwrap();
    add_files(
        &mut manifest,
        &tmp.path().join("build"),
        &["**/*.txt".to_string()],
        &[],
    )
    .unwrap();
    manifest.set_guids(false);

    let copy = tmp.path().join("copy/wix.json");
    manifest.write(&copy).unwrap();
    assert_eq!(WixManifest::load(&copy).unwrap(), manifest);
}

#[test]
fn paths_are_rewritten_relative_to_staging() {
    let tmp = common::project();
    let mut manifest = WixManifest::default();
    manifest.directory.files.push(File::new(
        tmp.path().join("build/a.txt").to_string_lossy().into_owned(),
    ));
    manifest.rewrite_file_paths(&tmp.path().join("out")).unwrap();
    assert_eq!(paths(&manifest.directory), ["../build/a.txt"]);
    assert!(!Path::new(&manifest.directory.files[0].path).is_absolute());
}
