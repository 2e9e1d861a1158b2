//! Merging discovered files into the manifest's directory tree.

use super::{Directory, File, WixManifest};
use crate::bundler::{Result, discovery};
use std::path::Path;

/// Outcome of one [`add_files`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Paths inserted into the tree.
    pub added: Vec<String>,
    /// Paths already present in the tree.
    pub skipped: Vec<String>,
    /// Paths matched by both an include and an exclude pattern.
    pub excluded: Vec<String>,
}

impl MergeReport {
    /// Whether the tree was modified.
    pub fn changed(&self) -> bool {
        !self.added.is_empty()
    }
}

impl Directory {
    /// Inserts `file` at the directory chain named by `segments`.
    ///
    /// `segments` is the match's relative path split on `/`; the last segment is
    /// the file name and is not used for lookup. Directories are matched by name
    /// among siblings only. Returns `false` when a file with the same path is
    /// already listed.
    pub fn add_file(&mut self, file: File, segments: &[&str]) -> bool {
        match segments {
            [] | [_] => {
                if self.files.iter().any(|f| f.path == file.path) {
                    return false;
                }
                self.files.push(file);
                true
            }
            [head, rest @ ..] => {
                if let Some(dir) = self.directories.iter_mut().find(|d| d.name == *head) {
                    return dir.add_file(file, rest);
                }
                let mut dir = Directory::new(*head);
                let added = dir.add_file(file, rest);
                self.directories.push(dir);
                added
            }
        }
    }
}

/// Discovers files under `base_dir` and merges them into the manifest.
///
/// Excludes are expanded first and never need to match anything; every
/// include group must match at least one regular file. The merge only adds:
/// entries already in the tree are left alone, so repeated runs with a growing
/// include set accumulate.
pub fn add_files(
    manifest: &mut WixManifest,
    base_dir: &Path,
    includes: &[String],
    excludes: &[String],
) -> Result<MergeReport> {
    let excluded = discovery::match_patterns(base_dir, excludes, false)?;
    let included = discovery::match_patterns(base_dir, includes, true)?;

    let mut report = MergeReport::default();
    for rel in included {
        let path = clean_join(base_dir, &rel);
        if excluded.contains(&rel) {
            log::info!("    excluding {path}");
            report.excluded.push(path);
            continue;
        }
        let segments: Vec<&str> = rel.split('/').collect();
        if manifest.directory.add_file(File::new(path.clone()), &segments) {
            log::info!("    adding {path}");
            report.added.push(path);
        } else {
            log::debug!("    skipping {path} already listed");
            report.skipped.push(path);
        }
    }
    Ok(report)
}

/// `base/rel` cleaned lexically, with forward slashes.
///
/// `.` segments are dropped and `dir/..` pairs collapse, so every spelling of
/// the same base stores the same path.
fn clean_join(base: &Path, rel: &str) -> String {
    let base = base.to_string_lossy().replace('\\', "/");
    let absolute = base.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(rel.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            s => parts.push(s),
        }
    }
    let joined = parts.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_named_dirs_in_different_branches_stay_apart() {
        let mut root = Directory::default();
        assert!(root.add_file(File::new("a/bin/x"), &["a", "bin", "x"]));
        assert!(root.add_file(File::new("b/bin/x"), &["b", "bin", "x"]));
        assert_eq!(root.directories.len(), 2);
        assert_eq!(root.directories[0].directories[0].files[0].path, "a/bin/x");
        assert_eq!(root.directories[1].directories[0].files[0].path, "b/bin/x");
    }

    #[test]
    fn duplicate_path_is_skipped() {
        let mut root = Directory::default();
        assert!(root.add_file(File::new("d/x"), &["d", "x"]));
        assert!(!root.add_file(File::new("d/x"), &["d", "x"]));
        assert_eq!(root.directories.len(), 1);
        assert_eq!(root.directories[0].files.len(), 1);
    }

    #[test]
    fn existing_identifier_survives_remerge() {
        let mut root = Directory::default();
        root.files.push(File {
            path: "x".into(),
            guid: Some("KEEP".into()),
        });
        assert!(!root.add_file(File::new("x"), &["x"]));
        assert_eq!(root.files[0].guid.as_deref(), Some("KEEP"));
    }

    #[test]
    fn clean_join_normalizes_base_spelling() {
        assert_eq!(clean_join(Path::new("."), "a.txt"), "a.txt");
        assert_eq!(clean_join(Path::new("build/"), "a.txt"), "build/a.txt");
        assert_eq!(clean_join(Path::new("./build"), "a.txt"), "build/a.txt");
        assert_eq!(clean_join(Path::new("out\\bin"), "a.txt"), "out/bin/a.txt");
        assert_eq!(clean_join(Path::new("x/../build"), "sub/b.txt"), "build/sub/b.txt");
        assert_eq!(clean_join(Path::new("../build"), "a.txt"), "../build/a.txt");
        assert_eq!(clean_join(Path::new("/srv/./app/"), "a.txt"), "/srv/app/a.txt");
    }

    #[test]
    fn base_spelling_does_not_duplicate_entries() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("build/sub")).unwrap();
        std::fs::create_dir_all(tmp.path().join("other")).unwrap();
        std::fs::write(tmp.path().join("build/a.txt"), "a").unwrap();
        std::fs::write(tmp.path().join("build/sub/b.txt"), "b").unwrap();
        let includes = ["**/*.txt".to_string()];
        let mut manifest = WixManifest::default();

        let first = add_files(&mut manifest, &tmp.path().join("build"), &includes, &[]).unwrap();
        assert_eq!(first.added.len(), 2);

        for spelling in ["./build", "other/../build", "build/"] {
            let base = tmp.path().join(spelling);
            let report = add_files(&mut manifest, &base, &includes, &[]).unwrap();
            assert!(!report.changed(), "{spelling} added {:?}", report.added);
        }
        assert_eq!(manifest.directory.all_files().len(), 2);
    }
}
