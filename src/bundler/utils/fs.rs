//! File system utilities for bundling.
//!
//! Provides idempotent directory operations for the staging directory and
//! file copies with automatic parent creation.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Component, Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::NotFound(format!("{} does not exist", from.display())));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!(
            "{} is not a file",
            from.display()
        )));
    }
    if let Some(dest_dir) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Path of `target` as seen from directory `base`.
///
/// Both paths must already be absolute and lexically clean. Paths on
/// different Windows prefixes have no relative form; `target` is returned as is.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();

    if let (Some(Component::Prefix(a)), Some(Component::Prefix(b))) =
        (base.first(), target_parts.first())
    {
        if a != b {
            return target.to_path_buf();
        }
    }

    let common = base
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base.len() {
        out.push("..");
    }
    for part in &target_parts[common..] {
        out.push(part.as_os_str());
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_walks_up_and_down() {
        assert_eq!(
            relative_path(Path::new("/a/out"), Path::new("/a/build/x.txt")),
            PathBuf::from("../build/x.txt")
        );
        assert_eq!(
            relative_path(Path::new("/a"), Path::new("/a/b/c")),
            PathBuf::from("b/c")
        );
        assert_eq!(
            relative_path(Path::new("/a/b/c"), Path::new("/a")),
            PathBuf::from("../..")
        );
        assert_eq!(relative_path(Path::new("/a"), Path::new("/a")), PathBuf::from("."));
    }

    #[tokio::test]
    async fn create_dir_all_with_erase_empties_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        create_dir_all(&dir, false).await.unwrap();
        std::fs::write(dir.join("stale"), "x").unwrap();
        create_dir_all(&dir, true).await.unwrap();
        assert!(dir.is_dir());
        assert!(!dir.join("stale").exists());
    }

    #[tokio::test]
    async fn copy_file_reports_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let err = copy_file(&tmp.path().join("nope"), &tmp.path().join("dst"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
