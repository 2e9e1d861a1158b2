//! Glob-driven file discovery.
//!
//! Expands include/exclude pattern groups into slash separated paths relative
//! to a base directory. A group is one command line value and may hold several
//! comma separated expressions; `*` matches within one path segment and `**`
//! across any number of segments.

use crate::bundler::{Result, error::Error};
use glob::{MatchOptions, Pattern};
use path_absolutize::Absolutize;
use std::{collections::BTreeSet, path::Path};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expands `groups` under `base_dir`.
///
/// Only regular files are returned. The set is ordered so manifests built from
/// it are identical across platforms regardless of directory listing order.
///
/// # Errors
///
/// With `fail_on_empty`, a group matching no regular file is
/// [`Error::NotFound`].
pub fn match_patterns(
    base_dir: &Path,
    groups: &[String],
    fail_on_empty: bool,
) -> Result<BTreeSet<String>> {
    let base = base_dir.absolutize()?.into_owned();
    let escaped_base = Pattern::escape(&base.to_string_lossy());

    let mut out = BTreeSet::new();
    for group in groups {
        let mut group_matches = 0usize;
        for expr in group.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let pattern = format!("{}/{}", escaped_base.trim_end_matches(['/', '\\']), expr);
            for entry in glob::glob_with(&pattern, MATCH_OPTIONS)? {
                let path = entry?;
                if !path.is_file() {
                    continue;
                }
                let rel = path.strip_prefix(&base).map_err(|_| {
                    Error::GenericError(format!(
                        "{} escapes base directory {}",
                        path.display(),
                        base.display()
                    ))
                })?;
                let rel = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                log::trace!("{expr} matched {rel}");
                group_matches += 1;
                out.insert(rel);
            }
        }
        if fail_on_empty && group_matches == 0 {
            return Err(Error::NotFound(format!(
                "files {group:?} do not exist in {}",
                base_dir.display()
            )));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::create_dir_all(tmp.path().join("sub/deep")).unwrap();
        fs::write(tmp.path().join("sub/b.txt"), "b").unwrap();
        fs::write(tmp.path().join("sub/c.tmp"), "c").unwrap();
        fs::write(tmp.path().join("sub/deep/d.txt"), "d").unwrap();
        tmp
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn recursive_wildcard_includes_root_level() {
        let tmp = tree();
        let found = match_patterns(tmp.path(), &["**/*.txt".into()], true).unwrap();
        assert_eq!(found, set(&["a.txt", "sub/b.txt", "sub/deep/d.txt"]));
    }

    #[test]
    fn single_star_stays_in_one_segment() {
        let tmp = tree();
        let found = match_patterns(tmp.path(), &["*".into()], true).unwrap();
        assert_eq!(found, set(&["a.txt"]));
    }

    #[test]
    fn comma_joined_expressions_form_one_group() {
        let tmp = tree();
        let found = match_patterns(tmp.path(), &["a.txt,sub/*.tmp".into()], true).unwrap();
        assert_eq!(found, set(&["a.txt", "sub/c.tmp"]));
    }

    #[test]
    fn empty_group_fails_only_when_required() {
        let tmp = tree();
        let groups = vec!["*.exe".to_string()];
        assert!(match_patterns(tmp.path(), &groups, false).unwrap().is_empty());
        assert!(matches!(
            match_patterns(tmp.path(), &groups, true),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn directories_are_not_matched() {
        let tmp = tree();
        let found = match_patterns(tmp.path(), &["sub/*".into()], true).unwrap();
        assert_eq!(found, set(&["sub/b.txt", "sub/c.tmp"]));
    }
}
