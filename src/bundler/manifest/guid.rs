//! Identifier assignment.
//!
//! Windows Installer correlates components across upgrades by GUID, so an
//! identifier once written to the manifest must never change unless forced.

use super::WixManifest;

/// Fresh uppercase hyphenated GUID.
fn new_guid() -> String {
    uuid::Uuid::new_v4().hyphenated().to_string().to_uppercase()
}

fn is_unset(guid: &Option<String>) -> bool {
    guid.as_deref().is_none_or(str::is_empty)
}

/// Assigns `slot` a new GUID if it is empty or `force` is set.
fn assign(slot: &mut Option<String>, force: bool) -> bool {
    if force || is_unset(slot) {
        *slot = Some(new_guid());
        true
    } else {
        false
    }
}

impl WixManifest {
    /// Whether any identifier is still unassigned.
    ///
    /// Incomplete manifests are rejected by template generation and command
    /// script generation.
    pub fn needs_guid(&self) -> bool {
        is_unset(&self.upgrade_code)
            || self
                .directory
                .all_files()
                .iter()
                .any(|f| is_unset(&f.guid))
    }

    /// Assigns the upgrade code and every file identifier.
    ///
    /// Existing identifiers are kept unless `force` is set, in which case all
    /// of them are regenerated. Returns whether anything changed.
    pub fn set_guids(&mut self, force: bool) -> bool {
        let mut changed = assign(&mut self.upgrade_code, force);
        self.directory.for_each_file_mut(&mut |file| {
            changed |= assign(&mut file.guid, force);
        });
        changed
    }
}
