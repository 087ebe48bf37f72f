//! The setting entry value type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EntryFlags, EntryIdentity, EntryKind};

/// One build setting: an include path, include file, macro definition,
/// macro file, library path, or library file.
///
/// Entries are immutable values; "modifying" an entry means constructing a
/// new one (see [`SettingEntry::with_flags`]). The constructors enforce the
/// kind rules: only macro entries carry a value, every other kind keeps it
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettingEntry {
    kind: EntryKind,
    name: String,
    value: String,
    flags: EntryFlags,
}

impl SettingEntry {
    /// Create an entry of any kind.
    ///
    /// The value is dropped unless the kind carries one.
    pub fn new(
        kind: EntryKind,
        name: impl Into<String>,
        value: impl Into<String>,
        flags: EntryFlags,
    ) -> SettingEntry {
        let value = if kind.has_value() {
            value.into()
        } else {
            String::new()
        };
        SettingEntry {
            kind,
            name: name.into(),
            value,
            flags,
        }
    }

    /// An include search path entry.
    pub fn include_path(name: impl Into<String>, flags: EntryFlags) -> SettingEntry {
        SettingEntry::new(EntryKind::IncludePath, name, "", flags)
    }

    /// A force-included file entry.
    pub fn include_file(name: impl Into<String>, flags: EntryFlags) -> SettingEntry {
        SettingEntry::new(EntryKind::IncludeFile, name, "", flags)
    }

    /// A macro definition entry.
    pub fn macro_def(
        name: impl Into<String>,
        value: impl Into<String>,
        flags: EntryFlags,
    ) -> SettingEntry {
        SettingEntry::new(EntryKind::Macro, name, value, flags)
    }

    /// A macro file entry.
    pub fn macro_file(name: impl Into<String>, flags: EntryFlags) -> SettingEntry {
        SettingEntry::new(EntryKind::MacroFile, name, "", flags)
    }

    /// A library search path entry.
    pub fn library_path(name: impl Into<String>, flags: EntryFlags) -> SettingEntry {
        SettingEntry::new(EntryKind::LibraryPath, name, "", flags)
    }

    /// A library file entry.
    pub fn library_file(name: impl Into<String>, flags: EntryFlags) -> SettingEntry {
        SettingEntry::new(EntryKind::LibraryFile, name, "", flags)
    }

    /// The entry kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// The entry name (the path for path kinds, the macro name for macros).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The macro value; empty for every other kind.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The entry flags.
    pub fn flags(&self) -> EntryFlags {
        self.flags
    }

    /// A copy of this entry with a flag policy applied:
    /// `(flags \ to_clear) ∪ to_set`.
    pub fn with_flags(&self, to_set: EntryFlags, to_clear: EntryFlags) -> SettingEntry {
        SettingEntry {
            kind: self.kind,
            name: self.name.clone(),
            value: self.value.clone(),
            flags: self.flags.apply(to_set, to_clear),
        }
    }

    /// The override-detection key for this entry.
    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity::of(self)
    }

    /// Whether this entry has the same kind, name, and value as `other`,
    /// ignoring flags.
    ///
    /// Distinct from identity equality, which also ignores the macro value.
    pub fn same_contents(&self, other: &SettingEntry) -> bool {
        self.kind == other.kind && self.name == other.name && self.value == other.value
    }
}

impl fmt::Display for SettingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.has_value() && !self.value.is_empty() {
            write!(f, "{}={}", self.name, self.value)
        } else {
            f.write_str(&self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_dropped_for_path_kinds() {
        let entry = SettingEntry::new(
            EntryKind::IncludePath,
            "/usr/include",
            "ignored",
            EntryFlags::NONE,
        );
        assert_eq!(entry.value(), "");
    }

    #[test]
    fn test_macro_keeps_value() {
        let entry = SettingEntry::macro_def("FOO", "BAR", EntryFlags::NONE);
        assert_eq!(entry.name(), "FOO");
        assert_eq!(entry.value(), "BAR");
    }

    #[test]
    fn test_with_flags() {
        let entry = SettingEntry::include_path("/usr/include", EntryFlags::READ_ONLY);
        let restamped = entry.with_flags(
            EntryFlags::BUILTIN.union(EntryFlags::RESOLVED),
            EntryFlags::READ_ONLY,
        );
        assert!(restamped.flags().builtin);
        assert!(restamped.flags().resolved);
        assert!(!restamped.flags().read_only);
        // The original is untouched.
        assert!(entry.flags().read_only);
    }

    #[test]
    fn test_same_contents_ignores_flags() {
        let a = SettingEntry::macro_def("FOO", "1", EntryFlags::NONE);
        let b = SettingEntry::macro_def("FOO", "1", EntryFlags::BUILTIN);
        let c = SettingEntry::macro_def("FOO", "2", EntryFlags::NONE);
        assert!(a.same_contents(&b));
        assert!(!a.same_contents(&c));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SettingEntry::macro_def("FOO", "BAR", EntryFlags::NONE).to_string(),
            "FOO=BAR"
        );
        assert_eq!(
            SettingEntry::macro_def("FOO", "", EntryFlags::NONE).to_string(),
            "FOO"
        );
        assert_eq!(
            SettingEntry::include_path("/usr/include", EntryFlags::NONE).to_string(),
            "/usr/include"
        );
    }
}
