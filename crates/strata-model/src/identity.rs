//! Entry identity keys.

use crate::{EntryKind, SettingEntry};
use std::fmt;

/// The key used to detect duplicate and overriding entries.
///
/// Two entries with equal identities never coexist in a resolved view: the
/// higher-precedence one shadows the other. The key is the kind plus the
/// name; the value never participates, so redefining a macro with a new
/// value still shadows the old definition rather than coexisting with it.
/// (Resolution never compares identities across kinds, so carrying the kind
/// here only keeps the key self-describing.)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryIdentity {
    kind: EntryKind,
    name: String,
}

impl EntryIdentity {
    /// Identity of the given entry.
    pub fn of(entry: &SettingEntry) -> EntryIdentity {
        EntryIdentity {
            kind: entry.kind(),
            name: entry.name().to_string(),
        }
    }

    /// Build an identity from parts.
    pub fn new(kind: EntryKind, name: impl Into<String>) -> EntryIdentity {
        EntryIdentity {
            kind,
            name: name.into(),
        }
    }

    /// The entry kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// The entry name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EntryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryFlags;

    #[test]
    fn test_macro_value_excluded() {
        let a = SettingEntry::macro_def("FOO", "1", EntryFlags::NONE);
        let b = SettingEntry::macro_def("FOO", "2", EntryFlags::NONE);
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a, b);
    }

    #[test]
    fn test_flags_excluded() {
        let a = SettingEntry::include_path("/usr/include", EntryFlags::NONE);
        let b = SettingEntry::include_path("/usr/include", EntryFlags::BUILTIN);
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn test_kind_distinguishes() {
        let a = SettingEntry::include_path("/opt/lib", EntryFlags::NONE);
        let b = SettingEntry::library_path("/opt/lib", EntryFlags::NONE);
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn test_display() {
        let id = EntryIdentity::new(EntryKind::Macro, "FOO");
        assert_eq!(id.to_string(), "macro:FOO");
    }
}
