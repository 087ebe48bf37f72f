//! Entry flag set.
//!
//! A closed set of four flags rather than an open integer bitmask, so that
//! flag policies stay exhaustive at compile time. Levels carry a pair of
//! these (`flags_to_set`, `flags_to_clear`) and stamp every entry they
//! ingest with `apply`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flags attached to a setting entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryFlags {
    /// The entry cannot be edited or removed by the user.
    pub read_only: bool,
    /// The entry was contributed by the toolchain, not entered by a user.
    pub builtin: bool,
    /// The entry value contains no unexpanded variables.
    pub resolved: bool,
    /// The entry name is a workspace-relative path, not a native one.
    pub workspace_path: bool,
}

impl EntryFlags {
    /// No flags set.
    pub const NONE: EntryFlags = EntryFlags {
        read_only: false,
        builtin: false,
        resolved: false,
        workspace_path: false,
    };

    /// Only `read_only`.
    pub const READ_ONLY: EntryFlags = EntryFlags {
        read_only: true,
        ..EntryFlags::NONE
    };

    /// Only `builtin`.
    pub const BUILTIN: EntryFlags = EntryFlags {
        builtin: true,
        ..EntryFlags::NONE
    };

    /// Only `resolved`.
    pub const RESOLVED: EntryFlags = EntryFlags {
        resolved: true,
        ..EntryFlags::NONE
    };

    /// Only `workspace_path`.
    pub const WORKSPACE_PATH: EntryFlags = EntryFlags {
        workspace_path: true,
        ..EntryFlags::NONE
    };

    /// Union of two flag sets.
    pub const fn union(self, other: EntryFlags) -> EntryFlags {
        EntryFlags {
            read_only: self.read_only || other.read_only,
            builtin: self.builtin || other.builtin,
            resolved: self.resolved || other.resolved,
            workspace_path: self.workspace_path || other.workspace_path,
        }
    }

    /// This flag set with every flag of `other` cleared.
    pub const fn without(self, other: EntryFlags) -> EntryFlags {
        EntryFlags {
            read_only: self.read_only && !other.read_only,
            builtin: self.builtin && !other.builtin,
            resolved: self.resolved && !other.resolved,
            workspace_path: self.workspace_path && !other.workspace_path,
        }
    }

    /// Apply a level flag policy: clear `to_clear`, then set `to_set`.
    ///
    /// When a flag appears in both masks, setting wins.
    pub const fn apply(self, to_set: EntryFlags, to_clear: EntryFlags) -> EntryFlags {
        self.without(to_clear).union(to_set)
    }

    /// Whether every flag of `other` is set here.
    pub const fn contains(self, other: EntryFlags) -> bool {
        (self.read_only || !other.read_only)
            && (self.builtin || !other.builtin)
            && (self.resolved || !other.resolved)
            && (self.workspace_path || !other.workspace_path)
    }

    /// Whether no flag is set.
    pub const fn is_empty(self) -> bool {
        !self.read_only && !self.builtin && !self.resolved && !self.workspace_path
    }
}

impl fmt::Display for EntryFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = Vec::new();
        if self.read_only {
            names.push("read_only");
        }
        if self.builtin {
            names.push("builtin");
        }
        if self.resolved {
            names.push("resolved");
        }
        if self.workspace_path {
            names.push("workspace_path");
        }
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_without() {
        let flags = EntryFlags::BUILTIN.union(EntryFlags::RESOLVED);
        assert!(flags.builtin);
        assert!(flags.resolved);
        assert!(!flags.read_only);

        let cleared = flags.without(EntryFlags::BUILTIN);
        assert!(!cleared.builtin);
        assert!(cleared.resolved);
    }

    #[test]
    fn test_apply_set_wins_over_clear() {
        let flags = EntryFlags::NONE.apply(EntryFlags::READ_ONLY, EntryFlags::READ_ONLY);
        assert!(flags.read_only);
    }

    #[test]
    fn test_apply_clears_then_sets() {
        let start = EntryFlags::READ_ONLY.union(EntryFlags::WORKSPACE_PATH);
        let applied = start.apply(EntryFlags::BUILTIN, EntryFlags::READ_ONLY);
        assert!(!applied.read_only);
        assert!(applied.builtin);
        assert!(applied.workspace_path);
    }

    #[test]
    fn test_contains() {
        let flags = EntryFlags::BUILTIN.union(EntryFlags::RESOLVED);
        assert!(flags.contains(EntryFlags::BUILTIN));
        assert!(flags.contains(EntryFlags::NONE));
        assert!(!flags.contains(EntryFlags::READ_ONLY));
        assert!(!flags.contains(EntryFlags::BUILTIN.union(EntryFlags::READ_ONLY)));
    }

    #[test]
    fn test_display() {
        assert_eq!(EntryFlags::NONE.to_string(), "none");
        assert_eq!(
            EntryFlags::BUILTIN.union(EntryFlags::RESOLVED).to_string(),
            "builtin|resolved"
        );
    }
}
