//! Provenance levels.
//!
//! A level is one layer of a settings stack: an ordered bag of entries from
//! a single provenance (user, environment, discovered) plus the policies the
//! layer imposes: a flag transform stamped on every entry it ingests, a
//! mutability rule, and whether the layer may carry an undef set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use strata_model::{EntryFlags, SettingEntry};

/// Where a level's entries come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelOrigin {
    /// Values the user wrote into the tool's options.
    User,
    /// Values contributed by the environment/toolchain.
    Environment,
    /// Values discovered by scanning a built tool.
    Discovered,
}

impl fmt::Display for LevelOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelOrigin::User => f.write_str("user"),
            LevelOrigin::Environment => f.write_str("environment"),
            LevelOrigin::Discovered => f.write_str("discovered"),
        }
    }
}

/// One entry held by a level, together with its derived override state.
///
/// The `overridden` flag is owned by the resolution pass
/// (`SettingsSet::adjust_override_state`), which recomputes it wholesale;
/// nothing else mutates it.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    entry: SettingEntry,
    overridden: bool,
}

impl EntryRecord {
    fn new(entry: SettingEntry) -> EntryRecord {
        EntryRecord {
            entry,
            overridden: false,
        }
    }

    /// The held entry.
    pub fn entry(&self) -> &SettingEntry {
        &self.entry
    }

    /// Whether a higher-precedence entry or undef currently hides this one.
    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    pub(crate) fn set_overridden(&mut self, overridden: bool) {
        self.overridden = overridden;
    }
}

/// One provenance layer of a settings stack.
#[derive(Debug, Clone)]
pub struct Level {
    rank: usize,
    origin: LevelOrigin,
    flags_to_set: EntryFlags,
    flags_to_clear: EntryFlags,
    read_only: bool,
    override_supported: bool,
    records: Vec<EntryRecord>,
    undef_names: Option<BTreeSet<String>>,
}

impl Level {
    /// Create an empty, writable level with no flag policy.
    pub fn new(rank: usize, origin: LevelOrigin) -> Level {
        Level {
            rank,
            origin,
            flags_to_set: EntryFlags::NONE,
            flags_to_clear: EntryFlags::NONE,
            read_only: false,
            override_supported: false,
            records: Vec::new(),
            undef_names: None,
        }
    }

    /// Set the flag transform stamped on every ingested entry.
    pub fn with_flag_policy(mut self, to_set: EntryFlags, to_clear: EntryFlags) -> Level {
        self.flags_to_set = to_set;
        self.flags_to_clear = to_clear;
        self
    }

    /// Mark the level read-only (its records survive `apply_entries`).
    pub fn with_read_only(mut self, read_only: bool) -> Level {
        self.read_only = read_only;
        self
    }

    /// Allow the level to carry an undef set.
    pub fn with_override_support(mut self, supported: bool) -> Level {
        self.override_supported = supported;
        self
    }

    /// Position in the stack; 0 is the highest precedence.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The level's provenance.
    pub fn origin(&self) -> LevelOrigin {
        self.origin
    }

    /// Whether the level refuses mutation through the write path.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether the level may carry an undef set.
    pub fn supports_override(&self) -> bool {
        self.override_supported
    }

    /// Ingest an entry, stamping it with the level's flag policy.
    ///
    /// The record starts non-overridden; run
    /// `SettingsSet::adjust_override_state` before querying visibility.
    pub fn add_entry(&mut self, raw: SettingEntry) {
        let stamped = raw.with_flags(self.flags_to_set, self.flags_to_clear);
        self.records.push(EntryRecord::new(stamped));
    }

    /// Drop all records.
    ///
    /// Calling this on a read-only level is a caller bug.
    pub fn clear(&mut self) {
        assert!(
            !self.read_only,
            "attempted to clear a read-only {} level",
            self.origin
        );
        self.records.clear();
    }

    /// Replace the undef set. An empty set clears it.
    ///
    /// Calling this on a level without override support is a caller bug.
    pub fn set_undef_names(&mut self, names: BTreeSet<String>) {
        assert!(
            self.override_supported,
            "undef set on a {} level without override support",
            self.origin
        );
        self.undef_names = if names.is_empty() { None } else { Some(names) };
    }

    /// The undef set, if one is present and non-empty.
    pub fn undef_names(&self) -> Option<&BTreeSet<String>> {
        self.undef_names.as_ref()
    }

    /// Entries not currently overridden, in insertion order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &SettingEntry> + '_ {
        self.records
            .iter()
            .filter(|r| !r.overridden)
            .map(|r| r.entry())
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[EntryRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [EntryRecord] {
        &mut self.records
    }

    /// Whether the level holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
