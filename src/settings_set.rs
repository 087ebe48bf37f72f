//! The per-kind settings stack and its resolution algorithm.
//!
//! A `SettingsSet` is an ordered stack of provenance levels for one entry
//! kind, rank 0 being the highest precedence. Resolution is first-seen-wins
//! across the stack, refined by undef propagation: a level's undef set
//! suppresses same-named entries in every lower-precedence level even when
//! nothing replaces them.

use std::collections::{BTreeSet, HashMap, HashSet};

use strata_model::{EntryIdentity, SettingEntry};

use crate::level::Level;

/// Which levels `SettingsSet::entries` draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelMask {
    /// Every level.
    All,
    /// Read-only levels only.
    ReadOnly,
    /// Writable levels only.
    Writable,
}

impl LevelMask {
    fn admits(&self, level: &Level) -> bool {
        match self {
            LevelMask::All => true,
            LevelMask::ReadOnly => level.is_read_only(),
            LevelMask::Writable => !level.is_read_only(),
        }
    }
}

/// An ordered stack of levels for one entry kind.
#[derive(Debug, Clone)]
pub struct SettingsSet {
    levels: Vec<Level>,
}

impl SettingsSet {
    /// Build a stack from levels whose ranks match their positions.
    pub fn new(levels: Vec<Level>) -> SettingsSet {
        for (position, level) in levels.iter().enumerate() {
            assert!(
                level.rank() == position,
                "level rank {} placed at position {}",
                level.rank(),
                position
            );
        }
        SettingsSet { levels }
    }

    /// The levels, in rank order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The level at the given rank.
    pub fn level(&self, rank: usize) -> &Level {
        &self.levels[rank]
    }

    /// Mutable access to the level at the given rank.
    pub fn level_mut(&mut self, rank: usize) -> &mut Level {
        &mut self.levels[rank]
    }

    /// The highest-precedence writable rank: where edits land by default.
    ///
    /// Panics if every level is read-only; a usable stack always carries a
    /// writable level.
    pub fn default_writable_rank(&self) -> usize {
        self.levels
            .iter()
            .position(|l| !l.is_read_only())
            .expect("settings stack has no writable level")
    }

    /// Recompute every record's override state.
    ///
    /// Must run after any structural change and before visibility is
    /// queried. The pass replaces the derived state wholesale: first a
    /// first-seen-wins sweep in rank order, then undef propagation into
    /// lower-precedence levels.
    pub fn adjust_override_state(&mut self) {
        let mut seen: HashSet<EntryIdentity> = HashSet::new();
        for level in &mut self.levels {
            for record in level.records_mut() {
                let id = record.entry().identity();
                if seen.contains(&id) {
                    record.set_overridden(true);
                } else {
                    record.set_overridden(false);
                    seen.insert(id);
                }
            }
        }

        // Undef propagation: an undefined name suppresses records in every
        // lower-precedence level, with or without a replacement entry.
        for rank in 0..self.levels.len() {
            let (upper, lower) = self.levels.split_at_mut(rank + 1);
            if let Some(undef) = upper[rank].undef_names() {
                for level in lower.iter_mut() {
                    for record in level.records_mut() {
                        if undef.contains(record.entry().name()) {
                            record.set_overridden(true);
                        }
                    }
                }
            }
        }
    }

    /// The resolved view: visible entries of every mask-compatible level,
    /// highest precedence first.
    pub fn entries(&mut self, mask: LevelMask) -> Vec<SettingEntry> {
        self.adjust_override_state();
        let mut out = Vec::new();
        for level in &self.levels {
            if mask.admits(level) {
                out.extend(level.visible_entries().cloned());
            }
        }
        out
    }

    /// Re-apply an edited flat entry list.
    ///
    /// Placement rules, in order, for each desired entry:
    /// - contents match a record somewhere in the stack → the entry keeps
    ///   that provenance (re-inserted there if the level is writable, left
    ///   in place if it is read-only);
    /// - otherwise (new entry, or an edit such as a macro redefinition) →
    ///   inserted at the default writable level, where it shadows the
    ///   original.
    ///
    /// When the default writable level supports overriding, its undef set is
    /// also reconciled: names recorded in lower-precedence levels that the
    /// desired list no longer contains become undefined, and names the list
    /// re-introduces are un-undefined. Names undefined for reasons outside
    /// this stack (no lower-level record) are preserved.
    pub fn apply_entries(&mut self, desired: &[SettingEntry]) {
        let default_rank = self.default_writable_rank();

        // Provenance snapshot of the current state. First (highest
        // precedence) occurrence wins; a separate set tracks identities
        // recorded below the default level for undef reconciliation.
        let mut prior: HashMap<EntryIdentity, (usize, SettingEntry)> = HashMap::new();
        let mut below_default: HashSet<EntryIdentity> = HashSet::new();
        for level in &self.levels {
            for record in level.records() {
                let id = record.entry().identity();
                if level.rank() > default_rank {
                    below_default.insert(id.clone());
                }
                prior
                    .entry(id)
                    .or_insert_with(|| (level.rank(), record.entry().clone()));
            }
        }

        for level in self.levels.iter_mut() {
            if !level.is_read_only() {
                level.clear();
            }
        }

        for entry in desired {
            match prior.get(&entry.identity()) {
                Some((rank, held)) if entry.same_contents(held) => {
                    // Unchanged: keep its provenance. A read-only level
                    // still holds the record, nothing to insert.
                    if !self.levels[*rank].is_read_only() {
                        self.levels[*rank].add_entry(entry.clone());
                    }
                }
                _ => {
                    self.levels[default_rank].add_entry(entry.clone());
                }
            }
        }

        if self.levels[default_rank].supports_override() {
            let desired_ids: HashSet<EntryIdentity> =
                desired.iter().map(|e| e.identity()).collect();
            let mut undef: BTreeSet<String> = self.levels[default_rank]
                .undef_names()
                .cloned()
                .unwrap_or_default();
            for entry in desired {
                undef.remove(entry.name());
            }
            for id in &below_default {
                if !desired_ids.contains(id) {
                    undef.insert(id.name().to_string());
                }
            }
            self.levels[default_rank].set_undef_names(undef);
        }

        self.adjust_override_state();
    }
}
