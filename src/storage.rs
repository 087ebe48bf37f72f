//! Per-kind entry storage and the per-tool storage map.
//!
//! `EntryStorage` is the cache orchestrator for one `(tool, kind)` pair: it
//! materializes the three-level settings stack from the tool's collaborators
//! on first access, keeps it valid across option edits, and serializes user
//! edits back into raw option values. `EntryStorageMap` holds one storage
//! per kind for a tool, created lazily, so invalidation stays scoped to the
//! kind whose options actually changed.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use strata_model::{
    EntryFlags, EntryKind, OptionStoreError, SettingEntry, ToolContext,
};

use crate::convert::{
    entry_to_option_value, macro_name_value, option_path_value_to_entry, strip_quotes,
};
use crate::explain::ExplainReport;
use crate::level::{Level, LevelOrigin};
use crate::settings_set::{LevelMask, SettingsSet};
use crate::snapshot::{SettingsSnapshot, SnapshotError};

/// Rank of the user level in the stack layout.
pub const RANK_USER: usize = 0;
/// Rank of the environment level.
pub const RANK_ENVIRONMENT: usize = 1;
/// Rank of the discovered level.
pub const RANK_DISCOVERED: usize = 2;

/// The per-kind settings cache for one tool.
///
/// Owns a lazily built [`SettingsSet`] and a dirty flag. Invalidation via
/// [`options_changed`](EntryStorage::options_changed) is advisory: the stale
/// stack is kept until the next query rebuilds it.
#[derive(Debug)]
pub struct EntryStorage {
    kind: EntryKind,
    set: Option<SettingsSet>,
    cache_inited: bool,
}

impl EntryStorage {
    /// Create an empty storage for one kind. Nothing is queried until the
    /// first entry access.
    pub fn new(kind: EntryKind) -> EntryStorage {
        EntryStorage {
            kind,
            set: None,
            cache_inited: false,
        }
    }

    /// The kind this storage serves.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the cached stack is current.
    pub fn is_cache_valid(&self) -> bool {
        self.cache_inited
    }

    /// Mark the cache stale. Safe to call redundantly; the rebuild happens
    /// on the next query, not here.
    pub fn options_changed(&mut self) {
        if self.cache_inited {
            debug!(kind = %self.kind, "settings cache invalidated");
        }
        self.cache_inited = false;
    }

    /// The resolved entries for this kind, highest precedence first.
    pub fn entries(&mut self, ctx: &mut ToolContext<'_>) -> Vec<SettingEntry> {
        self.cached_set(ctx).entries(LevelMask::All)
    }

    /// Append the resolved entries for this kind to `list`.
    pub fn append_entries(&mut self, ctx: &mut ToolContext<'_>, list: &mut Vec<SettingEntry>) {
        list.extend(self.entries(ctx));
    }

    /// Re-apply an edited entry list, or restore the tool's defaults.
    ///
    /// `None` removes the user and undefine options backing this kind
    /// entirely and marks the cache stale; the stack is rebuilt from the
    /// tool's defaults on the next query. `Some` runs the stack's
    /// `apply_entries` and writes the user level back to the option store:
    /// its visible entries as one raw value each, and its undef set into the
    /// paired undefine option when the kind supports overriding.
    pub fn set_entries(
        &mut self,
        ctx: &mut ToolContext<'_>,
        entries: Option<&[SettingEntry]>,
    ) -> Result<(), OptionStoreError> {
        let Some(desired) = entries else {
            debug!(kind = %self.kind, "restoring default options");
            ctx.options.remove_options(self.kind)?;
            self.cache_inited = false;
            return Ok(());
        };

        let kind = self.kind;
        let set = self.cached_set(ctx);
        set.apply_entries(desired);

        let user = set.level(RANK_USER);
        let values: Vec<String> = user
            .visible_entries()
            .map(|entry| entry_to_option_value(entry, ctx.paths))
            .collect();
        let undef: Option<Vec<String>> = user
            .supports_override()
            .then(|| user.undef_names().cloned().unwrap_or_default().into_iter().collect());

        // A rejected write leaves the stack ahead of the store (or, when the
        // second write fails, the store half-updated). Drop the cache so the
        // next read rebuilds from whatever the store actually holds.
        if let Err(error) = self.write_back(ctx, kind, values, undef) {
            warn!(kind = %kind, %error, "option write failed, invalidating settings cache");
            self.cache_inited = false;
            return Err(error);
        }
        Ok(())
    }

    fn write_back(
        &mut self,
        ctx: &mut ToolContext<'_>,
        kind: EntryKind,
        values: Vec<String>,
        undef: Option<Vec<String>>,
    ) -> Result<(), OptionStoreError> {
        ctx.options.set_option_values(kind, values)?;
        if let Some(names) = undef {
            ctx.options.set_undef_values(kind, names)?;
        }
        Ok(())
    }

    /// A structured account of the current resolution state.
    pub fn explain(&mut self, ctx: &mut ToolContext<'_>) -> ExplainReport {
        let kind = self.kind;
        ExplainReport::from_set(kind, self.cached_set(ctx))
    }

    /// A fingerprinted snapshot of the resolved entries.
    pub fn snapshot(&mut self, ctx: &mut ToolContext<'_>) -> Result<SettingsSnapshot, SnapshotError> {
        let entries = self.entries(ctx);
        SettingsSnapshot::new(self.kind, entries)
    }

    fn cached_set(&mut self, ctx: &mut ToolContext<'_>) -> &mut SettingsSet {
        if !self.cache_inited || self.set.is_none() {
            debug!(kind = %self.kind, "building settings cache");
            self.set = Some(build_set(self.kind, ctx));
            self.cache_inited = true;
        }
        self.set.as_mut().expect("settings cache built above")
    }
}

/// Build the three-level stack for one kind from the tool's collaborators.
fn build_set(kind: EntryKind, ctx: &mut ToolContext<'_>) -> SettingsSet {
    // The undefine option's existence decides the override policy for the
    // whole stack: without one the user has no way to negate a discovered
    // entry, so the discovered level is locked.
    let undef_option = ctx.options.undef_option(kind);
    let override_supported = undef_option.is_some();

    let mut user = Level::new(RANK_USER, LevelOrigin::User).with_override_support(override_supported);
    for option in ctx.options.options(kind) {
        for value in &option.values {
            user.add_entry(user_entry_from_value(kind, value, ctx));
        }
    }
    if let Some(option) = undef_option {
        let names: BTreeSet<String> = option
            .values
            .iter()
            .map(|v| strip_quotes(v).to_string())
            .filter(|n| !n.is_empty())
            .collect();
        user.set_undef_names(names);
    }

    let mut environment = Level::new(RANK_ENVIRONMENT, LevelOrigin::Environment)
        .with_read_only(true)
        .with_flag_policy(
            EntryFlags::READ_ONLY.union(EntryFlags::RESOLVED),
            EntryFlags::NONE,
        );
    if let Some(path_kind) = kind.build_path_kind() {
        for path in ctx.build_paths.build_paths(path_kind) {
            environment.add_entry(SettingEntry::new(kind, path, "", EntryFlags::NONE));
        }
    }

    let mut discovered_policy = EntryFlags::BUILTIN.union(EntryFlags::RESOLVED);
    if !override_supported {
        discovered_policy = discovered_policy.union(EntryFlags::READ_ONLY);
    }
    let mut discovered = Level::new(RANK_DISCOVERED, LevelOrigin::Discovered)
        .with_read_only(!override_supported)
        .with_flag_policy(discovered_policy, EntryFlags::NONE);
    let found = match ctx.discovery.entries(kind) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(kind = %kind, %error, "discovery query failed, treating as empty");
            Vec::new()
        }
    };
    for raw in found {
        discovered.add_entry(SettingEntry::new(kind, raw.name, raw.value, EntryFlags::NONE));
    }

    SettingsSet::new(vec![user, environment, discovered])
}

/// Parse one raw user option value into an entry.
fn user_entry_from_value(kind: EntryKind, raw: &str, ctx: &ToolContext<'_>) -> SettingEntry {
    if kind == EntryKind::Macro {
        let (name, value) = macro_name_value(raw);
        return SettingEntry::macro_def(name, strip_quotes(&value), EntryFlags::NONE);
    }
    let stripped = strip_quotes(raw);
    let (resolved, workspace) = option_path_value_to_entry(stripped, ctx.paths);
    let flags = if workspace {
        EntryFlags::WORKSPACE_PATH
    } else {
        EntryFlags::NONE
    };
    SettingEntry::new(kind, resolved, "", flags)
}

/// One tool's kind-indexed collection of entry storages.
///
/// Storages come into existence the first time their kind is queried; change
/// notifications only touch the kind they name, so an edit to a macro option
/// never disturbs the include-path cache.
#[derive(Debug, Default)]
pub struct EntryStorageMap {
    storages: HashMap<EntryKind, EntryStorage>,
}

impl EntryStorageMap {
    /// An empty map; no storages exist yet.
    pub fn new() -> EntryStorageMap {
        EntryStorageMap::default()
    }

    /// The storage for a kind, created on first use.
    pub fn storage(&mut self, kind: EntryKind) -> &mut EntryStorage {
        self.storages
            .entry(kind)
            .or_insert_with(|| EntryStorage::new(kind))
    }

    /// The storage for a kind, if one has been created.
    pub fn existing_storage(&self, kind: EntryKind) -> Option<&EntryStorage> {
        self.storages.get(&kind)
    }

    /// Resolved entries for a kind.
    pub fn entries(&mut self, ctx: &mut ToolContext<'_>, kind: EntryKind) -> Vec<SettingEntry> {
        self.storage(kind).entries(ctx)
    }

    /// Re-apply an edited entry list (or restore defaults) for a kind.
    pub fn set_entries(
        &mut self,
        ctx: &mut ToolContext<'_>,
        kind: EntryKind,
        entries: Option<&[SettingEntry]>,
    ) -> Result<(), OptionStoreError> {
        self.storage(kind).set_entries(ctx, entries)
    }

    /// Route a change notification to the affected kind only.
    ///
    /// A kind with no storage yet needs nothing: its first query builds a
    /// fresh cache anyway.
    pub fn options_changed(&mut self, kind: EntryKind) {
        if let Some(storage) = self.storages.get_mut(&kind) {
            storage.options_changed();
        }
    }

    /// Invalidate every existing storage, for configuration-wide events
    /// such as a toolchain change.
    pub fn invalidate_all(&mut self) {
        for storage in self.storages.values_mut() {
            storage.options_changed();
        }
    }

    /// Explain the resolution state of one kind.
    pub fn explain(&mut self, ctx: &mut ToolContext<'_>, kind: EntryKind) -> ExplainReport {
        self.storage(kind).explain(ctx)
    }

    /// Snapshot the resolved entries of one kind.
    pub fn snapshot(
        &mut self,
        ctx: &mut ToolContext<'_>,
        kind: EntryKind,
    ) -> Result<SettingsSnapshot, SnapshotError> {
        self.storage(kind).snapshot(ctx)
    }
}
