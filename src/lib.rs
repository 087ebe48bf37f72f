//! Strata - layered build-settings resolution
//!
//! This crate implements the settings-resolution engine that reconciles
//! per-compilation-unit build configuration entries (include paths, include
//! files, macros, macro files, library paths, library files) coming from
//! three provenances with different mutability and precedence: user-edited
//! option values, environment/toolchain contributions, and entries
//! discovered by scanning a built tool.
//!
//! The resolved view is first-seen-wins across an ordered stack of levels,
//! refined by explicit undefines; edits round-trip back into raw option
//! values without disturbing the provenance of unchanged entries. The value
//! model and the collaborator contracts live in the `strata-model` crate.

pub mod convert;
pub mod explain;
pub mod level;
pub mod mock;
pub mod settings_set;
pub mod snapshot;
pub mod storage;

pub use explain::{EntryDisposition, ExplainReport, OverrideCause};
pub use level::{EntryRecord, Level, LevelOrigin};
pub use settings_set::{LevelMask, SettingsSet};
pub use snapshot::{SettingsSnapshot, SnapshotError};
pub use storage::{EntryStorage, EntryStorageMap};

pub use strata_model::{
    BuildPathKind, BuildPathProvider, DiscoveredEntry, DiscoveryError, DiscoveryProvider,
    EntryFlags, EntryIdentity, EntryKind, OptionStore, OptionStoreError, PathMapper, RawOption,
    SettingEntry, ToolContext, ALL_KINDS,
};
