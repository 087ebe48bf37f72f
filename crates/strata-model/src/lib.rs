//! Strata settings model
//!
//! The shared value model for layered build-settings resolution: entry
//! kinds, flags, the entry value type, identity keys, and the collaborator
//! contracts through which the resolution engine talks to its host. Option
//! stores, scanners, and path mappers implement the traits defined here
//! without depending on the engine crate.

mod discovered;
mod entry;
mod error;
mod flags;
mod identity;
mod kind;
mod traits;

pub use discovered::DiscoveredEntry;
pub use entry::SettingEntry;
pub use error::{DiscoveryError, OptionStoreError};
pub use flags::EntryFlags;
pub use identity::EntryIdentity;
pub use kind::{BuildPathKind, EntryKind, ALL_KINDS};
pub use traits::{BuildPathProvider, DiscoveryProvider, OptionStore, PathMapper, RawOption, ToolContext};
