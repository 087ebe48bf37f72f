//! Collaborator contracts consumed by the resolution engine.
//!
//! The engine itself performs no I/O; everything it needs from the host
//! application arrives through these traits. All of them are synchronous,
//! expected-fast lookups. Instances are scoped to one tool/configuration
//! context, so the methods are kind-addressed only.

use serde::{Deserialize, Serialize};

use crate::{BuildPathKind, DiscoveredEntry, DiscoveryError, EntryKind, OptionStoreError};

/// One raw option backing a kind: an identifier plus its ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOption {
    /// Host-side option identifier.
    pub id: String,
    /// Raw string values, in option order.
    pub values: Vec<String>,
}

impl RawOption {
    /// Build a raw option from an id and values.
    pub fn new(id: impl Into<String>, values: Vec<String>) -> RawOption {
        RawOption {
            id: id.into(),
            values,
        }
    }
}

/// The raw option store of one tool.
///
/// Reads are infallible; writes go back to the host's persistence layer and
/// may be rejected. Hosts must call `EntryStorage::options_changed` whenever
/// a write (from the engine or from anywhere else) lands, so the per-kind
/// cache can rebuild lazily.
pub trait OptionStore {
    /// All options holding user values for this kind, in tool order.
    fn options(&self, kind: EntryKind) -> Vec<RawOption>;

    /// The paired "undefine" option for this kind, if the tool has one.
    ///
    /// Returning `None` means the kind supports no explicit negation, which
    /// locks the discovered level read-only.
    fn undef_option(&self, kind: EntryKind) -> Option<RawOption>;

    /// Replace the user option values for this kind.
    fn set_option_values(
        &mut self,
        kind: EntryKind,
        values: Vec<String>,
    ) -> Result<(), OptionStoreError>;

    /// Replace the undefine option values for this kind.
    ///
    /// Only called for kinds whose `undef_option` exists.
    fn set_undef_values(
        &mut self,
        kind: EntryKind,
        names: Vec<String>,
    ) -> Result<(), OptionStoreError>;

    /// Remove the user and undefine options for this kind entirely,
    /// restoring the tool's defaults.
    fn remove_options(&mut self, kind: EntryKind) -> Result<(), OptionStoreError>;
}

/// Source of scanner-discovered entries for one tool.
pub trait DiscoveryProvider {
    /// Discovered entries for the kind.
    ///
    /// An `Err` is swallowed at the engine boundary (logged, treated as an
    /// empty result); "no data" is `Ok(vec![])`, not an error.
    fn entries(&self, kind: EntryKind) -> Result<Vec<DiscoveredEntry>, DiscoveryError>;
}

/// Source of environment/toolchain-contributed build paths.
///
/// Queried only for the include-path and library-path kinds.
pub trait BuildPathProvider {
    /// Toolchain build paths of the given category, in precedence order.
    fn build_paths(&self, kind: BuildPathKind) -> Vec<String>;
}

/// Workspace path mapping.
///
/// Translates between raw option values (which may reference workspace
/// locations) and full workspace paths. Values that do not map stay verbatim.
pub trait PathMapper {
    /// Render a full workspace path as the location string stored in raw
    /// option values.
    fn full_path_to_location(&self, path: &str) -> String;

    /// Resolve a raw option value to a full workspace path, if it references
    /// one.
    fn location_to_full_path(&self, value: &str) -> Option<String>;
}

/// Borrowed bundle of the four collaborators for one tool.
///
/// The engine takes this by `&mut` so the read path and the write path share
/// one shape; only `OptionStore` is ever written through.
pub struct ToolContext<'a> {
    /// Raw option store (read on cache build, written on `set_entries`).
    pub options: &'a mut dyn OptionStore,
    /// Discovered-entry provider.
    pub discovery: &'a dyn DiscoveryProvider,
    /// Environment build-path provider.
    pub build_paths: &'a dyn BuildPathProvider,
    /// Workspace path mapper.
    pub paths: &'a dyn PathMapper,
}

impl<'a> ToolContext<'a> {
    /// Assemble a context from its collaborators.
    pub fn new(
        options: &'a mut dyn OptionStore,
        discovery: &'a dyn DiscoveryProvider,
        build_paths: &'a dyn BuildPathProvider,
        paths: &'a dyn PathMapper,
    ) -> ToolContext<'a> {
        ToolContext {
            options,
            discovery,
            build_paths,
            paths,
        }
    }
}
