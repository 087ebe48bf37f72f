//! Setting entry kinds.
//!
//! Every entry belongs to exactly one kind, and resolution is performed
//! independently per kind; no cross-kind interaction exists anywhere in the
//! engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of setting entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Compiler include search path (`-I`).
    IncludePath,
    /// File force-included into every translation unit (`-include`).
    IncludeFile,
    /// Preprocessor macro definition (`-D`).
    Macro,
    /// File of macro definitions (`-imacros`).
    MacroFile,
    /// Linker library search path (`-L`).
    LibraryPath,
    /// Linker library file (`-l` / explicit object).
    LibraryFile,
}

/// All entry kinds, in canonical order.
pub const ALL_KINDS: &[EntryKind] = &[
    EntryKind::IncludePath,
    EntryKind::IncludeFile,
    EntryKind::Macro,
    EntryKind::MacroFile,
    EntryKind::LibraryPath,
    EntryKind::LibraryFile,
];

impl EntryKind {
    /// Whether entries of this kind carry a separate value.
    ///
    /// Only macro entries do; for every other kind the name is the whole
    /// content and the value stays empty.
    pub fn has_value(&self) -> bool {
        matches!(self, EntryKind::Macro)
    }

    /// Whether the entry name is a filesystem path.
    ///
    /// True for every kind except `Macro`; these are the kinds that can be
    /// expressed as workspace-relative paths.
    pub fn is_path(&self) -> bool {
        !self.has_value()
    }

    /// The environment build-path category contributed to this kind, if any.
    ///
    /// Only include and library *search paths* have an environment level;
    /// the file-valued and macro kinds never do.
    pub fn build_path_kind(&self) -> Option<BuildPathKind> {
        match self {
            EntryKind::IncludePath => Some(BuildPathKind::Include),
            EntryKind::LibraryPath => Some(BuildPathKind::Library),
            _ => None,
        }
    }

    /// Stable identifier used in serialized forms and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::IncludePath => "include_path",
            EntryKind::IncludeFile => "include_file",
            EntryKind::Macro => "macro",
            EntryKind::MacroFile => "macro_file",
            EntryKind::LibraryPath => "library_path",
            EntryKind::LibraryFile => "library_file",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path categories served by the environment build-path provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPathKind {
    /// Toolchain-contributed include directories.
    Include,
    /// Toolchain-contributed library directories.
    Library,
}
