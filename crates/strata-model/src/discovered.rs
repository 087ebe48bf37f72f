//! Raw discovered entries.

use serde::{Deserialize, Serialize};

/// A raw name/value pair reported by an external scanner or provider.
///
/// Not yet flag-tagged or normalized; `EntryStorage` converts these into
/// flagged entries when it populates the discovered level. For path kinds
/// the value is unused and conventionally empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredEntry {
    /// Entry name (path for path kinds, macro name for macros).
    pub name: String,
    /// Macro value, if any.
    #[serde(default)]
    pub value: String,
}

impl DiscoveredEntry {
    /// A discovered entry with a name only.
    pub fn named(name: impl Into<String>) -> DiscoveredEntry {
        DiscoveredEntry {
            name: name.into(),
            value: String::new(),
        }
    }

    /// A discovered name/value pair.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> DiscoveredEntry {
        DiscoveredEntry {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_defaults_when_absent() {
        let entry: DiscoveredEntry = serde_json::from_str(r#"{"name": "/usr/include"}"#).unwrap();
        assert_eq!(entry.name, "/usr/include");
        assert_eq!(entry.value, "");
    }
}
