//! Raw option value ↔ structured entry conversion.
//!
//! Pure helpers shared by the cache-build and write-back paths of
//! `EntryStorage`. None of these fail: malformed values degrade to the
//! closest sensible entry rather than rejecting input.

use strata_model::{EntryKind, PathMapper, SettingEntry};

/// Split a raw macro definition at the first `=`.
///
/// A value with no `=` is a name-only definition; the value comes back
/// empty, never an error.
pub fn macro_name_value(raw: &str) -> (String, String) {
    match raw.split_once('=') {
        Some((name, value)) => (name.to_string(), value.to_string()),
        None => (raw.to_string(), String::new()),
    }
}

/// Strip one pair of surrounding double quotes.
///
/// Only applies when the value both starts and ends with `"`; a lone `"`
/// character is its own start and end and stays verbatim.
pub fn strip_quotes(raw: &str) -> &str {
    if raw.len() != 1 && raw.starts_with('"') && raw.ends_with('"') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// Serialize one entry back into a raw option value.
///
/// Macro entries with a value render as `name=value`; workspace paths are
/// rendered through the path mapper's location form; everything else is the
/// name verbatim.
pub fn entry_to_option_value(entry: &SettingEntry, paths: &dyn PathMapper) -> String {
    if entry.kind() == EntryKind::Macro && !entry.value().is_empty() {
        format!("{}={}", entry.name(), entry.value())
    } else if entry.kind().is_path() && entry.flags().workspace_path {
        paths.full_path_to_location(entry.name())
    } else {
        entry.name().to_string()
    }
}

/// Resolve a raw path-kind option value through the workspace mapper.
///
/// Returns the mapped full path and `true` when the value references a
/// workspace location; otherwise the original value and `false`.
pub fn option_path_value_to_entry(value: &str, paths: &dyn PathMapper) -> (String, bool) {
    match paths.location_to_full_path(value) {
        Some(full) => (full, true),
        None => (value.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_model::EntryFlags;

    struct PrefixMapper;

    impl PathMapper for PrefixMapper {
        fn full_path_to_location(&self, path: &str) -> String {
            match path.strip_prefix("/ws") {
                Some(rest) => format!("${{workspace}}{rest}"),
                None => path.to_string(),
            }
        }

        fn location_to_full_path(&self, value: &str) -> Option<String> {
            value
                .strip_prefix("${workspace}")
                .map(|rest| format!("/ws{rest}"))
        }
    }

    #[test]
    fn test_macro_name_value_splits_at_first_equals() {
        assert_eq!(
            macro_name_value("FOO=BAR"),
            ("FOO".to_string(), "BAR".to_string())
        );
        assert_eq!(
            macro_name_value("FOO=a=b"),
            ("FOO".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_macro_name_value_without_equals() {
        assert_eq!(macro_name_value("FOO"), ("FOO".to_string(), String::new()));
    }

    #[test]
    fn test_macro_name_value_empty_value() {
        assert_eq!(macro_name_value("FOO="), ("FOO".to_string(), String::new()));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"abc\""), "abc");
        assert_eq!(strip_quotes("abc"), "abc");
        assert_eq!(strip_quotes("\"abc"), "\"abc");
        assert_eq!(strip_quotes("\"\""), "");
    }

    #[test]
    fn test_strip_quotes_lone_quote_preserved() {
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn test_entry_to_option_value_macro() {
        let defined = SettingEntry::macro_def("FOO", "BAR", EntryFlags::NONE);
        assert_eq!(entry_to_option_value(&defined, &PrefixMapper), "FOO=BAR");

        let bare = SettingEntry::macro_def("FOO", "", EntryFlags::NONE);
        assert_eq!(entry_to_option_value(&bare, &PrefixMapper), "FOO");
    }

    #[test]
    fn test_entry_to_option_value_workspace_path() {
        let entry = SettingEntry::include_path("/ws/proj/include", EntryFlags::WORKSPACE_PATH);
        assert_eq!(
            entry_to_option_value(&entry, &PrefixMapper),
            "${workspace}/proj/include"
        );
    }

    #[test]
    fn test_entry_to_option_value_native_path() {
        let entry = SettingEntry::include_path("/usr/include", EntryFlags::NONE);
        assert_eq!(entry_to_option_value(&entry, &PrefixMapper), "/usr/include");
    }

    #[test]
    fn test_option_path_value_round_trip() {
        let (mapped, workspace) = option_path_value_to_entry("${workspace}/proj/include", &PrefixMapper);
        assert_eq!(mapped, "/ws/proj/include");
        assert!(workspace);

        let (verbatim, workspace) = option_path_value_to_entry("/usr/include", &PrefixMapper);
        assert_eq!(verbatim, "/usr/include");
        assert!(!workspace);
    }
}
