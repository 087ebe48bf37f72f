//! Round-Trip Edit Tests
//!
//! The write path: re-applying the resolved view must be a no-op, edits
//! must land at the user level without disturbing the provenance of
//! unchanged entries, and discovered-entry deletion must round-trip
//! through the undefine option.

use strata_settings::mock::MockCollaborators;
use strata_settings::{DiscoveredEntry, EntryFlags, EntryKind, EntryStorage, SettingEntry};

fn populated_mocks() -> MockCollaborators {
    MockCollaborators::new()
        .with_option_values(EntryKind::Macro, vec!["MINE=1"])
        .with_undef_option(EntryKind::Macro)
        .with_discovered(
            EntryKind::Macro,
            vec![
                DiscoveredEntry::with_value("FOUND_A", "a"),
                DiscoveredEntry::with_value("FOUND_B", "b"),
            ],
        )
}

// =============================================================================
// Stability
// =============================================================================

#[test]
fn test_reapplying_resolved_view_is_stable() {
    let mut mocks = populated_mocks();
    let mut storage = EntryStorage::new(EntryKind::Macro);

    let before = storage.entries(&mut mocks.context());
    storage
        .set_entries(&mut mocks.context(), Some(&before))
        .unwrap();
    let after = storage.entries(&mut mocks.context());

    assert_eq!(before, after);
    // Nothing leaked into the user option.
    assert_eq!(mocks.store.values(EntryKind::Macro), ["MINE=1"]);
    assert!(mocks.store.undef_values(EntryKind::Macro).is_empty());
}

#[test]
fn test_reapplying_is_stable_without_undef_support() {
    let mut mocks = MockCollaborators::new()
        .with_option_values(EntryKind::IncludePath, vec!["/mine"])
        .with_discovered(
            EntryKind::IncludePath,
            vec![DiscoveredEntry::named("/usr/include")],
        );
    let mut storage = EntryStorage::new(EntryKind::IncludePath);

    let before = storage.entries(&mut mocks.context());
    storage
        .set_entries(&mut mocks.context(), Some(&before))
        .unwrap();

    assert_eq!(storage.entries(&mut mocks.context()), before);
    assert_eq!(mocks.store.values(EntryKind::IncludePath), ["/mine"]);
}

// =============================================================================
// Placement of edits
// =============================================================================

#[test]
fn test_new_entry_lands_in_user_option() {
    let mut mocks = populated_mocks();
    let mut storage = EntryStorage::new(EntryKind::Macro);

    let mut desired = storage.entries(&mut mocks.context());
    desired.push(SettingEntry::macro_def("ADDED", "yes", EntryFlags::NONE));
    storage
        .set_entries(&mut mocks.context(), Some(&desired))
        .unwrap();

    assert_eq!(
        mocks.store.values(EntryKind::Macro),
        ["MINE=1", "ADDED=yes"]
    );
    let resolved = storage.entries(&mut mocks.context());
    assert!(resolved.iter().any(|e| e.name() == "ADDED"));
}

#[test]
fn test_editing_discovered_macro_becomes_user_override() {
    let mut mocks = populated_mocks();
    let mut storage = EntryStorage::new(EntryKind::Macro);

    let desired: Vec<SettingEntry> = storage
        .entries(&mut mocks.context())
        .into_iter()
        .map(|e| {
            if e.name() == "FOUND_A" {
                SettingEntry::macro_def("FOUND_A", "edited", EntryFlags::NONE)
            } else {
                e
            }
        })
        .collect();
    storage
        .set_entries(&mut mocks.context(), Some(&desired))
        .unwrap();

    // The redefinition is serialized into the user option.
    assert_eq!(
        mocks.store.values(EntryKind::Macro),
        ["MINE=1", "FOUND_A=edited"]
    );
    let resolved = storage.entries(&mut mocks.context());
    let found_a: Vec<&SettingEntry> =
        resolved.iter().filter(|e| e.name() == "FOUND_A").collect();
    assert_eq!(found_a.len(), 1);
    assert_eq!(found_a[0].value(), "edited");
    assert!(!found_a[0].flags().builtin);
}

#[test]
fn test_removing_user_entry_keeps_discovered_provenance() {
    let mut mocks = populated_mocks();
    let mut storage = EntryStorage::new(EntryKind::Macro);

    let desired: Vec<SettingEntry> = storage
        .entries(&mut mocks.context())
        .into_iter()
        .filter(|e| e.name() != "MINE")
        .collect();
    storage
        .set_entries(&mut mocks.context(), Some(&desired))
        .unwrap();

    assert!(mocks.store.values(EntryKind::Macro).is_empty());
    let resolved = storage.entries(&mut mocks.context());
    // Surviving discovered entries kept their builtin flag: they were not
    // rewritten as user entries.
    assert!(resolved.iter().all(|e| e.flags().builtin));
    assert_eq!(resolved.len(), 2);
}

// =============================================================================
// Undefine round-trip
// =============================================================================

#[test]
fn test_deleting_discovered_entry_writes_undef_option() {
    let mut mocks = populated_mocks();
    let mut storage = EntryStorage::new(EntryKind::Macro);

    let desired: Vec<SettingEntry> = storage
        .entries(&mut mocks.context())
        .into_iter()
        .filter(|e| e.name() != "FOUND_B")
        .collect();
    storage
        .set_entries(&mut mocks.context(), Some(&desired))
        .unwrap();

    assert_eq!(mocks.store.undef_values(EntryKind::Macro), ["FOUND_B"]);

    // A fresh storage built from the written options agrees.
    let mut rebuilt = EntryStorage::new(EntryKind::Macro);
    let resolved = rebuilt.entries(&mut mocks.context());
    assert!(resolved.iter().all(|e| e.name() != "FOUND_B"));
    assert!(resolved.iter().any(|e| e.name() == "FOUND_A"));
}

#[test]
fn test_reintroducing_deleted_entry_clears_undef() {
    let mut mocks = populated_mocks().with_undef_values(EntryKind::Macro, vec!["FOUND_B"]);
    let mut storage = EntryStorage::new(EntryKind::Macro);

    let mut desired = storage.entries(&mut mocks.context());
    assert!(desired.iter().all(|e| e.name() != "FOUND_B"));
    desired.push(SettingEntry::macro_def("FOUND_B", "b", EntryFlags::NONE));
    storage
        .set_entries(&mut mocks.context(), Some(&desired))
        .unwrap();

    assert!(mocks.store.undef_values(EntryKind::Macro).is_empty());
    let resolved = storage.entries(&mut mocks.context());
    assert!(resolved.iter().any(|e| e.name() == "FOUND_B"));
}

// =============================================================================
// Workspace path serialization
// =============================================================================

#[test]
fn test_workspace_paths_serialize_as_locations() {
    let mut mocks = MockCollaborators::new()
        .with_workspace_root("/home/dev/ws")
        .with_option_values(EntryKind::IncludePath, vec!["${workspace}/proj/include"]);
    let mut storage = EntryStorage::new(EntryKind::IncludePath);

    let mut desired = storage.entries(&mut mocks.context());
    assert_eq!(desired[0].name(), "/home/dev/ws/proj/include");
    desired.push(SettingEntry::include_path("/usr/include", EntryFlags::NONE));
    storage
        .set_entries(&mut mocks.context(), Some(&desired))
        .unwrap();

    // The workspace entry goes back in location form, the native one verbatim.
    assert_eq!(
        mocks.store.values(EntryKind::IncludePath),
        ["${workspace}/proj/include", "/usr/include"]
    );
}
