//! Mock option store.

use std::collections::{HashMap, HashSet};

use strata_model::{EntryKind, OptionStore, OptionStoreError, RawOption};

/// In-memory option store for one tool.
///
/// Each kind holds at most one user option and, when configured, one
/// undefine option. Writes land in the same maps reads come from, so a test
/// can assert exactly what the engine serialized back.
#[derive(Debug, Default)]
pub struct MockOptionStore {
    values: HashMap<EntryKind, Vec<String>>,
    undef_values: HashMap<EntryKind, Vec<String>>,
    kinds_with_undef: HashSet<EntryKind>,
    reject_writes: bool,
    write_count: u32,
}

impl MockOptionStore {
    /// An empty store: no values, no undefine options.
    pub fn new() -> MockOptionStore {
        MockOptionStore::default()
    }

    /// Set the user option values for a kind.
    pub fn set_values(&mut self, kind: EntryKind, values: Vec<String>) {
        self.values.insert(kind, values);
    }

    /// Declare that a kind has an undefine option (initially empty).
    pub fn add_undef_option(&mut self, kind: EntryKind) {
        self.kinds_with_undef.insert(kind);
    }

    /// Set the undefine option values for a kind, creating the option.
    pub fn set_undef(&mut self, kind: EntryKind, names: Vec<String>) {
        self.kinds_with_undef.insert(kind);
        self.undef_values.insert(kind, names);
    }

    /// Make every write fail with `OptionStoreError::Rejected`.
    pub fn reject_writes(&mut self) {
        self.reject_writes = true;
    }

    /// The current user option values for a kind.
    pub fn values(&self, kind: EntryKind) -> &[String] {
        self.values.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The current undefine option values for a kind.
    pub fn undef_values(&self, kind: EntryKind) -> &[String] {
        self.undef_values
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any option for a kind still exists.
    pub fn has_options(&self, kind: EntryKind) -> bool {
        self.values.contains_key(&kind) || self.undef_values.contains_key(&kind)
    }

    /// How many writes have landed, across all kinds.
    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    fn check_writable(&self, kind: EntryKind) -> Result<(), OptionStoreError> {
        if self.reject_writes {
            return Err(OptionStoreError::Rejected {
                kind,
                reason: "writes rejected by test configuration".to_string(),
            });
        }
        Ok(())
    }
}

impl OptionStore for MockOptionStore {
    fn options(&self, kind: EntryKind) -> Vec<RawOption> {
        match self.values.get(&kind) {
            Some(values) => vec![RawOption::new(
                format!("mock.option.{kind}"),
                values.clone(),
            )],
            None => Vec::new(),
        }
    }

    fn undef_option(&self, kind: EntryKind) -> Option<RawOption> {
        if !self.kinds_with_undef.contains(&kind) {
            return None;
        }
        let values = self.undef_values.get(&kind).cloned().unwrap_or_default();
        Some(RawOption::new(format!("mock.option.undef.{kind}"), values))
    }

    fn set_option_values(
        &mut self,
        kind: EntryKind,
        values: Vec<String>,
    ) -> Result<(), OptionStoreError> {
        self.check_writable(kind)?;
        self.write_count += 1;
        self.values.insert(kind, values);
        Ok(())
    }

    fn set_undef_values(
        &mut self,
        kind: EntryKind,
        names: Vec<String>,
    ) -> Result<(), OptionStoreError> {
        self.check_writable(kind)?;
        self.write_count += 1;
        self.kinds_with_undef.insert(kind);
        self.undef_values.insert(kind, names);
        Ok(())
    }

    fn remove_options(&mut self, kind: EntryKind) -> Result<(), OptionStoreError> {
        self.check_writable(kind)?;
        self.write_count += 1;
        self.values.remove(&kind);
        self.undef_values.remove(&kind);
        Ok(())
    }
}
