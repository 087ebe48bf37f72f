//! Mock discovery, build-path, and path-mapping collaborators, plus the
//! bundle that assembles them into a [`ToolContext`].

use std::cell::RefCell;
use std::collections::HashMap;

use strata_model::{
    BuildPathKind, BuildPathProvider, DiscoveredEntry, DiscoveryError, DiscoveryProvider,
    EntryKind, PathMapper, ToolContext,
};

use super::MockOptionStore;

/// How an injected discovery failure behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Every query fails.
    Always,
    /// The first `n` queries fail, then queries succeed.
    Times(u32),
}

/// In-memory discovered-entry provider with failure injection.
///
/// The trait takes `&self`, so the per-kind call counter lives in a
/// `RefCell`; the engine is single-threaded per context by contract.
#[derive(Debug, Default)]
pub struct MockDiscoveryProvider {
    entries: HashMap<EntryKind, Vec<DiscoveredEntry>>,
    failure: Option<FailureMode>,
    call_counts: RefCell<HashMap<EntryKind, u32>>,
}

impl MockDiscoveryProvider {
    /// A provider with no entries and no failures.
    pub fn new() -> MockDiscoveryProvider {
        MockDiscoveryProvider::default()
    }

    /// Set the discovered entries for a kind.
    pub fn set_entries(&mut self, kind: EntryKind, entries: Vec<DiscoveredEntry>) {
        self.entries.insert(kind, entries);
    }

    /// Inject a failure mode covering every kind.
    pub fn inject_failure(&mut self, mode: FailureMode) {
        self.failure = Some(mode);
    }

    /// Clear any injected failure.
    pub fn clear_failure(&mut self) {
        self.failure = None;
    }

    /// How many times the given kind has been queried.
    pub fn calls(&self, kind: EntryKind) -> u32 {
        self.call_counts.borrow().get(&kind).copied().unwrap_or(0)
    }
}

impl DiscoveryProvider for MockDiscoveryProvider {
    fn entries(&self, kind: EntryKind) -> Result<Vec<DiscoveredEntry>, DiscoveryError> {
        let mut counts = self.call_counts.borrow_mut();
        let count = counts.entry(kind).or_insert(0);
        *count += 1;
        let failing = match self.failure {
            Some(FailureMode::Always) => true,
            Some(FailureMode::Times(n)) => *count <= n,
            None => false,
        };
        if failing {
            return Err(DiscoveryError::QueryFailed(format!(
                "injected failure for {kind}"
            )));
        }
        Ok(self.entries.get(&kind).cloned().unwrap_or_default())
    }
}

/// Fixed toolchain build paths.
#[derive(Debug, Default)]
pub struct MockBuildPathProvider {
    include: Vec<String>,
    library: Vec<String>,
}

impl MockBuildPathProvider {
    /// A provider with no paths.
    pub fn new() -> MockBuildPathProvider {
        MockBuildPathProvider::default()
    }

    /// Set the paths for one category.
    pub fn set_paths(&mut self, kind: BuildPathKind, paths: Vec<String>) {
        match kind {
            BuildPathKind::Include => self.include = paths,
            BuildPathKind::Library => self.library = paths,
        }
    }
}

impl BuildPathProvider for MockBuildPathProvider {
    fn build_paths(&self, kind: BuildPathKind) -> Vec<String> {
        match kind {
            BuildPathKind::Include => self.include.clone(),
            BuildPathKind::Library => self.library.clone(),
        }
    }
}

/// Prefix-based workspace path mapper.
///
/// Locations take the form `${workspace}/rest`; full paths are the
/// workspace root joined with `rest`. Values outside the root stay verbatim.
#[derive(Debug, Clone)]
pub struct MockPathMapper {
    workspace_root: String,
}

impl MockPathMapper {
    /// A mapper rooted at the given workspace directory.
    pub fn new(workspace_root: impl Into<String>) -> MockPathMapper {
        MockPathMapper {
            workspace_root: workspace_root.into(),
        }
    }
}

impl Default for MockPathMapper {
    fn default() -> MockPathMapper {
        MockPathMapper::new("/workspace")
    }
}

impl PathMapper for MockPathMapper {
    fn full_path_to_location(&self, path: &str) -> String {
        match path.strip_prefix(&self.workspace_root) {
            Some(rest) => format!("${{workspace}}{rest}"),
            None => path.to_string(),
        }
    }

    fn location_to_full_path(&self, value: &str) -> Option<String> {
        value
            .strip_prefix("${workspace}")
            .map(|rest| format!("{}{rest}", self.workspace_root))
    }
}

/// All four mock collaborators for one tool, with builder configuration.
#[derive(Debug, Default)]
pub struct MockCollaborators {
    /// Raw option store.
    pub store: MockOptionStore,
    /// Discovered-entry provider.
    pub discovery: MockDiscoveryProvider,
    /// Environment build-path provider.
    pub build_paths: MockBuildPathProvider,
    /// Workspace path mapper.
    pub paths: MockPathMapper,
}

impl MockCollaborators {
    /// An empty bundle: no options, no discoveries, no build paths,
    /// workspace rooted at `/workspace`.
    pub fn new() -> MockCollaborators {
        MockCollaborators::default()
    }

    /// Set the user option values for a kind.
    pub fn with_option_values<S: Into<String>>(
        mut self,
        kind: EntryKind,
        values: Vec<S>,
    ) -> MockCollaborators {
        self.store
            .set_values(kind, values.into_iter().map(Into::into).collect());
        self
    }

    /// Declare an undefine option for a kind.
    pub fn with_undef_option(mut self, kind: EntryKind) -> MockCollaborators {
        self.store.add_undef_option(kind);
        self
    }

    /// Set the undefine option values for a kind.
    pub fn with_undef_values<S: Into<String>>(
        mut self,
        kind: EntryKind,
        names: Vec<S>,
    ) -> MockCollaborators {
        self.store
            .set_undef(kind, names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the discovered entries for a kind.
    pub fn with_discovered(
        mut self,
        kind: EntryKind,
        entries: Vec<DiscoveredEntry>,
    ) -> MockCollaborators {
        self.discovery.set_entries(kind, entries);
        self
    }

    /// Inject a discovery failure mode.
    pub fn with_discovery_failure(mut self, mode: FailureMode) -> MockCollaborators {
        self.discovery.inject_failure(mode);
        self
    }

    /// Set the environment build paths for one category.
    pub fn with_build_paths<S: Into<String>>(
        mut self,
        kind: BuildPathKind,
        paths: Vec<S>,
    ) -> MockCollaborators {
        self.build_paths
            .set_paths(kind, paths.into_iter().map(Into::into).collect());
        self
    }

    /// Root the workspace path mapper at the given directory.
    pub fn with_workspace_root(mut self, root: impl Into<String>) -> MockCollaborators {
        self.paths = MockPathMapper::new(root);
        self
    }

    /// Borrow a tool context over the bundle.
    pub fn context(&mut self) -> ToolContext<'_> {
        ToolContext::new(
            &mut self.store,
            &self.discovery,
            &self.build_paths,
            &self.paths,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_times_then_succeeds() {
        let mut provider = MockDiscoveryProvider::new();
        provider.set_entries(EntryKind::Macro, vec![DiscoveredEntry::with_value("A", "1")]);
        provider.inject_failure(FailureMode::Times(2));

        assert!(provider.entries(EntryKind::Macro).is_err());
        assert!(provider.entries(EntryKind::Macro).is_err());
        let entries = provider.entries(EntryKind::Macro).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(provider.calls(EntryKind::Macro), 3);
    }

    #[test]
    fn test_failure_always() {
        let mut provider = MockDiscoveryProvider::new();
        provider.inject_failure(FailureMode::Always);
        for _ in 0..3 {
            assert!(provider.entries(EntryKind::IncludePath).is_err());
        }
    }

    #[test]
    fn test_path_mapper_round_trip() {
        let mapper = MockPathMapper::new("/home/dev/ws");
        let location = mapper.full_path_to_location("/home/dev/ws/proj/include");
        assert_eq!(location, "${workspace}/proj/include");
        assert_eq!(
            mapper.location_to_full_path(&location).as_deref(),
            Some("/home/dev/ws/proj/include")
        );
        assert_eq!(mapper.location_to_full_path("/usr/include"), None);
    }

    #[test]
    fn test_foreign_path_stays_verbatim() {
        let mapper = MockPathMapper::default();
        assert_eq!(mapper.full_path_to_location("/usr/include"), "/usr/include");
    }
}
