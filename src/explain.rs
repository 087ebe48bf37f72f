//! Resolution explain output.
//!
//! A structured, serializable account of one kind's settings stack for
//! diagnostic purposes: every record with its provenance, its visibility,
//! and, for hidden records, the reason it lost. The override cause is
//! recomputed from the stack state here, not threaded through resolution.

use serde::{Deserialize, Serialize};

use strata_model::{EntryFlags, EntryIdentity, EntryKind};

use crate::level::LevelOrigin;
use crate::settings_set::SettingsSet;
use crate::storage::RANK_USER;

/// Why an overridden record is hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "cause", content = "origin")]
pub enum OverrideCause {
    /// A higher-precedence entry with the same identity wins.
    ShadowedBy(LevelOrigin),
    /// A higher-precedence undef set names this entry, with no replacement.
    UndefinedBy(LevelOrigin),
}

/// One record of the stack, with its resolution outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDisposition {
    /// Which level holds the record.
    pub origin: LevelOrigin,

    /// Entry name.
    pub name: String,

    /// Macro value, if any.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,

    /// Entry flags after the level's flag policy.
    pub flags: EntryFlags,

    /// Whether the record survives resolution.
    pub visible: bool,

    /// Why the record is hidden (absent for visible records).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_cause: Option<OverrideCause>,
}

/// Explanation of one kind's resolution state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainReport {
    /// The kind being explained.
    pub kind: EntryKind,

    /// Names the user level explicitly undefines.
    pub undefined_names: Vec<String>,

    /// Every record in the stack, rank order then insertion order.
    pub dispositions: Vec<EntryDisposition>,
}

impl ExplainReport {
    /// Build a report from the stack's current state.
    pub fn from_set(kind: EntryKind, set: &mut SettingsSet) -> ExplainReport {
        set.adjust_override_state();

        let undefined_names: Vec<String> = set
            .level(RANK_USER)
            .undef_names()
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default();

        let mut winner_origin: std::collections::HashMap<EntryIdentity, LevelOrigin> =
            std::collections::HashMap::new();
        let mut dispositions = Vec::new();

        for level in set.levels() {
            for record in level.records() {
                let entry = record.entry();
                let id = entry.identity();
                let cause = if record.is_overridden() {
                    Some(Self::cause_for(set, level.rank(), entry.name(), &winner_origin, &id))
                } else {
                    None
                };
                winner_origin.entry(id).or_insert(level.origin());
                dispositions.push(EntryDisposition {
                    origin: level.origin(),
                    name: entry.name().to_string(),
                    value: entry.value().to_string(),
                    flags: entry.flags(),
                    visible: !record.is_overridden(),
                    override_cause: cause,
                });
            }
        }

        ExplainReport {
            kind,
            undefined_names,
            dispositions,
        }
    }

    /// The reason a record at `rank` is hidden: an undef in a strictly
    /// higher level wins as the cause, otherwise the first-seen holder of
    /// the identity shadows it.
    fn cause_for(
        set: &SettingsSet,
        rank: usize,
        name: &str,
        winner_origin: &std::collections::HashMap<EntryIdentity, LevelOrigin>,
        id: &EntryIdentity,
    ) -> OverrideCause {
        for upper in set.levels().iter().take(rank) {
            if let Some(undef) = upper.undef_names() {
                if undef.contains(name) {
                    return OverrideCause::UndefinedBy(upper.origin());
                }
            }
        }
        let origin = winner_origin
            .get(id)
            .copied()
            .unwrap_or(LevelOrigin::User);
        OverrideCause::ShadowedBy(origin)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render a human-readable explanation.
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Kind: {}", self.kind));
        if !self.undefined_names.is_empty() {
            lines.push(format!("Undefined names: {}", self.undefined_names.join(", ")));
        }
        lines.push(String::new());

        if self.dispositions.is_empty() {
            lines.push("No entries.".to_string());
        }
        for d in &self.dispositions {
            let rendered = if d.value.is_empty() {
                d.name.clone()
            } else {
                format!("{}={}", d.name, d.value)
            };
            let outcome = match &d.override_cause {
                None => "visible".to_string(),
                Some(OverrideCause::ShadowedBy(origin)) => {
                    format!("shadowed by {origin} level")
                }
                Some(OverrideCause::UndefinedBy(origin)) => {
                    format!("undefined by {origin} level")
                }
            };
            lines.push(format!("[{}] {} - {}", d.origin, rendered, outcome));
        }
        lines.join("\n")
    }
}
