// whitelist.rs — Ordered attribute whitelists keyed by object kind.
//
// A mapping is an ordered list of (kind, allowed attribute names) entries.
// Order is load-bearing: the validator consults the FIRST entry whose kind a
// candidate object satisfies, and that entry alone decides the hop. A later
// entry for the same object is never reached, even if more permissive. This
// tie-break is part of the compatibility contract with configured policies.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use serde::Serialize;

use crate::kind::KindTag;

/// One (kind, allowed attribute names) pair in a whitelist mapping.
#[derive(Debug, Clone, Serialize)]
pub struct WhitelistEntry {
    /// The kind this entry applies to.
    pub kind: KindTag,
    /// Attribute names readable on objects of this kind.
    pub allowed: BTreeSet<String>,
}

/// An ordered collection of whitelist entries.
///
/// Immutable once handed to a validator; build a new mapping (and a new
/// validator) to change policy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WhitelistMapping {
    entries: Vec<WhitelistEntry>,
}

impl WhitelistMapping {
    /// Create an empty mapping.
    ///
    /// Note: handing an empty mapping to a validator selects the heuristic
    /// fallback, not "deny everything with a dot" — see the open-question
    /// record in DESIGN.md.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry allowing `names` on objects of `kind`.
    ///
    /// Builder-style; entries are consulted in insertion order.
    pub fn allow<I, S>(mut self, kind: KindTag, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push(WhitelistEntry {
            kind,
            allowed: names.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// The entries, in consultation order.
    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The built-in default mapping: curated safe attributes for the seven TA
/// model kinds. Identifiers, display names, timestamps, counts, and the
/// second-order object references that are themselves validated recursively.
///
/// Constructed once, never mutated. Callers wanting different policy build
/// their own mapping; there is no mutation API on purpose.
static DEFAULT_MAPPING: LazyLock<WhitelistMapping> = LazyLock::new(|| {
    WhitelistMapping::new()
        .allow(
            KindTag::GoalRun,
            ["id", "title", "state", "agent", "created_at", "updated_at"],
        )
        .allow(KindTag::Agent, ["id", "name", "model", "created_at"])
        .allow(
            KindTag::Changeset,
            ["id", "goal_run", "target_uri", "created_at"],
        )
        .allow(
            KindTag::Session,
            ["id", "title", "agent", "started_at", "message_count"],
        )
        .allow(KindTag::Channel, ["id", "name", "topic", "created_at"])
        .allow(KindTag::Message, ["id", "author", "channel", "created_at"])
        .allow(
            KindTag::User,
            ["id", "name", "display_name", "bot", "created_at"],
        )
});

/// The process-wide default whitelist mapping.
pub fn default_mapping() -> &'static WhitelistMapping {
    &DEFAULT_MAPPING
}
