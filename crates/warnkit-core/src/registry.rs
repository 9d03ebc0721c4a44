//! Warning registry: collects emitted warnings for later inspection.
//!
//! Warnings are stored by reference and uniqued by identity: adding the same
//! `Arc` twice is a no-op, while two distinct warnings with identical content
//! are both kept. Every read returns a snapshot that later additions do not
//! affect.

use crate::kind::WarningKind;
use crate::warning::Warning;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Selects a subset of registered warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningFilter {
    /// Warnings that are of the given kind. `Base` selects every warning.
    Kind(WarningKind),
    /// Warnings whose message contains the substring.
    Message(String),
}

impl WarningFilter {
    pub fn matches(&self, warning: &Warning) -> bool {
        match self {
            WarningFilter::Kind(kind) => warning.kind().is_a(*kind),
            WarningFilter::Message(needle) => warning.message().contains(needle.as_str()),
        }
    }
}

impl From<WarningKind> for WarningFilter {
    fn from(kind: WarningKind) -> Self {
        WarningFilter::Kind(kind)
    }
}

impl From<&str> for WarningFilter {
    fn from(needle: &str) -> Self {
        WarningFilter::Message(needle.to_string())
    }
}

impl From<String> for WarningFilter {
    fn from(needle: String) -> Self {
        WarningFilter::Message(needle)
    }
}

/// Warnings grouped by kind name.
pub type WarningGroups = BTreeMap<&'static str, Vec<Arc<Warning>>>;

#[derive(Debug, Default)]
struct Entries {
    warnings: Vec<Arc<Warning>>,
    /// Addresses of the registered `Arc`s, kept in step with `warnings`.
    seen: BTreeSet<usize>,
}

impl Entries {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
            seen: BTreeSet::new(),
        }
    }
}

/// An insertion-ordered, identity-uniqued collection of warnings.
#[derive(Debug, Default)]
pub struct WarningRegistry {
    entries: Mutex<Entries>,
}

static GLOBAL: WarningRegistry = WarningRegistry {
    entries: parking_lot::const_mutex(Entries::new()),
};

/// The process-wide registry behind [`warn`], [`get_warnings`] and
/// [`group_warnings`].
pub fn global() -> &'static WarningRegistry {
    &GLOBAL
}

impl WarningRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `warning` unless this exact instance is already present.
    ///
    /// Passing an owned [`Warning`] always registers a new instance; pass a
    /// clone of an `Arc` to keep identity across holders.
    pub fn add(&self, warning: impl Into<Arc<Warning>>) {
        let warning = warning.into();
        let mut entries = self.entries.lock();

        // Stored `Arc`s keep their allocation alive, so an address cannot be
        // reused while it is in the set.
        if !entries.seen.insert(Arc::as_ptr(&warning) as usize) {
            tracing::trace!(name = warning.name(), "warning already registered");
            return;
        }

        tracing::debug!(warning = %warning, "registering warning");
        entries.warnings.push(warning);
    }

    /// Snapshot of the registered warnings, optionally filtered.
    pub fn get_all(&self, filter: Option<&WarningFilter>) -> Vec<Arc<Warning>> {
        self.entries
            .lock()
            .warnings
            .iter()
            .filter(|w| filter.map_or(true, |f| f.matches(w)))
            .cloned()
            .collect()
    }

    /// Snapshot of the registered warnings grouped by kind name. Kinds with no
    /// warnings have no entry.
    pub fn group_by_kind(&self) -> WarningGroups {
        let mut groups = WarningGroups::new();
        for warning in self.entries.lock().warnings.iter() {
            groups
                .entry(warning.name())
                .or_default()
                .push(Arc::clone(warning));
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.entries.lock().warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().warnings.is_empty()
    }

    /// Drop every registered warning.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.warnings.clear();
        entries.seen.clear();
    }
}

/// Register a warning with the process-wide registry.
pub fn warn(warning: impl Into<Arc<Warning>>) {
    GLOBAL.add(warning);
}

/// Snapshot of the process-wide registry, optionally filtered.
pub fn get_warnings(filter: Option<&WarningFilter>) -> Vec<Arc<Warning>> {
    GLOBAL.get_all(filter)
}

/// The process-wide registry grouped by kind name.
pub fn group_warnings() -> WarningGroups {
    GLOBAL.group_by_kind()
}
