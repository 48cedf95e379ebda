//! Loaded snapshot plus the user's facet selection.
//!
//! A snapshot is never mutated once built. Reloading swaps in a new one
//! (last load wins) and then prunes selections the new data cannot satisfy.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::constants::DEFAULT_PERIOD_MARKER;
use crate::error::CalendarioError;
use crate::event::Event;
use crate::filter::{Facet, FacetSelection, apply_facets, facet_values};
use crate::load::{LoadOptions, Source, load};
use crate::parse::{ParseOutcome, ParseStats};

/// Immutable event collection from one load.
#[derive(Debug, Clone)]
pub struct Snapshot {
    events: Arc<[Event]>,
    pub stats: ParseStats,
    /// Display form of the source, if the snapshot came from one
    pub source: Option<String>,
    pub loaded_at: Option<DateTime<Local>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::empty()
    }
}

impl Snapshot {
    pub fn empty() -> Self {
        Snapshot::from_events(Vec::new())
    }

    pub fn from_events(events: Vec<Event>) -> Self {
        let stats = ParseStats {
            accepted: events.len(),
            ..ParseStats::default()
        };

        Snapshot {
            events: events.into(),
            stats,
            source: None,
            loaded_at: None,
        }
    }

    pub fn from_outcome(outcome: ParseOutcome, source: &Source) -> Self {
        Snapshot {
            events: outcome.events.into(),
            stats: outcome.stats,
            source: Some(source.to_string()),
            loaded_at: Some(Local::now()),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every module in the snapshot, sorted. This is the color universe:
    /// filters never change it, so colors stay put while filtering.
    pub fn modules(&self) -> Vec<String> {
        facet_values(&self.events, Facet::Module)
    }
}

/// What a reload did.
#[derive(Debug)]
pub struct LoadReport {
    pub stats: ParseStats,
    pub error: Option<CalendarioError>,
    /// Selections pruned because the new data no longer reaches them
    pub dropped: Vec<(Facet, String)>,
}

/// State owned by the composing application.
#[derive(Debug, Clone)]
pub struct Session {
    snapshot: Arc<Snapshot>,
    selection: FacetSelection,
    period_marker: String,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            snapshot: Arc::new(Snapshot::empty()),
            selection: FacetSelection::new(),
            period_marker: DEFAULT_PERIOD_MARKER.to_string(),
        }
    }

    pub fn with_period_marker(mut self, marker: impl Into<String>) -> Self {
        self.period_marker = marker.into();
        self
    }

    pub fn period_marker(&self) -> &str {
        &self.period_marker
    }

    /// Load `source` and make it the current snapshot, even when loading
    /// failed (the snapshot is then empty).
    pub async fn load(&mut self, source: &Source, options: &LoadOptions) -> LoadReport {
        let loaded = load(source, options).await;
        let stats = loaded.snapshot.stats;
        let dropped = self.replace(loaded.snapshot);

        LoadReport {
            stats,
            error: loaded.error,
            dropped,
        }
    }

    /// Swap in a new snapshot and reconcile the selection against it.
    pub fn replace(&mut self, snapshot: Snapshot) -> Vec<(Facet, String)> {
        self.snapshot = Arc::new(snapshot);
        self.selection.reconcile(self.snapshot.events())
    }

    /// Shared handle to the current snapshot; stays valid across reloads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn events(&self) -> &[Event] {
        self.snapshot.events()
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    /// Toggle one facet value and prune dependent selections.
    /// Returns the values that were pruned.
    pub fn toggle(&mut self, facet: Facet, value: &str) -> Vec<(Facet, String)> {
        self.selection.toggle(facet, value);
        self.selection.reconcile(self.snapshot.events())
    }

    /// Select one facet value, keeping it if already selected, and prune
    /// dependent selections. Returns the values that were pruned.
    pub fn select(&mut self, facet: Facet, value: &str) -> Vec<(Facet, String)> {
        self.selection.select(facet, value);
        self.selection.reconcile(self.snapshot.events())
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }

    /// Events passing the current selection, freshly derived.
    pub fn filtered(&self) -> Vec<Event> {
        apply_facets(self.snapshot.events(), &self.selection)
    }

    pub fn modules(&self) -> Vec<String> {
        self.snapshot.modules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{test_event, ymd};

    fn snapshot() -> Snapshot {
        let d = Some(ymd(2026, 3, 2));
        Snapshot::from_events(vec![
            test_event("Aula A", "Graduação", "Aula", "X", d, d, 1),
            test_event("Aula B", "EAD", "Aula", "Y", d, d, 2),
            test_event("Rematrícula", "EAD", "Matrícula", "Z", d, d, 3),
        ])
    }

    #[test]
    fn test_toggle_prunes_modules_on_product_change() {
        let mut session = Session::new();
        session.replace(snapshot());

        assert!(session.toggle(Facet::Module, "X").is_empty());
        let dropped = session.toggle(Facet::Product, "EAD");

        assert_eq!(dropped, vec![(Facet::Module, "X".to_string())]);
        let names: Vec<_> = session.filtered().into_iter().map(|e| e.activity).collect();
        assert_eq!(names, vec!["Aula B", "Rematrícula"]);
    }

    #[test]
    fn test_select_twice_keeps_filter() {
        let mut session = Session::new();
        session.replace(snapshot());

        session.select(Facet::Product, "EAD");
        session.select(Facet::Product, "EAD");

        assert!(session.selection().is_selected(Facet::Product, "EAD"));
        assert_eq!(session.filtered().len(), 2);
    }

    #[test]
    fn test_replace_keeps_old_snapshot_alive() {
        let mut session = Session::new();
        session.replace(snapshot());
        let before = session.snapshot();

        session.replace(Snapshot::empty());

        assert_eq!(before.len(), 3);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_replace_reconciles_selection() {
        let mut session = Session::new();
        session.replace(snapshot());
        session.toggle(Facet::Category, "Matrícula");

        let dropped = session.replace(Snapshot::empty());

        assert_eq!(dropped, vec![(Facet::Category, "Matrícula".to_string())]);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_modules_ignore_filters() {
        let mut session = Session::new();
        session.replace(snapshot());
        session.toggle(Facet::Product, "EAD");

        assert_eq!(session.modules(), vec!["X", "Y", "Z"]);
        assert_eq!(session.filtered().len(), 2);
    }

    #[test]
    fn test_clear_filters() {
        let mut session = Session::new();
        session.replace(snapshot());
        session.toggle(Facet::Product, "EAD");

        session.clear_filters();

        assert_eq!(session.filtered().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_load_replaces_with_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        session.replace(snapshot());

        let report = session
            .load(&Source::Path(dir.path().join("missing.csv")), &LoadOptions::default())
            .await;

        assert!(report.error.is_some());
        assert!(session.events().is_empty());
    }
}
