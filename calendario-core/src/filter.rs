//! Product/module/category facets.
//!
//! A selection holds three independent sets of values. Module and category
//! choices depend on the product choice: after any change, [`FacetSelection::reconcile`]
//! drops module/category values that no event under the selected products
//! carries.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::event::Event;

/// One of the three filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Facet {
    Product,
    Module,
    Category,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Product, Facet::Module, Facet::Category];

    /// The event's value for this facet.
    pub fn value_of<'e>(&self, event: &'e Event) -> &'e str {
        match self {
            Facet::Product => &event.product,
            Facet::Module => &event.module,
            Facet::Category => &event.category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::Product => "product",
            Facet::Module => "module",
            Facet::Category => "category",
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Selected values per facet. Empty means "no constraint".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FacetSelection {
    products: BTreeSet<String>,
    modules: BTreeSet<String>,
    categories: BTreeSet<String>,
}

impl FacetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Product => &self.products,
            Facet::Module => &self.modules,
            Facet::Category => &self.categories,
        }
    }

    fn selected_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Product => &mut self.products,
            Facet::Module => &mut self.modules,
            Facet::Category => &mut self.categories,
        }
    }

    /// Add `value` if absent, remove it if present.
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, facet: Facet, value: &str) -> bool {
        let set = self.selected_mut(facet);
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }

    /// Add `value` if absent. Returns whether it was newly added.
    pub fn select(&mut self, facet: Facet, value: &str) -> bool {
        self.selected_mut(facet).insert(value.to_string())
    }

    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        self.selected(facet).contains(value)
    }

    /// No facet constrains anything.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.modules.is_empty() && self.categories.is_empty()
    }

    /// Reset all three facets at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Every facet either has an empty selection or contains the event's value.
    pub fn matches(&self, event: &Event) -> bool {
        Facet::ALL.iter().all(|facet| {
            let set = self.selected(*facet);
            set.is_empty() || set.contains(facet.value_of(event))
        })
    }

    /// Drop module and category values unreachable under the selected products.
    ///
    /// Returns what was dropped, in facet then value order.
    pub fn reconcile(&mut self, events: &[Event]) -> Vec<(Facet, String)> {
        let mut dropped = Vec::new();

        for facet in [Facet::Module, Facet::Category] {
            let reachable = reachable_values(events, &self.products, facet);
            let (keep, drop): (BTreeSet<String>, BTreeSet<String>) = std::mem::take(self.selected_mut(facet))
                .into_iter()
                .partition(|v| reachable.contains(v.as_str()));

            *self.selected_mut(facet) = keep;
            dropped.extend(drop.into_iter().map(|v| (facet, v)));
        }

        dropped
    }
}

/// Events passing every facet, in input order.
pub fn apply_facets(events: &[Event], selection: &FacetSelection) -> Vec<Event> {
    if selection.is_empty() {
        return events.to_vec();
    }

    events
        .iter()
        .filter(|e| selection.matches(e))
        .cloned()
        .collect()
}

/// Sorted unique values of `facet` across `events`.
pub fn facet_values(events: &[Event], facet: Facet) -> Vec<String> {
    events
        .iter()
        .map(|e| facet.value_of(e))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Values of `facet` carried by events under the given product selection.
/// An empty product selection reaches every event.
pub fn reachable_values<'e>(
    events: &'e [Event],
    products: &BTreeSet<String>,
    facet: Facet,
) -> BTreeSet<&'e str> {
    events
        .iter()
        .filter(|e| products.is_empty() || products.contains(&e.product))
        .map(|e| facet.value_of(e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{test_event, ymd};

    fn sample() -> Vec<Event> {
        let d = Some(ymd(2026, 3, 2));
        vec![
            test_event("Aula A", "Graduação", "Aula", "X", d, d, 1),
            test_event("Prova A", "Graduação", "Avaliação", "X", d, d, 2),
            test_event("Aula B", "EAD", "Aula", "Y", d, d, 3),
            test_event("Rematrícula", "EAD", "Matrícula", "Z", d, d, 4),
        ]
    }

    fn names(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.activity.as_str()).collect()
    }

    #[test]
    fn test_empty_selection_returns_everything_in_order() {
        let events = sample();

        let filtered = apply_facets(&events, &FacetSelection::new());

        assert_eq!(filtered, events);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let events = sample();
        let mut selection = FacetSelection::new();
        selection.toggle(Facet::Category, "Aula");

        assert_eq!(names(&apply_facets(&events, &selection)), vec!["Aula A", "Aula B"]);

        selection.toggle(Facet::Product, "EAD");
        assert_eq!(names(&apply_facets(&events, &selection)), vec!["Aula B"]);

        selection.toggle(Facet::Module, "X");
        assert!(apply_facets(&events, &selection).is_empty());
    }

    #[test]
    fn test_values_within_a_facet_combine_with_or() {
        let events = sample();
        let mut selection = FacetSelection::new();
        selection.toggle(Facet::Module, "X");
        selection.toggle(Facet::Module, "Z");

        assert_eq!(names(&apply_facets(&events, &selection)), vec!["Aula A", "Prova A", "Rematrícula"]);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = FacetSelection::new();

        assert!(selection.toggle(Facet::Product, "EAD"));
        assert!(selection.is_selected(Facet::Product, "EAD"));
        assert!(!selection.toggle(Facet::Product, "EAD"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut selection = FacetSelection::new();

        assert!(selection.select(Facet::Module, "X"));
        assert!(!selection.select(Facet::Module, "X"));
        assert!(selection.is_selected(Facet::Module, "X"));
    }

    #[test]
    fn test_product_change_prunes_unreachable_selections() {
        let events = sample();
        let mut selection = FacetSelection::new();
        selection.toggle(Facet::Product, "Graduação");
        selection.toggle(Facet::Module, "X");
        selection.toggle(Facet::Category, "Aula");
        assert!(selection.reconcile(&events).is_empty());

        // Switch products: X only exists under Graduação, Aula exists under both
        selection.toggle(Facet::Product, "Graduação");
        selection.toggle(Facet::Product, "EAD");
        let dropped = selection.reconcile(&events);

        assert_eq!(dropped, vec![(Facet::Module, "X".to_string())]);
        assert!(selection.selected(Facet::Module).is_empty());
        assert!(selection.is_selected(Facet::Category, "Aula"));
        assert!(selection.is_selected(Facet::Product, "EAD"));
    }

    #[test]
    fn test_reconcile_without_products_keeps_known_values() {
        let events = sample();
        let mut selection = FacetSelection::new();
        selection.toggle(Facet::Module, "Y");
        selection.toggle(Facet::Category, "Inexistente");

        let dropped = selection.reconcile(&events);

        assert_eq!(dropped, vec![(Facet::Category, "Inexistente".to_string())]);
        assert!(selection.is_selected(Facet::Module, "Y"));
    }

    #[test]
    fn test_clear_resets_all_facets() {
        let mut selection = FacetSelection::new();
        selection.toggle(Facet::Product, "EAD");
        selection.toggle(Facet::Module, "Y");
        selection.toggle(Facet::Category, "Aula");

        selection.clear();

        assert!(selection.is_empty());
        assert_eq!(selection, FacetSelection::default());
    }

    #[test]
    fn test_facet_values_sorted_unique() {
        let events = sample();

        assert_eq!(facet_values(&events, Facet::Product), vec!["EAD", "Graduação"]);
        assert_eq!(facet_values(&events, Facet::Category), vec!["Aula", "Avaliação", "Matrícula"]);
    }

    #[test]
    fn test_reachable_values_under_products() {
        let events = sample();
        let products: BTreeSet<String> = ["EAD".to_string()].into();

        let modules: Vec<_> = reachable_values(&events, &products, Facet::Module).into_iter().collect();

        assert_eq!(modules, vec!["Y", "Z"]);
    }
}
