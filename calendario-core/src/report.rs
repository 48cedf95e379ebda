//! Deterministic display order for the printed summary and the list view.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::color::print_color;
use crate::event::Event;

/// One module block of the summary.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleGroup<'e> {
    pub module: &'e str,
    /// Print palette entry for the module
    pub color: &'static str,
    /// Distinct non-empty products seen in the module, first seen first
    pub products: Vec<&'e str>,
    pub categories: Vec<CategoryGroup<'e>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<'e> {
    pub category: &'e str,
    /// Lowest `Ordem` among all of the category's events
    pub min_order: i32,
    pub events: Vec<&'e Event>,
}

/// Group events by module, then category.
///
/// Modules sort by name. Categories sort by their lowest order, keeping
/// first-seen order on ties. Events sort by order, then start date, with
/// events lacking a valid start date after the dated ones of the same order.
pub fn build_report<'e, S: AsRef<str>>(events: &'e [Event], all_modules: &[S]) -> Vec<ModuleGroup<'e>> {
    let mut by_module: BTreeMap<&str, Vec<(&str, Vec<&Event>)>> = BTreeMap::new();

    for event in events {
        let categories = by_module.entry(event.module.as_str()).or_default();
        match categories.iter_mut().find(|(c, _)| *c == event.category) {
            Some((_, members)) => members.push(event),
            None => categories.push((event.category.as_str(), vec![event])),
        }
    }

    by_module
        .into_iter()
        .map(|(module, categories)| {
            let mut products: Vec<&str> = Vec::new();
            for event in categories.iter().flat_map(|(_, members)| members.iter().copied()) {
                if !event.product.is_empty() && !products.contains(&event.product.as_str()) {
                    products.push(event.product.as_str());
                }
            }

            let mut categories: Vec<CategoryGroup> = categories
                .into_iter()
                .map(|(category, members)| category_group(category, members))
                .collect();
            categories.sort_by_key(|c| c.min_order);

            ModuleGroup {
                module,
                color: print_color(module, all_modules),
                products,
                categories,
            }
        })
        .collect()
}

fn category_group<'e>(category: &'e str, members: Vec<&'e Event>) -> CategoryGroup<'e> {
    let min_order = members.iter().map(|e| e.order).min().unwrap_or_default();

    let mut events = members;
    events.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then(a.start.is_none().cmp(&b.start.is_none()))
            .then(a.start.cmp(&b.start))
    });

    CategoryGroup {
        category,
        min_order,
        events,
    }
}

/// Events of one calendar month in the list view.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup<'e> {
    pub year: i32,
    pub month: u32,
    pub events: Vec<&'e Event>,
}

/// Events with a valid start date, sorted by start (stable), grouped by the
/// month they start in.
pub fn group_by_month(events: &[Event]) -> Vec<MonthGroup<'_>> {
    let mut dated: Vec<(chrono::NaiveDate, &Event)> = events
        .iter()
        .filter_map(|e| e.start.map(|start| (start, e)))
        .collect();
    dated.sort_by_key(|(start, _)| *start);

    let mut groups: Vec<MonthGroup> = Vec::new();
    for (start, event) in dated {
        match groups.last_mut() {
            Some(group) if group.year == start.year() && group.month == start.month() => {
                group.events.push(event);
            }
            _ => groups.push(MonthGroup {
                year: start.year(),
                month: start.month(),
                events: vec![event],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{test_event, ymd};

    fn sample() -> Vec<Event> {
        vec![
            test_event("Prova 2", "EAD", "Avaliação", "2026-52", Some(ymd(2026, 5, 10)), Some(ymd(2026, 5, 10)), 5),
            test_event("Início", "EAD", "Período Letivo", "2026-52", Some(ymd(2026, 4, 1)), Some(ymd(2026, 6, 30)), 1),
            test_event("Prova 1", "Graduação", "Avaliação", "2026-52", Some(ymd(2026, 5, 3)), Some(ymd(2026, 5, 3)), 5),
            test_event("Sem data", "EAD", "Avaliação", "2026-52", None, None, 0),
            test_event("Matrícula", "EAD", "Matrícula", "2026-51", Some(ymd(2026, 1, 10)), Some(ymd(2026, 1, 20)), 2),
        ]
    }

    #[test]
    fn test_report_orders_modules_by_name() {
        let events = sample();
        let modules = ["2026-51", "2026-52"];

        let report = build_report(&events, &modules);

        let names: Vec<_> = report.iter().map(|m| m.module).collect();
        assert_eq!(names, vec!["2026-51", "2026-52"]);
        assert_eq!(report[0].color, "#8B5CF6");
        assert_eq!(report[1].color, "#10B981");
    }

    #[test]
    fn test_report_orders_categories_by_min_order() {
        let events = sample();
        let report = build_report(&events, &["2026-51", "2026-52"]);
        let module = &report[1];

        let categories: Vec<_> = module.categories.iter().map(|c| c.category).collect();

        // Avaliação's lowest order comes from the undated row (0)
        assert_eq!(categories, vec!["Avaliação", "Período Letivo"]);
        assert_eq!(module.categories[0].min_order, 0);
    }

    #[test]
    fn test_report_orders_events_by_order_then_start() {
        let events = sample();
        let report = build_report(&events, &["2026-51", "2026-52"]);
        let assessments = &report[1].categories[0];

        let names: Vec<_> = assessments.events.iter().map(|e| e.activity.as_str()).collect();

        assert_eq!(names, vec!["Sem data", "Prova 1", "Prova 2"]);
    }

    #[test]
    fn test_report_lists_undated_events_after_dated_ones() {
        let d = Some(ymd(2026, 3, 1));
        let events = vec![
            test_event("Sem data", "EAD", "Aula", "M", None, None, 1),
            test_event("Com data", "EAD", "Aula", "M", d, d, 1),
            test_event("Depois", "EAD", "Aula", "M", None, d, 2),
        ];

        let report = build_report(&events, &["M"]);
        let names: Vec<_> = report[0].categories[0].events.iter().map(|e| e.activity.as_str()).collect();

        assert_eq!(names, vec!["Com data", "Sem data", "Depois"]);
    }

    #[test]
    fn test_report_collects_products_first_seen() {
        let events = sample();
        let report = build_report(&events, &["2026-51", "2026-52"]);

        assert_eq!(report[1].products, vec!["EAD", "Graduação"]);
        assert_eq!(report[0].products, vec!["EAD"]);
    }

    #[test]
    fn test_report_category_ties_keep_first_seen_order() {
        let d = Some(ymd(2026, 3, 1));
        let events = vec![
            test_event("a", "EAD", "Zeta", "M", d, d, 1),
            test_event("b", "EAD", "Alfa", "M", d, d, 1),
        ];

        let report = build_report(&events, &["M"]);
        let categories: Vec<_> = report[0].categories.iter().map(|c| c.category).collect();

        assert_eq!(categories, vec!["Zeta", "Alfa"]);
    }

    #[test]
    fn test_group_by_month() {
        let events = sample();

        let groups = group_by_month(&events);

        let months: Vec<_> = groups.iter().map(|g| (g.year, g.month, g.events.len())).collect();
        assert_eq!(months, vec![(2026, 1, 1), (2026, 4, 1), (2026, 5, 2)]);
        assert_eq!(groups[2].events[0].activity, "Prova 1");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(build_report(&[], &Vec::<String>::new()).is_empty());
        assert!(group_by_month(&[]).is_empty());
    }
}
