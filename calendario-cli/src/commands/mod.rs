pub mod config;
pub mod day;
pub mod facets;
pub mod list;
pub mod month;
pub mod report;
pub mod year;

use anyhow::Result;
use calendario_core::config::CalendarioConfig;
use calendario_core::filter::Facet;
use calendario_core::load::Source;
use calendario_core::session::Session;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::utils::tui::with_spinner;

/// Facet values requested on the command line.
pub struct Filters {
    pub products: Vec<String>,
    pub modules: Vec<String>,
    pub categories: Vec<String>,
}

/// Load the feed into a fresh session and apply the requested filters.
///
/// A failed load is reported and leaves the session empty; it does not stop
/// the command.
pub async fn open_session(config: &CalendarioConfig, source: Option<&str>, filters: &Filters) -> Result<Session> {
    let source: Source = source.unwrap_or(&config.source).parse()?;
    let options = config.load_options()?;

    let mut session = Session::new().with_period_marker(&config.period_marker);

    let report = with_spinner(format!("Loading {source}"), session.load(&source, &options)).await;

    match &report.error {
        Some(e) => eprintln!(
            "{} {}",
            "Could not load the calendar:".yellow(),
            e.to_string().dimmed()
        ),
        None => eprintln!(
            "{}",
            format!("Calendar loaded: {} events imported", report.stats.accepted).dimmed()
        ),
    }

    apply_filters(&mut session, filters);
    Ok(session)
}

/// Select each requested value; repeating a value keeps it selected.
/// Products go last so that a product choice prunes module and category
/// choices it cannot reach.
fn apply_filters(session: &mut Session, filters: &Filters) {
    let requested = filters
        .modules
        .iter()
        .map(|v| (Facet::Module, v))
        .chain(filters.categories.iter().map(|v| (Facet::Category, v)))
        .chain(filters.products.iter().map(|v| (Facet::Product, v)));

    for (facet, value) in requested {
        debug!(%facet, %value, "selecting facet value");
        for (dropped_facet, dropped) in session.select(facet, value) {
            eprintln!(
                "{}",
                format!("Ignoring {dropped_facet} '{dropped}': no events under the selected products").yellow()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendario_core::event::Event;
    use calendario_core::session::Snapshot;

    fn event(product: &str, module: &str) -> Event {
        Event {
            activity: format!("{product} {module}"),
            product: product.to_string(),
            category: "Aula".to_string(),
            module: module.to_string(),
            start: None,
            end: None,
            order: 0,
            visible: true,
        }
    }

    #[test]
    fn test_apply_filters_prunes_after_products() {
        let mut session = Session::new();
        session.replace(Snapshot::from_events(vec![event("EAD", "Y"), event("Graduação", "X")]));
        let filters = Filters {
            products: vec!["EAD".to_string()],
            modules: vec!["X".to_string(), "Y".to_string()],
            categories: vec![],
        };

        apply_filters(&mut session, &filters);

        let modules: Vec<_> = session.selection().selected(Facet::Module).iter().cloned().collect();
        assert_eq!(modules, vec!["Y"]);
        assert_eq!(session.filtered().len(), 1);
    }

    #[test]
    fn test_apply_filters_repeated_value_stays_selected() {
        let mut session = Session::new();
        session.replace(Snapshot::from_events(vec![event("EAD", "Y"), event("Graduação", "X")]));
        let filters = Filters {
            products: vec!["EAD".to_string(), "EAD".to_string()],
            modules: vec![],
            categories: vec![],
        };

        apply_filters(&mut session, &filters);

        assert!(session.selection().is_selected(Facet::Product, "EAD"));
        assert_eq!(session.filtered().len(), 1);
    }
}
