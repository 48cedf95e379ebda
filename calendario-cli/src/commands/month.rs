use anyhow::{Context, Result};
use calendario_core::event::Event;
use calendario_core::filter::{Facet, facet_values};
use calendario_core::format::{WEEKDAY_ABBREVIATIONS, month_name};
use calendario_core::grid::MonthGrid;
use calendario_core::query::{active_period_with, events_on};
use calendario_core::session::Session;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use crate::render::{MARKER, module_color};
use crate::utils::dates::{parse_month, today};

/// Visible width of one day cell
const CELL: usize = 7;

/// Event markers shown per day before collapsing into "+N"
const MAX_MARKERS: usize = 3;

pub fn run(session: &Session, month: Option<&str>) -> Result<()> {
    let (year, month) = parse_month(month)?;
    let grid = MonthGrid::new(year, month).with_context(|| format!("Invalid month {year}-{month:02}"))?;

    let events = session.filtered();
    let modules = session.modules();
    let today = today();

    println!("{}", format!("{} {}", month_name(grid.month), grid.year).bold());
    if let (Some(previous), Some(next)) = (grid.previous(), grid.next()) {
        let hint = format!("‹ {}-{:02}   {}-{:02} ›", previous.year, previous.month, next.year, next.month);
        println!("{}", hint.dimmed());
    }
    println!();

    let header: String = WEEKDAY_ABBREVIATIONS
        .iter()
        .map(|d| format!("{:<CELL$}", format!(" {d}")))
        .collect();
    println!("{}", header.dimmed());

    for week in grid.weeks() {
        let mut numbers = String::new();
        let mut markers = String::new();

        for cell in week {
            match cell {
                Some(date) => {
                    numbers.push_str(&render_day_number(date, &events, &modules, session.period_marker(), today));
                    markers.push_str(&render_markers(date, &events, &modules));
                }
                None => {
                    numbers.push_str(&" ".repeat(CELL));
                    markers.push_str(&" ".repeat(CELL));
                }
            }
        }

        println!("{}", numbers.trim_end());
        println!("{}", markers.trim_end());
    }

    render_legend(&events, &modules);

    Ok(())
}

/// Day number, shaded with the color of the academic period running that day.
fn render_day_number(date: NaiveDate, events: &[Event], modules: &[String], marker: &str, today: NaiveDate) -> String {
    let label = format!(" {:>2} ", date.day());
    let padding = " ".repeat(CELL - label.chars().count());

    let label = match active_period_with(events, date, marker) {
        Some(period) => label.on_color(module_color(&period.module, modules)).to_string(),
        None => label,
    };

    if date == today {
        format!("{}{}", label.bold().underline(), padding)
    } else {
        format!("{label}{padding}")
    }
}

fn render_markers(date: NaiveDate, events: &[Event], modules: &[String]) -> String {
    let day_events = events_on(events, date);

    let mut cell = String::from(" ");
    let mut width = 1;
    for event in day_events.iter().take(MAX_MARKERS) {
        cell.push_str(&MARKER.color(module_color(&event.module, modules)).to_string());
        width += 1;
    }

    if day_events.len() > MAX_MARKERS {
        let more = format!("+{}", day_events.len() - MAX_MARKERS);
        width += more.chars().count();
        cell.push_str(&more.dimmed().to_string());
    }

    cell.push_str(&" ".repeat(CELL.saturating_sub(width)));
    cell
}

/// Modules shown this month, with their colors.
fn render_legend(events: &[Event], modules: &[String]) {
    let shown = facet_values(events, Facet::Module);
    if shown.is_empty() {
        println!("{}", "No events match the selected filters".dimmed());
        return;
    }

    println!();
    let legend: Vec<String> = shown
        .iter()
        .map(|m| format!("{} {}", MARKER.color(module_color(m, modules)), m))
        .collect();
    println!("{}", legend.join("  "));
}
