use anyhow::{Context, Result};
use calendario_core::event::Event;
use calendario_core::format::MONTH_ABBREVIATIONS;
use calendario_core::grid::MonthGrid;
use calendario_core::query::has_events_on;
use calendario_core::session::Session;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use crate::utils::dates::today;

/// Visible width of a mini month: seven cells of two digits plus separators
const WIDTH: usize = 20;

/// Title, weekday initials and up to six weeks
const LINES: usize = 8;

const MONTHS_PER_ROW: usize = 3;

pub fn run(session: &Session, year: Option<i32>) -> Result<()> {
    let today = today();
    let year = year.unwrap_or(today.year());
    let events = session.filtered();

    println!("{}", year.to_string().bold());
    println!();

    let months = (1..=12)
        .map(|month| {
            MonthGrid::new(year, month)
                .map(|grid| render_mini_month(&grid, &events, today))
                .with_context(|| format!("Invalid year {year}"))
        })
        .collect::<Result<Vec<_>>>()?;

    for row in months.chunks(MONTHS_PER_ROW) {
        for line in 0..LINES {
            let columns: Vec<&str> = row.iter().map(|m| m[line].as_str()).collect();
            println!("{}", columns.join("   ").trim_end());
        }
        println!();
    }

    Ok(())
}

/// Fixed-size block of `LINES` lines, each `WIDTH` visible characters wide.
fn render_mini_month(grid: &MonthGrid, events: &[Event], today: NaiveDate) -> Vec<String> {
    let mut lines = Vec::with_capacity(LINES);

    let title = MONTH_ABBREVIATIONS[grid.month as usize - 1];
    lines.push(format!("{}{}", title.bold(), " ".repeat(WIDTH - title.chars().count())));
    lines.push(format!("{}", " D  S  T  Q  Q  S  S".dimmed()));

    for week in grid.weeks() {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(date) => render_day(*date, events, today),
                None => "  ".to_string(),
            })
            .collect();
        lines.push(cells.join(" "));
    }

    while lines.len() < LINES {
        lines.push(" ".repeat(WIDTH));
    }

    lines
}

fn render_day(date: NaiveDate, events: &[Event], today: NaiveDate) -> String {
    let label = format!("{:>2}", date.day());

    if date == today {
        label.reversed().to_string()
    } else if has_events_on(events, date) {
        label.cyan().bold().to_string()
    } else {
        label.dimmed().to_string()
    }
}
