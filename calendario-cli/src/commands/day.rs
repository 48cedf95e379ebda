use anyhow::Result;
use calendario_core::format::{format_date_range, format_long_date};
use calendario_core::parse::parse_user_date;
use calendario_core::query::{active_period_with, events_on};
use calendario_core::session::Session;
use owo_colors::OwoColorize;

use crate::render::{module_color, render_details};

pub fn run(session: &Session, date: &str) -> Result<()> {
    let date = parse_user_date(date)?;
    let events = session.filtered();
    let modules = session.modules();

    println!("{}", format_long_date(date).bold());

    if let Some(period) = active_period_with(&events, date, session.period_marker()) {
        println!(
            "{} {} {}",
            "Período letivo:".dimmed(),
            period.module.color(module_color(&period.module, &modules)),
            format_date_range(period.start, period.end).dimmed()
        );
    }
    println!();

    let day_events = events_on(&events, date);
    if day_events.is_empty() {
        println!("{}", "Nenhum evento neste dia".dimmed());
        return Ok(());
    }

    let blocks: Vec<String> = day_events
        .iter()
        .map(|event| render_details(event, &modules))
        .collect();
    println!("{}", blocks.join("\n\n"));

    Ok(())
}
