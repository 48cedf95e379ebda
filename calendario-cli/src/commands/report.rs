use anyhow::Result;
use calendario_core::report::build_report;
use calendario_core::session::Session;
use chrono::Local;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(session: &Session) -> Result<()> {
    let events = session.filtered();
    let modules = session.modules();
    let report = build_report(&events, &modules);

    println!("{}", "Calendário Administrativo".bold());
    println!(
        "{}",
        Local::now().format("Gerado em %d/%m/%Y às %H:%M").to_string().dimmed()
    );

    if report.is_empty() {
        println!();
        println!("{}", "Nenhum evento encontrado com os filtros selecionados.".dimmed());
        return Ok(());
    }

    for module in &report {
        println!();
        println!("{}", module.render(&modules));
    }

    Ok(())
}
