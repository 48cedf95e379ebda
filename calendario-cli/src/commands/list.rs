use anyhow::Result;
use calendario_core::format::month_name;
use calendario_core::report::group_by_month;
use calendario_core::session::Session;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(session: &Session, json: bool) -> Result<()> {
    let events = session.filtered();
    let modules = session.modules();
    let groups = group_by_month(&events);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("{}", "Nenhum evento encontrado com os filtros selecionados.".dimmed());
        return Ok(());
    }

    let total: usize = groups.iter().map(|g| g.events.len()).sum();
    println!("{}", format!("Lista de Eventos ({total})").bold());

    for group in &groups {
        println!();
        println!("{}", format!("{} {}", month_name(group.month), group.year).bold());
        for event in &group.events {
            println!("  {}", event.render(&modules));
            println!(
                "    {} {}  {} {}",
                "Módulo:".dimmed(),
                event.module,
                "Produto:".dimmed(),
                event.product
            );
        }
    }

    Ok(())
}
