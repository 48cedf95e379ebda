use anyhow::Result;
use calendario_core::filter::{Facet, facet_values, reachable_values};
use calendario_core::session::Session;
use owo_colors::OwoColorize;

use crate::render::{MARKER, module_color};

pub fn run(session: &Session) -> Result<()> {
    let events = session.events();
    let selection = session.selection();
    let modules = session.modules();
    let products = selection.selected(Facet::Product);

    for (i, facet) in Facet::ALL.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", heading(facet).bold());

        let reachable = reachable_values(events, products, facet);

        for value in facet_values(events, facet) {
            let check = if selection.is_selected(facet, &value) { "[x]" } else { "[ ]" };
            let label = match facet {
                Facet::Module => format!("{} {}", MARKER.color(module_color(&value, &modules)), value),
                _ => value.clone(),
            };

            // Module and category values out of reach of the chosen products
            if facet != Facet::Product && !reachable.contains(value.as_str()) {
                println!("  {} {}", check.dimmed(), label.dimmed());
            } else {
                println!("  {} {}", check, label);
            }
        }
    }

    println!();
    println!(
        "{}",
        format!("{} of {} events match the current filters", session.filtered().len(), events.len()).dimmed()
    );

    Ok(())
}

fn heading(facet: Facet) -> &'static str {
    match facet {
        Facet::Product => "Produtos",
        Facet::Module => "Módulos",
        Facet::Category => "Categorias",
    }
}
