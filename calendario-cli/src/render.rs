//! TUI rendering for calendar types.
//!
//! Module colors come from the same sorted-label rule as the printed summary,
//! mapped onto eight terminal colors instead of hex values.

use calendario_core::color::color_for;
use calendario_core::event::Event;
use calendario_core::format::format_date_range;
use calendario_core::report::ModuleGroup;
use owo_colors::{AnsiColors, OwoColorize, Rgb};

/// Terminal counterpart of the print palette, entry for entry.
pub const TERMINAL_PALETTE: [AnsiColors; 8] = [
    AnsiColors::Magenta,
    AnsiColors::Green,
    AnsiColors::Blue,
    AnsiColors::Yellow,
    AnsiColors::Red,
    AnsiColors::BrightMagenta,
    AnsiColors::Cyan,
    AnsiColors::BrightGreen,
];

pub const MARKER: &str = "●";

pub fn module_color(module: &str, all_modules: &[String]) -> AnsiColors {
    *color_for(module, all_modules, &TERMINAL_PALETTE)
}

/// `#RRGGBB` to an RGB color; anything else renders white.
pub fn hex_color(hex: &str) -> Rgb {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(255)
    };

    match hex.strip_prefix('#') {
        Some(digits) if digits.len() == 6 => Rgb(channel(1), channel(3), channel(5)),
        _ => Rgb(255, 255, 255),
    }
}

/// Rendering that needs the module universe to pick colors.
pub trait Render {
    fn render(&self, all_modules: &[String]) -> String;
}

impl Render for Event {
    fn render(&self, all_modules: &[String]) -> String {
        let color = module_color(&self.module, all_modules);
        format!(
            "{} {} {} {}",
            MARKER.color(color),
            self.activity.bold(),
            format_date_range(self.start, self.end).dimmed(),
            format!("[{}]", self.category).dimmed()
        )
    }
}

impl Render for ModuleGroup<'_> {
    fn render(&self, _all_modules: &[String]) -> String {
        let color = hex_color(self.color);
        let mut lines = vec![format!(
            "{} {}",
            self.module.color(color).bold(),
            self.products.join(", ").dimmed()
        )];

        for category in &self.categories {
            lines.push(format!("  {}", category.category.bold()));
            for event in &category.events {
                lines.push(format!(
                    "    {} - {}",
                    format_date_range(event.start, event.end),
                    event.activity.dimmed()
                ));
            }
        }

        lines.join("\n")
    }
}

/// Detail block for the day view.
pub fn render_details(event: &Event, all_modules: &[String]) -> String {
    let color = module_color(&event.module, all_modules);
    [
        format!("{} {}", "▌".color(color), event.activity.bold()),
        format!("{} {} {}", "▌".color(color), "Produto:".dimmed(), event.product),
        format!("{} {} {}", "▌".color(color), "Categoria:".dimmed(), event.category),
        format!("{} {} {}", "▌".color(color), "Módulo:".dimmed(), event.module.color(color)),
        format!(
            "{} {} {}",
            "▌".color(color),
            "Período:".dimmed(),
            format_date_range(event.start, event.end)
        ),
    ]
    .join("\n")
}
