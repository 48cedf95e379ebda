//! pt-BR labels and date formatting shared by every view.

use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Sunday first, matching the calendar grid.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

pub const INVALID_DATE: &str = "Data inválida";

/// Month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// One date for single-day ranges, `start - end` otherwise.
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(start), Some(end)) if start == end => format_date(start),
        (Some(start), Some(end)) => format!("{} - {}", format_date(start), format_date(end)),
        _ => INVALID_DATE.to_string(),
    }
}

/// e.g. "Quarta, 4 de Março de 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_name(date),
        date.day(),
        month_name(date.month()),
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ymd;

    #[test]
    fn test_format_date_range() {
        assert_eq!(format_date_range(Some(ymd(2026, 2, 1)), Some(ymd(2026, 2, 1))), "01/02/2026");
        assert_eq!(
            format_date_range(Some(ymd(2026, 2, 5)), Some(ymd(2026, 2, 10))),
            "05/02/2026 - 10/02/2026"
        );
        assert_eq!(format_date_range(None, Some(ymd(2026, 2, 10))), "Data inválida");
        assert_eq!(format_date_range(Some(ymd(2026, 2, 10)), None), "Data inválida");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(format_long_date(ymd(2026, 3, 4)), "Quarta, 4 de Março de 2026");
        assert_eq!(weekday_name(ymd(2026, 3, 1)), "Domingo");
    }
}
