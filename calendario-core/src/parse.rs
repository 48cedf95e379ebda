//! Record parser for the `;`-delimited calendar feed.
//!
//! The first line is a header and is always skipped. Fields are split on `;`
//! without quote handling, so a stray `"` never swallows the following rows;
//! a field wrapped in a matching pair of quotes is unwrapped afterwards.
//! Rows that are too short or marked invisible are dropped without an error;
//! the counts end up in [`ParseStats`] for diagnostics.

use chrono::{Days, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::constants::{MIN_FIELDS, VISIBLE_MARKER};
use crate::error::{CalendarioError, CalendarioResult};
use crate::event::Event;

/// Column positions in the export.
const ACTIVITY: usize = 0;
const PRODUCT: usize = 1;
const CATEGORY: usize = 2;
const MODULE: usize = 3;
const START: usize = 4;
const END: usize = 5;
const ORDER: usize = 7;
const VISIBLE: usize = 8;

/// Side-channel counters collected while parsing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub accepted: usize,
    /// Rows with too few fields or that the reader could not decode
    pub skipped: usize,
    /// Rows whose `Visivel` marker was not `S`
    pub hidden: usize,
    /// Accepted rows carrying at least one unparseable date
    pub invalid_dates: usize,
}

/// Events in source order plus what was left out.
#[derive(Debug, Default, Clone)]
pub struct ParseOutcome {
    pub events: Vec<Event>,
    pub stats: ParseStats,
}

enum Row {
    Accepted(Event),
    Blank,
    TooShort(usize),
    Hidden(String),
}

/// Parse already-decoded feed text into events.
///
/// Never fails: malformed rows are skipped and invalid dates are kept as
/// `None`, which no date query matches. No de-duplication is performed.
pub fn parse(content: &str) -> ParseOutcome {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut outcome = ParseOutcome::default();

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!(row, error = %e, "skipping unreadable row");
                outcome.stats.skipped += 1;
                continue;
            }
        };

        match parse_record(&record) {
            Row::Accepted(event) => {
                if !event.has_valid_dates() {
                    debug!(row, activity = %event.activity, "row has an invalid date");
                    outcome.stats.invalid_dates += 1;
                }
                outcome.stats.accepted += 1;
                outcome.events.push(event);
            }
            Row::Blank => {}
            Row::TooShort(fields) => {
                debug!(row, fields, "skipping row with too few fields");
                outcome.stats.skipped += 1;
            }
            Row::Hidden(marker) => {
                debug!(row, marker = %marker, "skipping hidden row");
                outcome.stats.hidden += 1;
            }
        }
    }

    outcome
}

fn parse_record(record: &StringRecord) -> Row {
    if record.iter().all(str::is_empty) {
        return Row::Blank;
    }

    if record.len() < MIN_FIELDS {
        return Row::TooShort(record.len());
    }

    let field = |i: usize| unquote(record.get(i).unwrap_or_default());

    let marker = field(VISIBLE);
    if marker != VISIBLE_MARKER {
        return Row::Hidden(marker.to_string());
    }

    Row::Accepted(Event {
        activity: field(ACTIVITY).to_string(),
        product: field(PRODUCT).to_string(),
        category: field(CATEGORY).to_string(),
        module: field(MODULE).to_string(),
        start: parse_date(field(START)),
        end: parse_date(field(END)),
        order: parse_order(field(ORDER)),
        visible: true,
    })
}

/// Strip one pair of surrounding double quotes, then surrounding whitespace.
fn unquote(field: &str) -> &str {
    match field.strip_prefix('"').and_then(|f| f.strip_suffix('"')) {
        Some(inner) => inner.trim(),
        None => field,
    }
}

/// Parse `DD/MM/YYYY` by splitting on `/`.
///
/// Components are not range-checked: a month past December carries into the
/// next year and a day past the end of the month carries into the next
/// month, so `31/04/2026` is the 1st of May. Only a missing or non-numeric
/// component gives `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');

    let day = leading_int(parts.next()?)?;
    let month = leading_int(parts.next()?)?;
    let year = leading_int(parts.next()?)?;

    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let first = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;

    let offset = day.checked_sub(1)?;
    if offset >= 0 {
        first.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Optional sign followed by at least one digit; trailing text is ignored.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits_at = usize::from(text.starts_with(['-', '+']));
    let end = text[digits_at..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| i + digits_at);

    if end == digits_at {
        return None;
    }
    text[..end].parse().ok()
}

/// Parse a date typed by a user: `DD/MM/YYYY` like the feed, or ISO `YYYY-MM-DD`.
///
/// Unlike feed dates, these must name a real calendar day.
pub fn parse_user_date(text: &str) -> CalendarioResult<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|_| CalendarioError::InvalidDate(text.to_string()))
}

/// `Ordem` column: leading digits count, anything without them becomes 0.
fn parse_order(text: &str) -> i32 {
    leading_int(text)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0)
}
