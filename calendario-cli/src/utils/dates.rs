use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM`, defaulting to the current month.
pub fn parse_month(arg: Option<&str>) -> Result<(i32, u32)> {
    let Some(arg) = arg else {
        let today = today();
        return Ok((today.year(), today.month()));
    };

    let (year, month) = arg
        .trim()
        .split_once('-')
        .with_context(|| format!("Invalid month '{arg}'. Expected YYYY-MM"))?;

    let year = year.parse().with_context(|| format!("Invalid year in '{arg}'"))?;
    let month: u32 = month.parse().with_context(|| format!("Invalid month in '{arg}'"))?;

    if !(1..=12).contains(&month) {
        anyhow::bail!("Invalid month '{arg}'. Month must be between 01 and 12");
    }

    Ok((year, month))
}
