//! Month grids for the calendar views.

use chrono::{Datelike, NaiveDate};

/// Days of one month laid out Sunday-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st
    pub leading_blanks: usize,
    pub days: Vec<NaiveDate>,
}

impl MonthGrid {
    /// `None` when `year`/`month` do not name a real month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::starting_at)
    }

    fn starting_at(first: NaiveDate) -> Self {
        let days = first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .collect();

        MonthGrid {
            year: first.year(),
            month: first.month(),
            leading_blanks: first.weekday().num_days_from_sunday() as usize,
            days,
        }
    }

    /// Rows of seven cells; `None` pads before the 1st and after the last day.
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let cells: Vec<Option<NaiveDate>> = std::iter::repeat_n(None, self.leading_blanks)
            .chain(self.days.iter().copied().map(Some))
            .collect();

        cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }

    pub fn previous(&self) -> Option<Self> {
        match self.month {
            1 => MonthGrid::new(self.year - 1, 12),
            m => MonthGrid::new(self.year, m - 1),
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self.month {
            12 => MonthGrid::new(self.year + 1, 1),
            m => MonthGrid::new(self.year, m + 1),
        }
    }
}
