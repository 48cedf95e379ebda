//! Deterministic palette selection for module labels.
//!
//! A label's color depends only on its position among the sorted, unique
//! labels of the whole collection, never on render order. Every view picks
//! from its own palette with the same rule, so a module looks the same
//! everywhere in one session.

use std::collections::BTreeSet;

/// Palette used by the printed summary.
pub const PRINT_PALETTE: [&str; 8] = [
    "#8B5CF6", "#10B981", "#3B82F6", "#F59E0B", "#EF4444", "#EC4899", "#06B6D4", "#84CC16",
];

/// Index of `label` into a palette of `palette_len` entries.
///
/// Labels missing from `all_labels` sit at position -1, which wraps to the
/// last palette entry.
pub fn color_index<I, S>(label: &str, all_labels: I, palette_len: usize) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if palette_len == 0 {
        return 0;
    }

    let labels: Vec<S> = all_labels.into_iter().collect();
    let sorted: BTreeSet<&str> = labels.iter().map(|l| l.as_ref()).collect();
    let position = sorted
        .iter()
        .position(|l| *l == label)
        .map_or(-1, |i| i as i64);

    position.rem_euclid(palette_len as i64) as usize
}

/// Palette entry for `label` given the full label universe.
pub fn color_for<'p, T, I, S, const N: usize>(label: &str, all_labels: I, palette: &'p [T; N]) -> &'p T
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const { assert!(N > 0, "palette must not be empty") };
    &palette[color_index(label, all_labels, palette.len())]
}

/// Hex color of `label` in the print palette.
pub fn print_color<I, S>(label: &str, all_labels: I) -> &'static str
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    *color_for(label, all_labels, &PRINT_PALETTE)
}
