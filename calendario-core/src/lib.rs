//! Core engine for the academic calendar feed.
//!
//! This crate turns the `;`-delimited calendar export into events and answers
//! the questions every view asks of them:
//! - `parse` / `load` for reading the feed
//! - `query` for date-range membership and the active academic period
//! - `filter` for product/module/category facets
//! - `color` for stable per-module palette entries
//! - `report` for the grouped display order used by the printed summary

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod grid;
pub mod load;
pub mod parse;
pub mod query;
pub mod report;
pub mod session;

pub use event::{CalendarDay, Event};
pub use filter::{Facet, FacetSelection};
pub use session::{Session, Snapshot};
