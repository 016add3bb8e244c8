//! Remote outline retrieval and parsing.
//!
//! The API site exposes two kinds of pages this crate understands:
//! - the index page, whose menu lists every top-level API page ([`parse_menu`])
//! - each API page, whose table of contents is a nested `<ul>` ([`build_catalog`])
//!
//! [`PageFetcher`] downloads both over HTTP.

mod catalog;
mod fetch;
mod menu;

pub use catalog::{build_catalog, catalog_from_list};
pub use fetch::{FetchOptions, PageFetcher};
pub use menu::parse_menu;
