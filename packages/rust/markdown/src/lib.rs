//! Markdown text passes for the assembled API documents.
//!
//! - [`extract_description`]: short plain-text snippet for the search index
//! - [`resolve_type_links`]: rewrites `{Type}` annotations into hyperlinks,
//!   using a [`TypeLinker`] such as [`NodeTypeLinker`]
//! - [`render_page`]: Markdown → HTML page inside the site shell

mod description;
mod render;
mod typelink;

pub use description::extract_description;
pub use render::{PageShell, render_markdown, render_page};
pub use typelink::{NodeTypeLinker, TypeLinker, resolve_type_links};
