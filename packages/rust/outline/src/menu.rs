//! Top-level API menu extraction.

use scraper::{Html, Selector};
use tracing::{debug, warn};

use nodedocs_shared::{MenuItem, NodeDocsError, Result};

/// Collect the menu anchors matched by `menu_selector`, in document order.
///
/// Anchors without an `href` cannot name a page and are skipped.
pub fn parse_menu(html: &str, menu_selector: &str) -> Result<Vec<MenuItem>> {
    let selector = Selector::parse(menu_selector).map_err(|e| {
        NodeDocsError::parse(format!("invalid menu selector '{menu_selector}': {e}"))
    })?;

    let doc = Html::parse_document(html);
    let mut items = Vec::new();

    for el in doc.select(&selector) {
        let title = el.text().collect::<String>();
        match el.value().attr("href") {
            Some(href) => items.push(MenuItem {
                title,
                href: href.to_string(),
            }),
            None => warn!(%title, "menu anchor without href, skipping"),
        }
    }

    debug!(items = items.len(), "menu parsed");
    Ok(items)
}
