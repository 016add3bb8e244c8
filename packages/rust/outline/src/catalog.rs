//! Outline (table of contents) extraction.
//!
//! Turns the nested `<ul><li><a/>...<ul>...</ul></li></ul>` structure of an
//! API page into an ordered [`OutlineNode`] tree. Nothing is validated here:
//! an item without an anchor becomes a node with an empty url and title, and
//! the missing fragment surfaces later when its path cannot be resolved.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use nodedocs_shared::{NodeDocsError, OutlineNode, Result};

static ANCHOR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector"));

/// Parse a page and build the outline found under `toc_selector`.
///
/// A page without a matching container has an empty outline.
#[instrument(skip(html), fields(html_len = html.len()))]
pub fn build_catalog(html: &str, toc_selector: &str) -> Result<Vec<OutlineNode>> {
    let selector = Selector::parse(toc_selector).map_err(|e| {
        NodeDocsError::parse(format!("invalid outline selector '{toc_selector}': {e}"))
    })?;

    let doc = Html::parse_document(html);
    let lists: Vec<ElementRef<'_>> = doc.select(&selector).collect();
    if lists.is_empty() {
        debug!("no outline container on page");
    }

    let nodes = catalog_from_lists(lists);
    debug!(
        top_level = nodes.len(),
        total = nodes.iter().map(OutlineNode::subtree_len).sum::<usize>(),
        "outline built"
    );
    Ok(nodes)
}

/// Build the outline rooted at one list element.
pub fn catalog_from_list(list: ElementRef<'_>) -> Vec<OutlineNode> {
    catalog_from_lists(std::iter::once(list))
}

fn catalog_from_lists<'a>(lists: impl IntoIterator<Item = ElementRef<'a>>) -> Vec<OutlineNode> {
    lists
        .into_iter()
        .flat_map(|list| child_elements(list).filter(|el| el.value().name() == "li"))
        .map(outline_node)
        .collect()
}

/// One `<li>`: its first anchor, plus any directly nested lists as children.
fn outline_node(item: ElementRef<'_>) -> OutlineNode {
    let anchor = item.select(&ANCHOR_SEL).next();
    let url = anchor
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default()
        .to_string();
    let title = anchor
        .map(|a| a.text().collect::<String>())
        .unwrap_or_default();

    let nested = child_elements(item).filter(is_list);

    OutlineNode {
        url,
        title,
        children: catalog_from_lists(nested),
    }
}

fn child_elements(parent: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    parent.children().filter_map(ElementRef::wrap)
}

fn is_list(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "ul" | "ol")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/html")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    #[test]
    fn builds_nested_outline_from_fixture() {
        let html = load_fixture("child_process.html");
        let outline = build_catalog(&html, "#toc > ul").unwrap();

        assert_eq!(outline.len(), 1);
        let root = &outline[0];
        assert_eq!(root.url, "#child_process_child_process");
        assert_eq!(root.title, "child_process（子进程）");
        assert_eq!(root.children.len(), 2);

        let creation = &root.children[0];
        assert_eq!(creation.url, "#child_process_asynchronous_process_creation");
        assert_eq!(creation.children.len(), 2);
        assert_eq!(
            creation.children[1].title,
            "child_process.spawn(command[, args][, options])"
        );
        assert!(creation.children[1].children.is_empty());

        assert_eq!(root.children[1].url, "#child_process_class_childprocess");
    }

    #[test]
    fn preserves_sibling_order() {
        let html = r##"<div id="toc"><ul>
            <li><a href="#z">Z</a></li>
            <li><a href="#a">A</a></li>
            <li><a href="#m">M</a></li>
        </ul></div>"##;
        let outline = build_catalog(html, "#toc > ul").unwrap();
        let urls: Vec<&str> = outline.iter().map(|n| n.url.as_str()).collect();
        assert_eq!(urls, ["#z", "#a", "#m"]);
    }

    #[test]
    fn leaves_get_empty_children() {
        let html = r##"<div id="toc"><ul><li><a href="#only">Only</a></li></ul></div>"##;
        let outline = build_catalog(html, "#toc > ul").unwrap();
        assert_eq!(outline, vec![OutlineNode::leaf("#only", "Only")]);
    }

    #[test]
    fn item_without_anchor_yields_empty_node() {
        let html = r##"<div id="toc"><ul><li>plain text</li></ul></div>"##;
        let outline = build_catalog(html, "#toc > ul").unwrap();
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].url, "");
        assert_eq!(outline[0].title, "");
    }

    #[test]
    fn anchors_in_nested_lists_do_not_leak_upward() {
        let html = r##"<div id="toc"><ul>
            <li><a href="#parent">Parent</a><ul><li><a href="#child">Child</a></li></ul></li>
        </ul></div>"##;
        let outline = build_catalog(html, "#toc > ul").unwrap();
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].children, vec![OutlineNode::leaf("#child", "Child")]);
    }

    #[test]
    fn missing_container_is_empty_outline() {
        let outline = build_catalog("<html><body></body></html>", "#toc > ul").unwrap();
        assert!(outline.is_empty());
    }

    #[test]
    fn invalid_selector_is_parse_error() {
        let err = build_catalog("<html></html>", "#toc > > ul[").unwrap_err();
        assert!(matches!(err, NodeDocsError::Parse { .. }));
    }

    #[test]
    fn catalog_from_list_walks_a_single_element() {
        let doc = Html::parse_fragment(r##"<ol><li><a href="#x">X</a></li></ol>"##);
        let sel = Selector::parse("ol").unwrap();
        let list = doc.select(&sel).next().unwrap();
        assert_eq!(catalog_from_list(list), vec![OutlineNode::leaf("#x", "X")]);
    }
}
