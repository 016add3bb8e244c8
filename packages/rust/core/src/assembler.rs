//! Page content assembly.
//!
//! Walks a page outline depth-first, resolves every node to its content
//! fragment, and concatenates headings and fragment text into one Markdown
//! document. Nodes below the top level also yield search index entries.

use tracing::{debug, instrument};

use nodedocs_markdown::extract_description;
use nodedocs_shared::{IndexEntry, OutlineNode, Result};

use crate::resolver::PathResolver;
use crate::store::FragmentStore;

/// Output of assembling one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledPage {
    /// Concatenated Markdown (headings plus fragment text).
    pub content: String,
    /// Search index entries for nodes at depth 2 and below, in document order.
    pub entries: Vec<IndexEntry>,
}

/// Assembles page content from an outline and a fragment store.
pub struct ContentAssembler<'a, S: ?Sized> {
    resolver: &'a PathResolver,
    store: &'a S,
}

impl<'a, S: FragmentStore + ?Sized> ContentAssembler<'a, S> {
    pub fn new(resolver: &'a PathResolver, store: &'a S) -> Self {
        Self { resolver, store }
    }

    /// Assemble the page whose public path is `page_path` (e.g. `docs/fs.html`).
    ///
    /// The first unresolvable fragment aborts the whole page; no partial
    /// content or entries are returned.
    #[instrument(skip_all, fields(page = page_path, top_level = outline.len()))]
    pub fn assemble(&self, outline: &[OutlineNode], page_path: &str) -> Result<AssembledPage> {
        let mut page = AssembledPage::default();
        self.assemble_level(outline, page_path, 1, &mut page)?;

        debug!(
            bytes = page.content.len(),
            entries = page.entries.len(),
            "page assembled"
        );
        Ok(page)
    }

    fn assemble_level(
        &self,
        nodes: &[OutlineNode],
        page_path: &str,
        depth: usize,
        page: &mut AssembledPage,
    ) -> Result<()> {
        for node in nodes {
            let path = self.resolver.resolve(&node.url, self.store)?;
            let text = self.store.read(&path)?;

            if depth > 1 {
                page.entries.push(IndexEntry {
                    title: node.title.clone(),
                    description: extract_description(&text),
                    path: format!("{page_path}{}", node.url),
                });
            }

            page.content.push_str(&heading(node));
            page.content.push_str(&text);
            page.content.push('\n');

            if !node.children.is_empty() {
                self.assemble_level(&node.children, page_path, depth + 1, page)?;
            }
        }
        Ok(())
    }
}

/// Section heading for `node`. Every level uses `<h2>`.
pub fn heading(node: &OutlineNode) -> String {
    format!("\n<h2 id=\"{}\">{}</h2>\n", node.anchor(), node.title)
}
