//! Search index accumulation.

use nodedocs_shared::{IndexEntry, NodeDocsError, Result};

/// Append-only search index for one build run.
///
/// Menu entries always come first in the serialized output, followed by page
/// entries in the order pages were assembled.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    menu: Vec<IndexEntry>,
    pages: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level menu entry.
    pub fn push_menu(&mut self, entry: IndexEntry) {
        self.menu.push(entry);
    }

    /// Add the entries of one fully assembled page.
    pub fn extend_page(&mut self, entries: impl IntoIterator<Item = IndexEntry>) {
        self.pages.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.menu.len() + self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in output order.
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.menu.iter().chain(self.pages.iter())
    }

    /// Compact JSON array of all entries.
    pub fn to_json(&self) -> Result<String> {
        let entries: Vec<&IndexEntry> = self.entries().collect();
        serde_json::to_string(&entries)
            .map_err(|e| NodeDocsError::validation(format!("failed to serialize index: {e}")))
    }
}
