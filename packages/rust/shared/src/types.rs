//! Core domain types for the documentation outline and search index.

use serde::{Deserialize, Serialize};

/// Maximum number of characters kept in an [`IndexEntry`] description.
pub const DESCRIPTION_MAX_CHARS: usize = 50;

/// Menu title that is never shortened (it contains the `-` separator itself).
const UNSPLIT_MENU_TITLE: &str = "N-API";

// ---------------------------------------------------------------------------
// OutlineNode
// ---------------------------------------------------------------------------

/// One entry of a page's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// In-page fragment, including its leading `#` (e.g. `#fs_fs_readfile_path_options_callback`).
    pub url: String,
    /// Display text of the outline anchor.
    pub title: String,
    /// Nested entries, in document order. Empty for leaves.
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node.
    pub fn leaf(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn branch(
        url: impl Into<String>,
        title: impl Into<String>,
        children: Vec<OutlineNode>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            children,
        }
    }

    /// The fragment with its leading delimiter removed, used as the heading anchor.
    pub fn anchor(&self) -> &str {
        let mut chars = self.url.chars();
        chars.next();
        chars.as_str()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::subtree_len).sum::<usize>()
    }
}

// ---------------------------------------------------------------------------
// IndexEntry
// ---------------------------------------------------------------------------

/// One row of the client-side search index (`indexes.json`).
///
/// Field names are kept to a single letter on disk to keep the index small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "d")]
    pub description: String,
    #[serde(rename = "p")]
    pub path: String,
}

// ---------------------------------------------------------------------------
// MenuItem
// ---------------------------------------------------------------------------

/// A top-level API page as listed in the site menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Anchor text, e.g. `File System - 文件系统`.
    pub title: String,
    /// Page name relative to the base URI, e.g. `fs.html`.
    pub href: String,
}

impl MenuItem {
    /// Title shown in search results: the text before the first `-`, trimmed.
    pub fn short_title(&self) -> &str {
        if self.title == UNSPLIT_MENU_TITLE {
            return &self.title;
        }
        self.title.split('-').next().unwrap_or("").trim()
    }

    /// Build this menu item's search index entry.
    pub fn index_entry(&self, url_prefix: &str, description_prefix: &str) -> IndexEntry {
        IndexEntry {
            title: self.short_title().to_string(),
            description: format!("{description_prefix}{}", self.title),
            path: format!("{url_prefix}{}", self.href),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_strips_leading_delimiter() {
        let node = OutlineNode::leaf("#fs_file_system", "File System");
        assert_eq!(node.anchor(), "fs_file_system");

        let empty = OutlineNode::leaf("", "Broken");
        assert_eq!(empty.anchor(), "");
    }

    #[test]
    fn subtree_len_counts_all_descendants() {
        let tree = OutlineNode::branch(
            "#a",
            "A",
            vec![
                OutlineNode::branch("#a_b", "B", vec![OutlineNode::leaf("#a_b_c", "C")]),
                OutlineNode::leaf("#a_d", "D"),
            ],
        );
        assert_eq!(tree.subtree_len(), 4);
    }

    #[test]
    fn index_entry_uses_short_keys() {
        let entry = IndexEntry {
            title: "fs.readFile".into(),
            description: "异步地读取文件".into(),
            path: "docs/fs.html#fs_fs_readfile".into(),
        };
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(
            json,
            r##"{"t":"fs.readFile","d":"异步地读取文件","p":"docs/fs.html#fs_fs_readfile"}"##
        );
    }

    #[test]
    fn menu_short_title_splits_on_dash() {
        let item = MenuItem {
            title: "File System - 文件系统".into(),
            href: "fs.html".into(),
        };
        assert_eq!(item.short_title(), "File System");

        let napi = MenuItem {
            title: "N-API".into(),
            href: "n-api.html".into(),
        };
        assert_eq!(napi.short_title(), "N-API");
    }

    #[test]
    fn menu_index_entry_layout() {
        let item = MenuItem {
            title: "Buffer - 缓冲器".into(),
            href: "buffer.html".into(),
        };
        let entry = item.index_entry("docs/", "目录: ");
        assert_eq!(entry.title, "Buffer");
        assert_eq!(entry.description, "目录: Buffer - 缓冲器");
        assert_eq!(entry.path, "docs/buffer.html");
    }
}
