//! Output writing: rendered pages and the search index.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use nodedocs_shared::{NodeDocsError, OutputConfig, Result};

use crate::index::SearchIndex;

/// Writes site output under the public directory.
///
/// Every file is written to a temp sibling first and renamed into place, so
/// an interrupted build never leaves a half-written page. Existing files are
/// overwritten.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    public_dir: PathBuf,
    url_prefix: String,
    index_file: String,
}

impl SiteWriter {
    pub fn new(
        public_dir: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
        index_file: impl Into<String>,
    ) -> Self {
        Self {
            public_dir: public_dir.into(),
            url_prefix: url_prefix.into(),
            index_file: index_file.into(),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(&output.public_dir, &output.url_prefix, &output.index_file)
    }

    /// On-disk location of a page, e.g. `public/docs/fs.html`.
    pub fn page_path(&self, pathname: &str) -> PathBuf {
        self.public_dir.join(&self.url_prefix).join(pathname)
    }

    /// On-disk location of the search index.
    pub fn index_path(&self) -> PathBuf {
        self.public_dir.join(&self.index_file)
    }

    /// Write one rendered page.
    pub fn write_page(&self, pathname: &str, html: &str) -> Result<PathBuf> {
        let path = self.page_path(pathname);
        write_atomic(&path, html)?;
        debug!(path = %path.display(), bytes = html.len(), "page written");
        Ok(path)
    }

    /// Write the search index as a compact JSON array.
    #[instrument(skip_all, fields(entries = index.len()))]
    pub fn write_index(&self, index: &SearchIndex) -> Result<PathBuf> {
        let path = self.index_path();
        write_atomic(&path, &index.to_json()?)?;
        info!(path = %path.display(), "search index written");
        Ok(path)
    }
}

fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let dir = target
        .parent()
        .ok_or_else(|| NodeDocsError::validation(format!("no parent directory: {}", target.display())))?;
    std::fs::create_dir_all(dir).map_err(|e| NodeDocsError::io(dir, e))?;

    let file_name = target
        .file_name()
        .ok_or_else(|| NodeDocsError::validation(format!("no file name: {}", target.display())))?;
    let temp = dir.join(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, content).map_err(|e| NodeDocsError::io(&temp, e))?;
    std::fs::rename(&temp, target).map_err(|e| NodeDocsError::io(target, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodedocs_shared::IndexEntry;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nd-writer-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn pages_land_under_url_prefix() {
        let dir = temp_dir();
        let writer = SiteWriter::new(&dir, "docs/", "indexes.json");

        let path = writer.write_page("fs.html", "<p>fs</p>").unwrap();
        assert_eq!(path, dir.join("docs/fs.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>fs</p>");
        assert!(!dir.join("docs/.fs.html.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn existing_page_is_overwritten() {
        let dir = temp_dir();
        let writer = SiteWriter::new(&dir, "docs/", "indexes.json");

        writer.write_page("fs.html", "old").unwrap();
        writer.write_page("fs.html", "new").unwrap();
        assert_eq!(std::fs::read_to_string(dir.join("docs/fs.html")).unwrap(), "new");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn index_is_written_as_compact_json() {
        let dir = temp_dir();
        let writer = SiteWriter::new(&dir, "docs/", "indexes.json");
        let mut index = SearchIndex::new();
        index.push_menu(IndexEntry {
            title: "fs".into(),
            description: "目录: fs".into(),
            path: "docs/fs.html".into(),
        });

        let path = writer.write_index(&index).unwrap();
        assert_eq!(path, dir.join("indexes.json"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains('\n'));
        let parsed: Vec<IndexEntry> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].path, "docs/fs.html");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
