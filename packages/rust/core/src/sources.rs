//! Documentation source checkouts and the English reference docs.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, instrument};

use nodedocs_shared::{NodeDocsError, Result};

/// Separator between Markdown blocks.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Shallow-clone `url` into `dest` unless `dest` already exists.
///
/// Returns `true` when a clone was performed. An existing directory is used
/// as-is and never updated.
#[instrument(skip_all, fields(url = %url, dest = %dest.display()))]
pub async fn ensure_checkout(url: &str, dest: &Path) -> Result<bool> {
    if dest.exists() {
        debug!("checkout already present");
        return Ok(false);
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| NodeDocsError::io(parent, e))?;
    }

    info!("cloning documentation repository");
    let output = Command::new("git")
        .args(["clone", "--depth=1", url])
        .arg(dest)
        .output()
        .await
        .map_err(|e| NodeDocsError::Git(format!("failed to run git: {e}. Is `git` installed?")))?;

    if !output.status.success() {
        return Err(NodeDocsError::Git(format!(
            "git clone {url} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(true)
}

/// The last `\n\n`-separated block of `text` (all of it when there is no separator).
pub fn trailing_paragraph(text: &str) -> &str {
    text.rsplit(BLOCK_SEPARATOR).next().unwrap_or(text)
}

/// English API docs, one Markdown file per top-level page.
#[derive(Debug, Clone)]
pub struct ReferenceDocs {
    api_dir: PathBuf,
}

impl ReferenceDocs {
    pub fn new(api_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_dir: api_dir.into(),
        }
    }

    /// Markdown file for a page, e.g. `fs.html` → `<api_dir>/fs.md`.
    pub fn path_for(&self, pathname: &str) -> PathBuf {
        self.api_dir.join(pathname.replacen(".html", ".md", 1))
    }

    /// Trailing block of the page's English doc. It holds the link
    /// reference definitions the localized fragments rely on.
    ///
    /// `None` when the page has no English counterpart.
    pub fn trailing_paragraph_for(&self, pathname: &str) -> Result<Option<String>> {
        let path = self.path_for(pathname);
        if !path.is_file() {
            debug!(path = %path.display(), "no reference doc for page");
            return Ok(None);
        }

        let text = std::fs::read_to_string(&path).map_err(|e| NodeDocsError::io(&path, e))?;
        Ok(Some(trailing_paragraph(&text).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nd-sources-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn trailing_paragraph_takes_last_block() {
        let text = "# fs\n\nbody text\n\n[`Buffer`]: buffer.html\n[`URL`]: url.html\n";
        assert_eq!(
            trailing_paragraph(text),
            "[`Buffer`]: buffer.html\n[`URL`]: url.html\n"
        );
    }

    #[test]
    fn trailing_paragraph_without_separator_is_whole_text() {
        assert_eq!(trailing_paragraph("single block"), "single block");
        assert_eq!(trailing_paragraph(""), "");
    }

    #[test]
    fn reference_path_swaps_extension() {
        let docs = ReferenceDocs::new("docs/en/doc/api");
        assert_eq!(docs.path_for("fs.html"), PathBuf::from("docs/en/doc/api/fs.md"));
        assert_eq!(
            docs.path_for("child_process.html"),
            PathBuf::from("docs/en/doc/api/child_process.md")
        );
    }

    #[test]
    fn reference_trailing_paragraph_reads_file() {
        let dir = temp_dir();
        std::fs::write(dir.join("fs.md"), "# File System\n\nIntro.\n\n[`Buffer`]: buffer.html").unwrap();

        let docs = ReferenceDocs::new(&dir);
        assert_eq!(
            docs.trailing_paragraph_for("fs.html").unwrap().as_deref(),
            Some("[`Buffer`]: buffer.html")
        );
        assert_eq!(docs.trailing_paragraph_for("missing.html").unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn existing_checkout_is_left_alone() {
        let dir = temp_dir();
        std::fs::write(dir.join("marker"), "x").unwrap();

        let cloned = ensure_checkout("https://invalid.example/repo.git", &dir)
            .await
            .unwrap();
        assert!(!cloned);
        assert!(dir.join("marker").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
