//! Outline URL → content fragment path resolution.
//!
//! An outline URL such as `#fs_fs_readfile_path_options_callback` names the
//! fragment `fs/fs_readfile_path_options_callback.md` under the content root.
//! Category directories may themselves contain the `_` delimiter
//! (`child_process`), so several candidate layouts are tried in order.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use nodedocs_shared::{NodeDocsError, Result};

use crate::store::FragmentStore;

/// Separator between URL segments.
const DELIMITER: char = '_';

/// One way of mapping URL segments to `(directory, file stem)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRule {
    /// `s0/s1_..._sN.md`; `#n_api_*` maps to the `n-api` directory.
    Primary,
    /// `s0_s1/s2_..._sN.md`, for categories whose name contains the delimiter.
    JoinedCategory,
}

impl PathRule {
    /// Rules tried by [`PathResolver::new`], in order.
    pub const DEFAULT: [PathRule; 2] = [PathRule::Primary, PathRule::JoinedCategory];

    /// Directory and file stem for `segments`, if this rule applies.
    pub fn candidate(self, segments: &[&str]) -> Option<(String, String)> {
        match self {
            PathRule::Primary => match segments {
                ["n", "api", rest @ ..] => Some(("n-api".to_string(), join(rest))),
                [dir, rest @ ..] => Some(((*dir).to_string(), join(rest))),
                [] => None,
            },
            PathRule::JoinedCategory => match segments {
                [first, second, rest @ ..] => {
                    Some((format!("{first}{DELIMITER}{second}"), join(rest)))
                }
                _ => None,
            },
        }
    }
}

fn join(segments: &[&str]) -> String {
    segments.join(&DELIMITER.to_string())
}

/// Resolves outline URLs to fragment paths under a content root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    rules: Vec<PathRule>,
}

impl PathResolver {
    /// Resolver with the default rule order.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_rules(root, PathRule::DEFAULT.to_vec())
    }

    /// Resolver with a custom rule order.
    pub fn with_rules(root: impl Into<PathBuf>, rules: Vec<PathRule>) -> Self {
        Self {
            root: root.into(),
            rules,
        }
    }

    /// The content root all candidates live under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every candidate path for `url`, in the order they are tried.
    pub fn candidates(&self, url: &str) -> Vec<PathBuf> {
        let fragment = strip_leading_delimiter(url);
        let segments: Vec<&str> = fragment.split(DELIMITER).collect();

        self.rules
            .iter()
            .filter_map(|rule| rule.candidate(&segments))
            .map(|(dir, stem)| self.root.join(dir).join(format!("{stem}.md")))
            .collect()
    }

    /// The first candidate for `url` that exists in `store`.
    ///
    /// Fails with [`NodeDocsError::ContentIntegrity`] naming the last path
    /// tried when no candidate exists.
    pub fn resolve<S: FragmentStore + ?Sized>(&self, url: &str, store: &S) -> Result<PathBuf> {
        let candidates = self.candidates(url);

        for path in &candidates {
            if store.exists(path) {
                trace!(url, path = %path.display(), "fragment resolved");
                return Ok(path.clone());
            }
            debug!(url, path = %path.display(), "candidate fragment missing");
        }

        let last = candidates
            .last()
            .cloned()
            .unwrap_or_else(|| self.root.clone());
        Err(NodeDocsError::content_integrity(url, last))
    }
}

/// Drop the first character (the `#` of an in-page fragment).
fn strip_leading_delimiter(url: &str) -> &str {
    let mut chars = url.chars();
    chars.next();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn resolver() -> PathResolver {
        PathResolver::new("docs/cn")
    }

    #[test]
    fn primary_rule_splits_first_segment() {
        let store = MemoryStore::new().with("docs/cn/fs/fs_readfile_path.md", "");
        let path = resolver().resolve("#fs_fs_readfile_path", &store).unwrap();
        assert_eq!(path, PathBuf::from("docs/cn/fs/fs_readfile_path.md"));
    }

    #[test]
    fn n_api_special_case() {
        let store = MemoryStore::new().with("docs/cn/n-api/napi_create_array.md", "");
        let path = resolver()
            .resolve("#n_api_napi_create_array", &store)
            .unwrap();
        assert_eq!(path, PathBuf::from("docs/cn/n-api/napi_create_array.md"));
    }

    #[test]
    fn falls_back_to_joined_category() {
        let store = MemoryStore::new().with("docs/cn/child_process/spawn.md", "");
        let path = resolver().resolve("#child_process_spawn", &store).unwrap();
        assert_eq!(path, PathBuf::from("docs/cn/child_process/spawn.md"));
    }

    #[test]
    fn primary_wins_when_both_exist() {
        let store = MemoryStore::new()
            .with("docs/cn/child/process_spawn.md", "")
            .with("docs/cn/child_process/spawn.md", "");
        let path = resolver().resolve("#child_process_spawn", &store).unwrap();
        assert_eq!(path, PathBuf::from("docs/cn/child/process_spawn.md"));
    }

    #[test]
    fn missing_everywhere_is_content_integrity_error() {
        let store = MemoryStore::new();
        let err = resolver()
            .resolve("#child_process_spawn", &store)
            .unwrap_err();
        match err {
            NodeDocsError::ContentIntegrity { url, path } => {
                assert_eq!(url, "#child_process_spawn");
                assert_eq!(path, PathBuf::from("docs/cn/child_process/spawn.md"));
            }
            other => panic!("expected ContentIntegrity, got {other:?}"),
        }
    }

    #[test]
    fn candidates_are_ordered() {
        let candidates = resolver().candidates("#child_process_spawn");
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("docs/cn/child/process_spawn.md"),
                PathBuf::from("docs/cn/child_process/spawn.md"),
            ]
        );
    }

    #[test]
    fn single_segment_has_only_primary_candidate() {
        let candidates = resolver().candidates("#timers");
        assert_eq!(candidates, vec![PathBuf::from("docs/cn/timers/.md")]);
    }

    #[test]
    fn custom_rule_order() {
        let resolver = PathResolver::with_rules("root", vec![PathRule::JoinedCategory]);
        let store = MemoryStore::new()
            .with("root/child/process_spawn.md", "")
            .with("root/child_process/spawn.md", "");
        let path = resolver.resolve("#child_process_spawn", &store).unwrap();
        assert_eq!(path, PathBuf::from("root/child_process/spawn.md"));
    }
}
