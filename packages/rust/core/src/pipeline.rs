//! End-to-end `build` pipeline: menu → per-page outline → assemble → render → write.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use nodedocs_markdown::{NodeTypeLinker, PageShell, render_page, resolve_type_links};
use nodedocs_outline::{FetchOptions, PageFetcher, build_catalog, parse_menu};
use nodedocs_shared::{AppConfig, IndexEntry, OutputConfig, ReposConfig, Result, SourceConfig};

use crate::assembler::ContentAssembler;
use crate::index::SearchIndex;
use crate::resolver::PathResolver;
use crate::sources::{ReferenceDocs, ensure_checkout};
use crate::store::{FragmentStore, FsStore};
use crate::writer::SiteWriter;

/// Configuration for [`build_site`].
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub source: SourceConfig,
    pub repos: ReposConfig,
    pub output: OutputConfig,
    /// Extra `name -> url` type links.
    pub types: BTreeMap<String, String>,
    /// Use the checkouts on disk as they are, without cloning.
    pub skip_checkout: bool,
}

impl From<&AppConfig> for BuildConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            source: config.source.clone(),
            repos: config.repos.clone(),
            output: config.output.clone(),
            types: config.types.clone(),
            skip_checkout: false,
        }
    }
}

/// Result of a completed build.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages written.
    pub page_count: usize,
    /// Number of search index entries (menu and page entries).
    pub index_entries: usize,
    /// Location of the written search index.
    pub index_path: PathBuf,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before a page is fetched.
    fn page_started(&self, pathname: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_started(&self, _pathname: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

// ---------------------------------------------------------------------------
// Per-page processing
// ---------------------------------------------------------------------------

/// A rendered page and the index entries it contributes.
#[derive(Debug, Clone)]
pub struct BuiltPage {
    pub html: String,
    pub entries: Vec<IndexEntry>,
}

/// Turns one fetched API page into its rendered HTML.
pub struct PageBuilder<S> {
    resolver: PathResolver,
    store: S,
    reference: ReferenceDocs,
    linker: NodeTypeLinker,
    shell: PageShell,
    toc_selector: String,
    url_prefix: String,
}

impl PageBuilder<FsStore> {
    /// Builder reading fragments from the localized checkout on disk.
    pub fn from_config(config: &BuildConfig) -> Self {
        Self::with_store(config, FsStore)
    }
}

impl<S: FragmentStore> PageBuilder<S> {
    /// Builder reading fragments from `store`.
    pub fn with_store(config: &BuildConfig, store: S) -> Self {
        Self {
            resolver: PathResolver::new(&config.repos.localized_dir),
            store,
            reference: ReferenceDocs::new(
                config.repos.reference_dir.join(&config.repos.reference_api_dir),
            ),
            linker: NodeTypeLinker::new().with_custom_types(config.types.clone()),
            shell: PageShell {
                lang: config.output.lang.clone(),
                stylesheet: config.output.stylesheet.clone(),
            },
            toc_selector: config.source.toc_selector.clone(),
            url_prefix: config.output.url_prefix.clone(),
        }
    }

    /// Build the page `pathname` from its fetched HTML.
    #[instrument(skip_all, fields(page = pathname))]
    pub fn build(&self, pathname: &str, page_html: &str) -> Result<BuiltPage> {
        let outline = build_catalog(page_html, &self.toc_selector)?;
        let page_path = format!("{}{pathname}", self.url_prefix);

        let assembled =
            ContentAssembler::new(&self.resolver, &self.store).assemble(&outline, &page_path)?;
        let mut content = assembled.content;

        if let Some(tail) = self.reference.trailing_paragraph_for(pathname)? {
            content.push_str("\n\n");
            content.push_str(&tail);
        }

        let content = resolve_type_links(&content, &self.linker);
        let html = render_page(&content, &self.shell);

        Ok(BuiltPage {
            html,
            entries: assembled.entries,
        })
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Run the full `build` pipeline.
///
/// 1. Check out the localized and reference docs (unless skipped)
/// 2. Fetch the menu and seed the index with one entry per page
/// 3. For each page, in menu order: fetch, assemble, render, write
/// 4. Write the search index
///
/// The first failing page aborts the run; the index is only written when
/// every page succeeded.
#[instrument(skip_all, fields(base_uri = %config.source.base_uri))]
pub async fn build_site(
    config: &BuildConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();

    // --- Phase 1: Checkouts ---
    if config.skip_checkout {
        info!("skipping repository checkout");
    } else {
        progress.phase("Checking out localized docs");
        ensure_checkout(&config.repos.localized_url, &config.repos.localized_dir).await?;
        progress.phase("Checking out reference docs");
        ensure_checkout(&config.repos.reference_url, &config.repos.reference_dir).await?;
    }

    // --- Phase 2: Menu ---
    progress.phase("Fetching API menu");
    let fetcher = PageFetcher::new(
        &config.source.base_uri,
        &FetchOptions {
            timeout_secs: config.source.timeout_secs,
        },
    )?;
    let menu_html = fetcher.fetch_menu().await?;
    let menu = parse_menu(&menu_html, &config.source.menu_selector)?;
    info!(pages = menu.len(), "menu parsed");

    let mut index = SearchIndex::new();
    for item in &menu {
        index.push_menu(item.index_entry(
            &config.output.url_prefix,
            &config.output.menu_description_prefix,
        ));
    }

    // --- Phase 3: Pages ---
    progress.phase("Building pages");
    let builder = PageBuilder::from_config(config);
    let writer = SiteWriter::from_config(&config.output);
    let total = menu.len();

    for (i, item) in menu.iter().enumerate() {
        progress.page_started(&item.href, i + 1, total);

        let page_html = fetcher.fetch_page(&item.href).await?;
        let page = builder.build(&item.href, &page_html)?;
        writer.write_page(&item.href, &page.html)?;

        info!(page = %item.href, entries = page.entries.len(), "page built");
        index.extend_page(page.entries);
    }

    // --- Phase 4: Index ---
    progress.phase("Writing search index");
    let index_path = writer.write_index(&index)?;

    let result = BuildResult {
        page_count: total,
        index_entries: index.len(),
        index_path,
        elapsed: start.elapsed(),
    };

    info!(
        page_count = result.page_count,
        index_entries = result.index_entries,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "build complete"
    );

    progress.done(&result);
    Ok(result)
}
