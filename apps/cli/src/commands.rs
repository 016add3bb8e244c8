//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use nodedocs_core::pipeline::{BuildConfig, BuildResult, ProgressReporter, build_site};
use nodedocs_core::resolver::PathResolver;
use nodedocs_core::store::{FragmentStore, FsStore};
use nodedocs_markdown::extract_description;
use nodedocs_shared::{AppConfig, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// nodedocs: build the localized Node.js API documentation site.
#[derive(Parser)]
#[command(
    name = "nodedocs",
    version,
    about = "Assemble localized Node.js API docs into static pages and a search index.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.nodedocs/nodedocs.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build every API page and the search index.
    Build {
        /// Base URI of the API outline (overrides the config file).
        #[arg(long)]
        base_uri: Option<String>,

        /// Output directory (overrides `output.public_dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Use existing checkouts without cloning.
        #[arg(long)]
        skip_clone: bool,
    },

    /// Print the fragment file an outline URL resolves to.
    Resolve {
        /// Outline URL, e.g. `#fs_fs_readfile_path_options_callback`.
        fragment: String,
    },

    /// Print the search index description of a fragment file.
    Describe {
        /// Fragment Markdown file.
        file: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "nodedocs=info",
        1 => "nodedocs=debug",
        _ => "nodedocs=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Build {
            base_uri,
            out,
            skip_clone,
        } => cmd_build(config_path, base_uri, out, skip_clone).await,
        Command::Resolve { fragment } => cmd_resolve(config_path, &fragment),
        Command::Describe { file } => cmd_describe(&file),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_build(
    config_path: Option<&Path>,
    base_uri: Option<String>,
    out: Option<PathBuf>,
    skip_clone: bool,
) -> Result<()> {
    let app = resolve_config(config_path)?;

    let mut config = BuildConfig::from(&app);
    if let Some(uri) = base_uri {
        config.source.base_uri = uri;
    }
    if let Some(dir) = out {
        config.output.public_dir = dir;
    }
    config.skip_checkout = skip_clone;

    info!(
        base_uri = %config.source.base_uri,
        out = %config.output.public_dir.display(),
        skip_clone,
        "building documentation site"
    );

    let reporter = CliProgress::new();
    let result = build_site(&config, &reporter)
        .await
        .inspect_err(|_| reporter.spinner.abandon())
        .wrap_err("site build failed")?;

    println!();
    println!("  Site built successfully!");
    println!("  Pages:   {}", result.page_count);
    println!("  Entries: {}", result.index_entries);
    println!("  Index:   {}", result.index_path.display());
    println!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_resolve(config_path: Option<&Path>, fragment: &str) -> Result<()> {
    let config = resolve_config(config_path)?;
    let resolver = PathResolver::new(&config.repos.localized_dir);

    for candidate in resolver.candidates(fragment) {
        let mark = if FsStore.exists(&candidate) { "found" } else { "missing" };
        println!("  {mark:<8}{}", candidate.display());
    }

    let path = resolver.resolve(fragment, &FsStore)?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_describe(file: &Path) -> Result<()> {
    let text = FsStore.read(file)?;
    println!("{}", extract_description(&text));
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_started(&self, pathname: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Building [{current}/{total}] {pathname}"));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}
