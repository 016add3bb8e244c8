//! nodedocs CLI: builds the localized Node.js API documentation site.
//!
//! Fetches the API outline, stitches translated fragments into one page per
//! module, and writes the pages plus a client-side search index.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
