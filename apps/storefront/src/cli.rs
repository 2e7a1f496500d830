//! Command-line flags. Each one overrides its `STOREFRONT_*` variable.

use clap::Parser;
use std::path::PathBuf;

/// Storefront with a persistent cart and zoomable product previews
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Catalog JSON file [env: STOREFRONT_CATALOG] [default: product.json]
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// SQLite file holding the saved cart [env: STOREFRONT_DB_PATH]
    #[arg(long, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Products per "load more" step [env: STOREFRONT_PAGE_SIZE] [default: 6]
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,
}
