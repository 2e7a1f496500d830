//! # Storefront Entry Point
//!
//! 1. Parse flags
//! 2. Initialize tracing (stderr)
//! 3. Hand over to `storefront_lib::run` on a current-thread runtime

use clap::Parser;

use storefront_lib::cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    storefront_lib::init_tracing();

    storefront_lib::run(args).await
}
