// Entrypoint for the terminal client.
// - Parses options (flags or environment), sets up logging on stderr.
// - Builds the API client and session store, then hands them to the UI.

use anyhow::Context;
use clap::Parser;
use nutri_cli::{api::ApiClient, config::Config, session::SessionStore, ui::main_menu};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let api = ApiClient::from_config(&config).context("Failed to build HTTP client")?;
    let store = SessionStore::new(config.session_dir());
    tracing::debug!(base_url = api.base_url(), session_dir = %store.dir().display(), "starting");

    // Runs until the user picks "Exit".
    main_menu(api, store, &config.start)?;
    Ok(())
}
