// Entrypoint for the CLI application.
// - Keeps `main` small: build the API client and the store, run the
//   fetch pass, then hand both to the menu loop.
// - The initial fetch pass is fatal on failure: without the cached
//   collections there is nothing to browse.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use spacex_explorer::{api::SpacexApi, menu, store::InfoStore, ui::Ui};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let api = SpacexApi::new().context("Failed to build HTTP client")?;
    let mut store = InfoStore::new(storage_location());

    // Refresh the local cache on every start. The spinner covers the
    // four sequential API calls.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Fetching SpaceX data...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let fetched = store.fetch_all(&api);
    spinner.finish_and_clear();
    fetched.context("Could not fetch SpaceX data, check your network connection and try again")?;

    let ui = Ui::new();
    menu::run(&store, &ui)
}

/// Cache directory for the collection files, with a temp-dir fallback
/// for systems without a user cache directory.
fn storage_location() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("spacex-explorer")
}
