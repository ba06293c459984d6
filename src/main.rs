//! Binary entry point that glues the in-memory lending desk to the TUI: read
//! the optional config, start file logging, shelve the catalog, and drive the
//! Ratatui event loop until the user exits.
use ai_library_manager::{config_path, data_dir, logging, run_app, App, Config, Library};
use anyhow::Context;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let path = config_path()?;
    let config = Config::load_from(&path).context("failed to load configuration")?;
    let _guard = logging::init(&data_dir()?.join("logs"), &config.log_level)?;

    let library = Library::seed(&config);
    info!(
        books = library.books().len(),
        required_degree = library.required_degree(),
        "Library ready"
    );

    let mut app = App::new(library);
    run_app(&mut app)
}
