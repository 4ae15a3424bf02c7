//! Binary entry point: resolve where data lives, start file logging, open the
//! store, load the list, and drive the Ratatui event loop until the user exits.
use task_list::{init_logging, run_app, App, Config, ItemStore};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let _log_guard = init_logging(&config)?;
    info!(data_dir = %config.data_dir().display(), "starting task-list");

    let store = ItemStore::open(config.db_path())?;
    let items = store.fetch_all_items()?;
    info!(count = items.len(), "loaded todo items");

    let mut app = App::new(store, items);
    let result = run_app(&mut app);
    if let Err(err) = &result {
        tracing::error!("task-list exited with error: {err:#}");
    }
    result
}
