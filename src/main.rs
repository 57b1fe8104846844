mod analysis;
mod config;
mod db;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let (config, args) = config::Config::from_args(&args, &config::install_root())?;
    let interactive = args.len() < 2;

    let _log = logging::init(&config.log_path, !interactive);
    tracing::debug!(db = %config.db_path.display(), log = %config.log_path.display(), "starting");

    let store = db::Store::new(&config.db_path);
    let ready = store.ensure_ready();

    if interactive {
        let startup_error = ready
            .err()
            .map(|e| format!("Database unavailable: {e}"));
        run::as_tui(&store, startup_error)
    } else {
        ready?;
        run::as_cli(&args, &store)
    }
}
