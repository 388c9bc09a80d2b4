//! Kanboard entry point
//!
//! Native: loads (or seeds) the board from `$KANBOARD_DATA_DIR`, saves it
//! back unless the stored copy was unreadable, and prints it as JSON.
//! WASM: the entry point is `kanboard::web::start`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> kanboard::Result<()> {
    use std::path::PathBuf;

    use kanboard::consts::DEFAULT_DATA_DIR;
    use kanboard::platform::{self, FileStorage};
    use kanboard::{App, Settings};

    platform::init_logging();
    log::info!("Kanboard (native) starting...");

    let dir = std::env::var_os("KANBOARD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    log::info!("Using data directory {}", dir.display());

    let storage = FileStorage::new(dir);
    let settings = Settings::load(&storage);
    let mut app = App::new(settings, Box::new(storage));
    app.restore_data();
    if app.has_unreadable_data() {
        log::warn!("Saved board is unreadable; leaving it untouched");
    } else {
        app.save_data()?;
    }

    let board = app.board();
    log::info!(
        "Board has {} columns and {} cards",
        board.columns().len(),
        board.card_count()
    );
    println!("{}", serde_json::to_string_pretty(&board.get_data())?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is kanboard::web::start, this is just to satisfy the compiler
}
