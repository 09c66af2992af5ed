//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting GridSketch");

    let result = gridsketch_app::AppConfig::load_from_env()
        .map_err(gridsketch_app::AppError::from)
        .and_then(gridsketch_app::App::run);
    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
