use color_eyre::eyre::eyre;
use color_eyre::Result;
use eframe::egui;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use touchstick::config;
use touchstick::ui::TouchstickApp;

fn main() -> Result<()> {
    setup()?;

    let config = config::load();
    info!("Starting overlay with {:?}", config.controller);
    let options = config.controller.into_options();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title("touchstick")
        .with_inner_size([960.0, 640.0]);

    eframe::run_native(
        "touchstick",
        native_options,
        Box::new(|cc| Ok(Box::new(TouchstickApp::new(cc, options)))),
    )
    .map_err(|e| eyre!("UI terminated with error: {e}"))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
