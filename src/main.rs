//! Entry point for the timeline ruler demo window.

use eframe::egui;
use timeruler::config::{self, RulerSettings};
use timeruler::egui_app::ui::{MIN_VIEWPORT_SIZE, TimelineApp};
use timeruler::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let mut settings = load_settings();
    if host_bridge_requested() {
        settings.host_bridge = true;
    }
    logging::log_startup_context(&settings);

    let viewport = egui::ViewportBuilder::default()
        .with_title("Timeline Ruler")
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([1280.0, 480.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "timeruler",
        native_options,
        Box::new(move |_cc| Ok(Box::new(TimelineApp::new(settings)))),
    )?;
    Ok(())
}

fn load_settings() -> RulerSettings {
    match config::load_or_default() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Using default settings: {err}");
            RulerSettings::default()
        }
    }
}

fn host_bridge_requested() -> bool {
    std::env::args_os().any(|arg| arg == "--host-bridge")
}
