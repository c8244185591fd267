#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Steward — admin console for user accounts.

use steward_ui::state::State;

fn main() -> eframe::Result {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 640.0])
            .with_min_inner_size([760.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Steward",
        native_options,
        Box::new(|_cc| {
            let state = State::default();
            Ok(Box::new(steward_ui::StewardApp::new(state)))
        }),
    )
}
