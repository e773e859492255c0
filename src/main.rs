mod app;
mod charts;
mod color;
mod data;
mod export;
mod report;
mod state;
mod ui;

use app::MonitorApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Monitor Educativo Coquimbo 2024",
        options,
        Box::new(|_cc| Ok(Box::new(MonitorApp::new()))),
    )
}
