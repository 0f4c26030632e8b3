mod config;
mod core;
mod interaction;
mod rendering;
mod storage;
mod ui;

use ui::app::WildWatchApp;

fn main() {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("WildWatch — Yellowstone Wildlife Sightings")
            .with_inner_size([1180.0, 760.0])
            .with_app_id("wildwatch"),
        ..Default::default()
    };

    eframe::run_native(
        "WildWatch — Yellowstone Wildlife Sightings",
        options,
        Box::new(|cc| Box::new(WildWatchApp::new(cc))),
    )
    .expect("failed to start window");
}
