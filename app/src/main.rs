mod app;
mod config;
mod ui;

use app::KnnApp;
use config::DemoConfig;
use eframe::egui;
use knn_regression::logging;

fn main() -> eframe::Result<()> {
    logging::init("info");

    let config = DemoConfig::from_env();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("KNN Regression Demo")
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "KNN Regression Demo",
        native_options,
        Box::new(|_cc| Ok(Box::new(KnnApp::new(config)))),
    )
}
