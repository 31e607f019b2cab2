use std::{
    path::PathBuf,
    process::ExitCode,
};

use eframe::egui;
use pbdash::{
    config::DashboardConfig,
    dataset::{
        DashboardData,
        DatasetCache,
    },
    gui::DashboardApp,
    DashboardError,
};

const WINDOW_SIZE: [f32; 2] = [1280.0, 900.0];

fn load_config() -> Result<(DashboardConfig, PathBuf), DashboardError> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Ok((DashboardConfig::load(&path)?, path)),
        None => {
            let path = DashboardConfig::default_path();
            Ok((DashboardConfig::load_or_default(&path), path))
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, config_path) = match load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Both datasets are required; nothing is drawn without them
    let mut cache = DatasetCache::new();
    let data = match DashboardData::load(&config, &mut cache) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Failed to load datasets: {}", e);
            eprintln!("Failed to load datasets: {e}");
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title("PB Dashboard"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "pbdash",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, config_path, cache, data)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Dashboard exited with an error: {}", e);
            ExitCode::FAILURE
        }
    }
}
