//! Percolator — main entry point.
//!
//! Process wiring only: logger, optional config file, one hardware model,
//! the operator menu loop. The machine logic lives in the library.

use std::path::Path;

use anyhow::Result;
use log::{info, warn};

use percolator::cli;
use percolator::config::SystemConfig;
use percolator::hal::HardwareApi;
use percolator::hardware::HardwareModel;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Percolator v{} — simulated coffee maker", env!("CARGO_PKG_VERSION"));

    // Optional first argument: path to a JSON config file.
    let config = match std::env::args().nth(1) {
        Some(path) => match SystemConfig::load(Path::new(&path)) {
            Ok(cfg) => {
                info!("Config loaded from {}", path);
                cfg
            }
            Err(e) => {
                warn!("Config load failed ({}), using defaults", e);
                SystemConfig::default()
            }
        },
        None => SystemConfig::default(),
    };

    let mut hw = HardwareModel::new(config);
    hw.reset();

    cli::run(&mut hw)
}
