#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::sync::Arc;
use tracing::{error, info, warn};

mod clipboard;
mod config;
mod debounce;
mod dispatch;
mod lang;
mod logger;
mod position;
mod translator;
mod ui;
mod worker;

use config::Config;
use position::WindowPosition;
use translator::GoogleTranslator;

fn main() {
    let cfg = Config::load();
    logger::init(&cfg.log_level);
    info!("App starting");

    let cfg_path = Config::path();
    if cfg_path.exists() {
        info!("Config loaded from {}", cfg_path.display());
    } else if let Err(e) = cfg.save(&cfg_path) {
        warn!("Could not write default config to {}: {}", cfg_path.display(), e);
    } else {
        info!("Wrote default config to {}", cfg_path.display());
    }

    if let Err(e) = run(&cfg) {
        error!("Fatal: {:#}", e);
        std::process::exit(1);
    }
    info!("App exiting");
}

fn run(cfg: &Config) -> anyhow::Result<()> {
    let translator = GoogleTranslator::new(cfg.endpoint.clone(), cfg.request_timeout())?;
    ui::run(cfg, Arc::new(translator), WindowPosition::path())
}
