//! Smoke billboard demo
//!
//! Composes a candle scene, tags its smoke quad as a vertical billboard and
//! walks a simulated viewer around it while world tracking comes up.
//!
//! Usage: `smoke_app [config.toml|config.ron]`

mod app;
mod config;
mod scene;

use app::SmokeApp;
use billboard_engine::config::Config;
use billboard_engine::foundation::logging;
use config::SmokeAppConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SmokeAppConfig::load_from_file(&path)?,
        None => SmokeAppConfig::default(),
    };

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting smoke billboard demo");

    let mut app = SmokeApp::new(config)?;
    match app.run() {
        Ok(summary) => {
            log::info!(
                "Finished: {:?}, {} frames processed, {} entity updates, {} degenerate",
                summary.tracking,
                summary.stats.frames_processed,
                summary.stats.entities_oriented,
                summary.stats.degenerate_skips
            );
            if let Some(yaw) = summary.final_yaw {
                log::info!("Final smoke heading {:.1} deg", yaw.to_degrees());
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Application error: {}", e);
            Err(e.into())
        }
    }
}
