mod ui;

use anyhow::Context;
use gtk::glib;
use gtk::prelude::*;
use libadwaita::Application;
use tracing::{error, warn};

use community_atlas::data::APP_ID;
use community_atlas::{logging, Config};

fn main() -> glib::ExitCode {
    let (flags, args): (Vec<String>, Vec<String>) = std::env::args()
        .partition(|arg| matches!(arg.as_str(), "-v" | "--verbose"));
    logging::init(!flags.is_empty());

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            glib::ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<glib::ExitCode> {
    // reqwest and tokio timers are polled from the GTK main loop.
    let rt = tokio::runtime::Runtime::new().context("failed to start the tokio runtime")?;
    let _guard = rt.enter();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        Config::default()
    });

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(move |app| ui::build_ui(app, config.clone()));

    Ok(app.run_with_args(args))
}
