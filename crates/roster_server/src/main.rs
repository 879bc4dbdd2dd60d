//! Roster server entry point.
//!
//! Reads `ROSTER_*` environment configuration, starts logging and serves
//! the participant routes until the listener fails.

use roster_core::init_logging;
use roster_server::{serve_http, ServerConfig};

fn main() {
    let config = ServerConfig::from_env();

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("roster-server failed to initialize logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = serve_http(&config) {
        log::error!("event=server_exit module=main status=error error={err}");
        eprintln!("roster-server failed: {err}");
        std::process::exit(1);
    }
}
