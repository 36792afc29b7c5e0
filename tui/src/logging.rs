use std::fs::OpenOptions;

use env_logger::{Env, Target};

const LOG_FILE: &str = "insurasense.log";

/// Initializes `env_logger` from `RUST_LOG` (default `info`).
///
/// Records go to a file so they never draw over the alternate screen. If the
/// file cannot be opened, logging falls back to stderr.
pub fn init() {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("cannot open {LOG_FILE}: {e}; logging to stderr"),
    }

    builder.init();
}
