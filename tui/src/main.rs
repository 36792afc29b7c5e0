use anyhow::{Context, Result};

mod app;
mod form;
mod logging;
mod ui;

fn main() -> Result<()> {
    logging::init();

    let artifacts = predictor::artifacts::load()
        .inspect_err(|e| log::error!("startup aborted: {e}"))
        .context("artifacts not found or unreadable, cannot start the predictor")?;

    app::run::run(artifacts)
}
