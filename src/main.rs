mod app;
mod config;
mod form;
mod logging;
mod model;
mod theme;
mod ui;
mod validate;
mod widgets;

use anyhow::Result;

fn main() -> Result<()> {
    logging::init_logging(&logging::LogConfig::from_env())?;
    ui::run()
}
