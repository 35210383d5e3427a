use clockface::{Clock, ConfigFile};
use log::error;
use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        error!("{err}");
        process::exit(1);
    }
}

/// `clockface [CONFIG.toml]`
fn run() -> clockface::Result<()> {
    let file = match env::args().nth(1) {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    Clock::new(Some(file.clock)).with_window(file.window).show()
}
