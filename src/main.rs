//! Binary entry point: set up logging, read the configuration, and run one
//! console session over stdin and stdout.
use std::io;

use class_roster::{Config, Session};

/// Returning a `Result` bubbles up fatal problems (a bad environment
/// override, a closed terminal) instead of crashing silently. Quitting from
/// the menu returns `Ok`, so the process exits with status 0.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env()?;
    log::debug!("using data directory {}", config.data_dir.display());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&config, stdin.lock(), stdout.lock());
    session.run()
}
