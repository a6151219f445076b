use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use kidsbank_backend::domain::{child_balance, Alert, Screen};
use kidsbank_backend::logging::init_logging;
use kidsbank_backend::{initialize_backend, AppConfig};

fn main() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    init_logging(&config.log_level)?;

    let store = initialize_backend(&config, |screen: Screen| {
        debug!("Dismissed {:?}", screen);
    })?;

    let state = store.state();
    if let Some(Alert::PersistenceFailed { message }) = &state.alert {
        eprintln!("Warning: {}", message);
    }

    if state.registry.is_empty() {
        println!("No children yet.");
        return Ok(());
    }

    for child in state.registry.iter() {
        println!(
            "{:<24} {:>10.2}  ({} transactions)",
            child.name,
            child_balance(child),
            child.transactions.len()
        );
    }

    Ok(())
}
