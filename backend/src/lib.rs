//! # KidsBank Backend
//!
//! Core of the KidsBank allowance ledger. A front end drives it by sending
//! [`domain::AppAction`]s into an [`domain::AppStore`] and rendering the
//! resulting [`domain::AppState`]. This crate:
//! - Keeps the child registry and derives balances from it
//! - Persists the registry as a JSON document after every change
//! - Reports load and save failures instead of swallowing them
//! - Has no UI dependencies; navigation is reported through a [`domain::Navigator`]

use anyhow::Result;
use log::{error, info};

pub mod config;
pub mod domain;
pub mod logging;
pub mod storage;

pub use config::AppConfig;
pub use storage::JsonRegistryRepository;

use domain::{AppAction, AppStore, Navigator};

/// Build a store backed by the configured JSON document and load the
/// registry into it.
///
/// A failed load does not fail start-up: the store is returned with an empty
/// registry and a persistence alert set, so the host can show the error.
pub fn initialize_backend<N: Navigator>(
    config: &AppConfig,
    navigator: N,
) -> Result<AppStore<JsonRegistryRepository, N>> {
    let connection = config.connection();
    connection.ensure_base_directory()?;
    info!(
        "Using registry file {}",
        connection.registry_file_path().display()
    );

    let repository = JsonRegistryRepository::with_format(connection, config.document_format);
    let mut store = AppStore::new(repository, navigator);
    if let Err(e) = store.send(AppAction::OnAppear) {
        error!("Starting with an empty registry: {}", e);
    }
    Ok(store)
}
