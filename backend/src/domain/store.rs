//! Store: owns the [`AppState`], runs the reducer and executes its effects.
//!
//! Collaborators are passed in explicitly: a [`RegistryStorage`] port for
//! persistence and a [`Navigator`] that the host UI implements to close
//! screens. Effects run synchronously in the order they were issued; actions
//! produced by effects (load results, persistence failures) are queued and
//! reduced before `send` returns.

use log::{debug, error};
use std::collections::VecDeque;

use crate::storage::{RegistryStorage, StorageError};

use super::commands::AppAction;
use super::navigation::Screen;
use super::reducer::{reduce, Effect};
use super::state::AppState;

/// Navigation-completion callback implemented by the host UI
pub trait Navigator {
    fn dismiss(&self, screen: Screen);
}

impl<F: Fn(Screen)> Navigator for F {
    fn dismiss(&self, screen: Screen) {
        self(screen)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to load children: {0}")]
    Load(#[source] StorageError),
    #[error("Failed to save children: {0}")]
    Save(#[source] StorageError),
}

pub struct AppStore<S, N> {
    state: AppState,
    storage: S,
    navigator: N,
}

impl<S: RegistryStorage, N: Navigator> AppStore<S, N> {
    pub fn new(storage: S, navigator: N) -> Self {
        Self::with_state(AppState::new(), storage, navigator)
    }

    pub fn with_state(state: AppState, storage: S, navigator: N) -> Self {
        Self {
            state,
            storage,
            navigator,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reduce `action` and run every resulting effect.
    ///
    /// A failed load or save is logged, raised as an alert in state and
    /// returned; the in-memory state is kept as it is. When several effects
    /// fail, the first failure is returned.
    pub fn send(&mut self, action: AppAction) -> Result<(), StoreError> {
        let mut queue = VecDeque::from([action]);
        let mut first_error = None;

        while let Some(action) = queue.pop_front() {
            debug!("Reducing {:?}", action);
            for effect in reduce(&mut self.state, action) {
                match effect {
                    Effect::Load => match self.storage.load() {
                        Ok(registry) => queue.push_back(AppAction::ChildrenLoaded(registry)),
                        Err(e) => {
                            error!("Failed to load children: {}", e);
                            queue.push_back(AppAction::PersistenceFailed(e.to_string()));
                            first_error.get_or_insert(StoreError::Load(e));
                        }
                    },
                    Effect::Persist => {
                        if let Err(e) = self.storage.save(&self.state.registry) {
                            error!("Failed to save children: {}", e);
                            queue.push_back(AppAction::PersistenceFailed(e.to_string()));
                            first_error.get_or_insert(StoreError::Save(e));
                        }
                    }
                    Effect::Dismiss(screen) => self.navigator.dismiss(screen),
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
