//! Reducer for the application state.
//!
//! `reduce` is a pure state transition: it mutates [`AppState`] in place and
//! returns the side effects the store must run. Every change to the registry
//! yields [`Effect::Persist`], so the document on disk always follows the
//! in-memory registry.

use chrono::Utc;
use log::{error, info, warn};
use shared::UpdateChildRequest;

use super::commands::{AppAction, ChildAction};
use super::forms::{ChildForm, FormEvent, TransactionForm};
use super::navigation::{ChildDetailState, Destination, Screen, StackElementId};
use super::state::{Alert, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Read the registry from storage and feed it back as `ChildrenLoaded`
    Load,
    /// Write the whole registry to storage
    Persist,
    /// Ask the host UI to close a screen or sheet
    Dismiss(Screen),
}

pub fn reduce(state: &mut AppState, action: AppAction) -> Vec<Effect> {
    match action {
        AppAction::OnAppear => vec![Effect::Load],

        AppAction::ChildrenLoaded(registry) => {
            info!("Loaded {} children", registry.len());
            state.registry = registry;
            let registry = &state.registry;
            state.path.retain_existing(|id| registry.contains(id));
            state.loaded = true;
            Vec::new()
        }

        AppAction::PersistenceFailed(message) => {
            state.alert = Some(Alert::PersistenceFailed { message });
            Vec::new()
        }

        AppAction::AddChildTapped => {
            state.add_child = Some(ChildForm::new());
            Vec::new()
        }

        AppAction::AddChild(form_action) => {
            let Some(form) = state.add_child.as_mut() else {
                warn!("Add-child action without an open form: {:?}", form_action);
                return Vec::new();
            };
            match form.reduce(form_action) {
                FormEvent::None => Vec::new(),
                FormEvent::Cancel => {
                    state.add_child = None;
                    vec![Effect::Dismiss(Screen::AddChild)]
                }
                FormEvent::Save => {
                    let Some(form) = state.add_child.take() else {
                        return Vec::new();
                    };
                    match state.registry.create_child(form.into_create_request()) {
                        Ok(_) => vec![Effect::Persist, Effect::Dismiss(Screen::AddChild)],
                        Err(e) => {
                            error!("Failed to add child: {}", e);
                            vec![Effect::Dismiss(Screen::AddChild)]
                        }
                    }
                }
            }
        }

        AppAction::ChildCardTapped(child_id) => {
            if state.registry.contains(child_id) {
                state
                    .path
                    .push(Destination::ChildDetail(ChildDetailState::new(child_id)));
            } else {
                warn!("Tapped unknown child {}", child_id);
            }
            Vec::new()
        }

        AppAction::DeleteChildTapped(offsets) => {
            let child_ids = state.registry.ids_at_offsets(&offsets);
            if child_ids.is_empty() {
                return Vec::new();
            }
            state.child_to_delete = Some(child_ids);
            state.alert = Some(Alert::ConfirmChildDeletion);
            Vec::new()
        }

        AppAction::ConfirmDeletion => {
            state.alert = None;
            let Some(child_ids) = state.child_to_delete.take() else {
                return Vec::new();
            };
            let removed = child_ids
                .iter()
                .filter(|id| state.registry.remove(**id).is_some())
                .count();
            let closed = state.path.remove_children(&child_ids);
            let mut effects = if removed > 0 {
                vec![Effect::Persist]
            } else {
                Vec::new()
            };
            effects.extend(dismissals(&closed));
            effects
        }

        AppAction::CancelDeletion | AppAction::DismissAlert => {
            state.child_to_delete = None;
            state.alert = None;
            Vec::new()
        }

        AppAction::NavigateBack => {
            state.path.pop();
            Vec::new()
        }

        AppAction::ChildDetail { element, action } => reduce_child(state, element, action),
    }
}

fn reduce_child(state: &mut AppState, element: StackElementId, action: ChildAction) -> Vec<Effect> {
    let AppState { registry, path, .. } = state;

    let Some(Destination::ChildDetail(detail)) = path.get_mut(element) else {
        warn!("Child action for missing stack element {:?}: {:?}", element, action);
        return Vec::new();
    };
    let child_id = detail.child_id;
    if !registry.contains(child_id) {
        warn!("Child action for deleted child {}", child_id);
        return Vec::new();
    }

    match action {
        ChildAction::AddTransactionTapped => {
            detail.add_transaction = Some(TransactionForm::new(Utc::now()));
            Vec::new()
        }

        ChildAction::AddTransaction(form_action) => {
            let Some(form) = detail.add_transaction.as_mut() else {
                warn!("Transaction action without an open form: {:?}", form_action);
                return Vec::new();
            };
            match form.reduce(form_action) {
                FormEvent::None => Vec::new(),
                FormEvent::Cancel => {
                    detail.add_transaction = None;
                    vec![Effect::Dismiss(Screen::AddTransaction(child_id))]
                }
                FormEvent::Save => {
                    if let Err(e) = form.validate() {
                        warn!("Rejected transaction for child {}: {}", child_id, e);
                        return Vec::new();
                    }
                    let Some(form) = detail.add_transaction.take() else {
                        return Vec::new();
                    };
                    let dismiss = Effect::Dismiss(Screen::AddTransaction(child_id));
                    match registry.prepend_transaction(child_id, form.into_transaction()) {
                        Ok(()) => vec![Effect::Persist, dismiss],
                        Err(e) => {
                            error!("Failed to record transaction: {}", e);
                            vec![dismiss]
                        }
                    }
                }
            }
        }

        ChildAction::EditChildTapped => {
            detail.edit_child = registry.get(child_id).map(ChildForm::editing);
            Vec::new()
        }

        ChildAction::EditChild(form_action) => {
            let Some(form) = detail.edit_child.as_mut() else {
                warn!("Edit action without an open form: {:?}", form_action);
                return Vec::new();
            };
            match form.reduce(form_action) {
                FormEvent::None => Vec::new(),
                FormEvent::Cancel => {
                    detail.edit_child = None;
                    vec![Effect::Dismiss(Screen::EditChild(child_id))]
                }
                FormEvent::Save => {
                    let Some(form) = detail.edit_child.take() else {
                        return Vec::new();
                    };
                    let dismiss = Effect::Dismiss(Screen::EditChild(child_id));
                    match registry.update(child_id, form.into_update_request()) {
                        Ok(_) => vec![Effect::Persist, dismiss],
                        Err(e) => {
                            error!("Failed to update child: {}", e);
                            vec![dismiss]
                        }
                    }
                }
            }
        }

        ChildAction::SetAvatarData(avatar_data) => {
            let patch = UpdateChildRequest {
                avatar_data: Some(avatar_data),
                ..Default::default()
            };
            match registry.update(child_id, patch) {
                Ok(_) => vec![Effect::Persist],
                Err(e) => {
                    error!("Failed to set avatar: {}", e);
                    Vec::new()
                }
            }
        }

        ChildAction::DeleteTransactions(offsets) => {
            match registry.remove_transactions_at(child_id, &offsets) {
                Ok(removed) if !removed.is_empty() => vec![Effect::Persist],
                Ok(_) => Vec::new(),
                Err(e) => {
                    error!("Failed to delete transactions: {}", e);
                    Vec::new()
                }
            }
        }

        ChildAction::DeleteTransaction(transaction_id) => {
            match registry.remove_transaction(child_id, transaction_id) {
                Ok(Some(_)) => vec![Effect::Persist],
                Ok(None) => {
                    warn!("Transaction {} not found for child {}", transaction_id, child_id);
                    Vec::new()
                }
                Err(e) => {
                    error!("Failed to delete transaction: {}", e);
                    Vec::new()
                }
            }
        }

        ChildAction::DeleteChild => {
            registry.remove(child_id);
            let mut closed = path.pop_from(element);
            closed.extend(path.remove_children(&[child_id]));
            let mut effects = vec![Effect::Persist];
            effects.extend(dismissals(&closed));
            effects
        }
    }
}

fn dismissals(closed: &[Destination]) -> impl Iterator<Item = Effect> + '_ {
    closed.iter().map(|d| Effect::Dismiss(d.screen()))
}
