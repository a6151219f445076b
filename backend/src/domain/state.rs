use uuid::Uuid;

use shared::Child;

use super::balance_service::child_balance;
use super::forms::ChildForm;
use super::navigation::{ChildDetailState, Destination, NavigationStack, StackElementId};
use super::registry::ChildRegistry;

/// Alerts the host UI should present
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// "Delete Child?" confirmation for the pending deletion
    ConfirmChildDeletion,
    /// Loading or saving the registry failed; in-memory state was kept
    PersistenceFailed { message: String },
}

/// Whole application state driven by the reducer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub registry: ChildRegistry,
    pub path: NavigationStack,
    /// Children awaiting deletion confirmation
    pub child_to_delete: Option<Vec<Uuid>>,
    pub alert: Option<Alert>,
    pub add_child: Option<ChildForm>,
    /// Set once the registry has been loaded from storage
    pub loaded: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detail screen state and the child it shows
    pub fn child_detail(&self, element: StackElementId) -> Option<(&ChildDetailState, &Child)> {
        match self.path.get(element)? {
            Destination::ChildDetail(detail) => {
                let child = self.registry.get(detail.child_id)?;
                Some((detail, child))
            }
        }
    }

    pub fn balance_of(&self, child_id: Uuid) -> Option<f64> {
        self.registry.get(child_id).map(child_balance)
    }
}
