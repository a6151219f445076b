//! Actions accepted by the state layer.
//!
//! A front end translates user gestures into these values and hands them to
//! [`AppStore::send`](super::store::AppStore::send). Nothing here carries a
//! copy of a child: detail screens are addressed by their navigation stack
//! element and act on the registry entry the element points at.

use chrono::{DateTime, Utc};
use shared::{Avatar, ThemeColor, TransactionType};
use uuid::Uuid;

use super::navigation::StackElementId;
use super::registry::ChildRegistry;

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Home screen became visible; loads the registry from storage
    OnAppear,
    /// Result of a successful load
    ChildrenLoaded(ChildRegistry),
    /// A load or save failed; the message is shown to the guardian
    PersistenceFailed(String),

    AddChildTapped,
    AddChild(ChildFormAction),

    ChildCardTapped(Uuid),
    /// Swipe-to-delete on the home list; asks for confirmation first
    DeleteChildTapped(Vec<usize>),
    ConfirmDeletion,
    CancelDeletion,
    DismissAlert,

    NavigateBack,
    ChildDetail {
        element: StackElementId,
        action: ChildAction,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChildAction {
    AddTransactionTapped,
    AddTransaction(TransactionFormAction),
    EditChildTapped,
    EditChild(ChildFormAction),
    /// Custom avatar picked (or cleared) directly from the detail screen
    SetAvatarData(Option<Vec<u8>>),
    DeleteTransactions(Vec<usize>),
    DeleteTransaction(Uuid),
    /// Guardian confirmed deleting the child shown on this screen
    DeleteChild,
}

/// Shared by the add-child and edit-child forms
#[derive(Debug, Clone, PartialEq)]
pub enum ChildFormAction {
    SetName(String),
    SetThemeColor(ThemeColor),
    SelectAvatar(Avatar),
    SetAvatarData(Option<Vec<u8>>),
    SaveTapped,
    CancelTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionFormAction {
    SetAmount(f64),
    SetDescription(String),
    SetDate(DateTime<Utc>),
    SetType(TransactionType),
    SaveTapped,
    CancelTapped,
}
