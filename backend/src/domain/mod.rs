//! # Domain Module
//!
//! Business logic of the allowance ledger, independent of any UI framework
//! or storage mechanism.
//!
//! ## Module Organization
//!
//! - **registry**: the ordered, uniquely-keyed collection of children and all
//!   child/transaction mutations
//! - **balance_service**: balance derivation (income minus outcome)
//! - **transaction_history**: month-grouped view of a child's history
//! - **commands**: actions a front end sends into the state layer
//! - **forms**: add-child, edit-child and add-transaction form state
//! - **navigation**: stack of pushed screens, each a tagged destination
//! - **state** / **reducer** / **store**: unidirectional state management;
//!   the reducer mutates state and returns effects, the store runs them
//!   against explicit persistence and navigation ports
//!
//! ## Business Rules
//!
//! - A child created with a blank name is called "New Child"
//! - New transactions go to the front of a child's history
//! - A transaction is recorded only with a positive amount
//! - Balances are derived on every read and never stored
//! - Every registry change is persisted

pub mod balance_service;
pub mod commands;
pub mod forms;
pub mod navigation;
pub mod reducer;
pub mod registry;
pub mod state;
pub mod store;
pub mod transaction_history;

pub use balance_service::*;
pub use commands::*;
pub use forms::{ChildForm, FormError, FormEvent, TransactionForm};
pub use navigation::{ChildDetailState, Destination, NavigationStack, Screen, StackElementId};
pub use reducer::{reduce, Effect};
pub use registry::{ChildRegistry, RegistryError};
pub use state::{Alert, AppState};
pub use store::{AppStore, Navigator, StoreError};
pub use transaction_history::{group_by_month, MonthGroup};
