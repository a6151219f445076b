//! Child registry: the ordered, uniquely-keyed collection of child profiles.
//!
//! The registry is the single owner of every child and, through each child,
//! of every transaction. All mutations go through it so uniqueness of ids and
//! ordering rules hold in one place:
//!
//! - children keep insertion order (new children are appended)
//! - transactions are newest first (new transactions are prepended)
//! - ids are generated internally and never change

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use uuid::Uuid;

use shared::{Child, CreateChildRequest, Transaction, UpdateChildRequest, DEFAULT_CHILD_NAME};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("Child already exists: {0}")]
    DuplicateChildId(Uuid),
    #[error("Transaction {transaction_id} appears more than once for child {child_id}")]
    DuplicateTransactionId { child_id: Uuid, transaction_id: Uuid },
    #[error("Child not found: {0}")]
    ChildNotFound(Uuid),
    #[error("Transaction {transaction_id} of child {child_id} has invalid amount {amount}")]
    InvalidAmount {
        child_id: Uuid,
        transaction_id: Uuid,
        amount: f64,
    },
}

/// Serialized as a bare array of children. Deserializing goes through
/// [`ChildRegistry::from_children`], so a decoded registry is always valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Child>", into = "Vec<Child>")]
pub struct ChildRegistry {
    children: Vec<Child>,
}

impl ChildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-ordered children, checking id uniqueness
    /// of children and of transactions within each child, and that every
    /// amount is finite and non-negative.
    pub fn from_children(children: Vec<Child>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(children.len());
        for child in &children {
            if !seen.insert(child.id) {
                return Err(RegistryError::DuplicateChildId(child.id));
            }
            validate_transactions(child)?;
        }
        Ok(Self { children })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Child> {
        self.children.iter()
    }

    pub fn into_children(self) -> Vec<Child> {
        self.children
    }

    pub fn get(&self, child_id: Uuid) -> Option<&Child> {
        self.children.iter().find(|c| c.id == child_id)
    }

    pub fn contains(&self, child_id: Uuid) -> bool {
        self.get(child_id).is_some()
    }

    pub fn position(&self, child_id: Uuid) -> Option<usize> {
        self.children.iter().position(|c| c.id == child_id)
    }

    /// Ids of the children at the given offsets, in registry order
    pub fn ids_at_offsets(&self, offsets: &[usize]) -> Vec<Uuid> {
        normalize_offsets(offsets, self.children.len())
            .into_iter()
            .map(|i| self.children[i].id)
            .collect()
    }

    fn get_mut(&mut self, child_id: Uuid) -> Result<&mut Child, RegistryError> {
        self.children
            .iter_mut()
            .find(|c| c.id == child_id)
            .ok_or(RegistryError::ChildNotFound(child_id))
    }

    /// Append a child to the end of the registry
    pub fn add(&mut self, child: Child) -> Result<(), RegistryError> {
        if self.contains(child.id) {
            return Err(RegistryError::DuplicateChildId(child.id));
        }
        validate_transactions(&child)?;
        info!("Added child '{}' ({})", child.name, child.id);
        self.children.push(child);
        Ok(())
    }

    /// Create a child from a request and append it. A blank name becomes
    /// "New Child"; any other name is kept verbatim.
    pub fn create_child(&mut self, request: CreateChildRequest) -> Result<&Child, RegistryError> {
        let name = if request.name.trim().is_empty() {
            DEFAULT_CHILD_NAME.to_string()
        } else {
            request.name
        };
        let child = Child::new(
            name,
            request.theme_color,
            request.avatar,
            request.avatar_data,
        );
        self.add(child)?;
        Ok(&self.children[self.children.len() - 1])
    }

    /// Remove the child with the given id, returning it if it existed
    pub fn remove(&mut self, child_id: Uuid) -> Option<Child> {
        let index = self.position(child_id)?;
        let child = self.children.remove(index);
        info!(
            "Removed child '{}' ({}) with {} transactions",
            child.name,
            child.id,
            child.transactions.len()
        );
        Some(child)
    }

    /// Remove every child at the given offsets. Out-of-range offsets are
    /// ignored and repeated offsets count once.
    pub fn remove_at_offsets(&mut self, offsets: &[usize]) -> Vec<Child> {
        let mut removed = Vec::new();
        for index in normalize_offsets(offsets, self.children.len()).into_iter().rev() {
            removed.push(self.children.remove(index));
        }
        removed.reverse();
        info!("Removed {} children by offset", removed.len());
        removed
    }

    /// Replace the mutable fields of a child in place; id and position stay
    pub fn update(
        &mut self,
        child_id: Uuid,
        request: UpdateChildRequest,
    ) -> Result<&Child, RegistryError> {
        let child = self.get_mut(child_id)?;
        if let Some(name) = request.name {
            child.name = name;
        }
        if let Some(theme_color) = request.theme_color {
            child.theme_color = theme_color;
        }
        if let Some(avatar) = request.avatar {
            child.avatar = avatar;
        }
        if let Some(avatar_data) = request.avatar_data {
            child.avatar_data = avatar_data;
        }
        debug!("Updated child {}", child_id);
        Ok(&*child)
    }

    /// Insert a transaction at the front of the child's history. The amount
    /// must be finite and non-negative.
    pub fn prepend_transaction(
        &mut self,
        child_id: Uuid,
        transaction: Transaction,
    ) -> Result<(), RegistryError> {
        validate_amount(child_id, &transaction)?;
        let child = self.get_mut(child_id)?;
        if child.transaction(transaction.id).is_some() {
            return Err(RegistryError::DuplicateTransactionId {
                child_id,
                transaction_id: transaction.id,
            });
        }
        info!(
            "Recorded {:?} of {:.2} for child {}",
            transaction.transaction_type, transaction.amount, child_id
        );
        child.transactions.insert(0, transaction);
        Ok(())
    }

    /// Remove one transaction by id. Returns `Ok(None)` when the child has no
    /// such transaction.
    pub fn remove_transaction(
        &mut self,
        child_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<Option<Transaction>, RegistryError> {
        let child = self.get_mut(child_id)?;
        let removed = child
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .map(|index| child.transactions.remove(index));
        if removed.is_some() {
            info!("Deleted transaction {} of child {}", transaction_id, child_id);
        }
        Ok(removed)
    }

    /// Remove the transactions at the given offsets of the child's history
    pub fn remove_transactions_at(
        &mut self,
        child_id: Uuid,
        offsets: &[usize],
    ) -> Result<Vec<Transaction>, RegistryError> {
        let child = self.get_mut(child_id)?;
        let mut removed = Vec::new();
        for index in normalize_offsets(offsets, child.transactions.len()).into_iter().rev() {
            removed.push(child.transactions.remove(index));
        }
        removed.reverse();
        info!("Deleted {} transactions of child {}", removed.len(), child_id);
        Ok(removed)
    }
}

impl<'a> IntoIterator for &'a ChildRegistry {
    type Item = &'a Child;
    type IntoIter = std::slice::Iter<'a, Child>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl TryFrom<Vec<Child>> for ChildRegistry {
    type Error = RegistryError;

    fn try_from(children: Vec<Child>) -> Result<Self, Self::Error> {
        Self::from_children(children)
    }
}

impl From<ChildRegistry> for Vec<Child> {
    fn from(registry: ChildRegistry) -> Self {
        registry.children
    }
}

fn validate_amount(child_id: Uuid, transaction: &Transaction) -> Result<(), RegistryError> {
    if transaction.amount.is_finite() && transaction.amount >= 0.0 {
        Ok(())
    } else {
        Err(RegistryError::InvalidAmount {
            child_id,
            transaction_id: transaction.id,
            amount: transaction.amount,
        })
    }
}

/// Unique transaction ids and valid amounts within one child
fn validate_transactions(child: &Child) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(child.transactions.len());
    for transaction in &child.transactions {
        validate_amount(child.id, transaction)?;
        if !seen.insert(transaction.id) {
            return Err(RegistryError::DuplicateTransactionId {
                child_id: child.id,
                transaction_id: transaction.id,
            });
        }
    }
    Ok(())
}

/// Sorted, deduplicated, in-range offsets
fn normalize_offsets(offsets: &[usize], len: usize) -> Vec<usize> {
    offsets
        .iter()
        .copied()
        .filter(|&i| i < len)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
