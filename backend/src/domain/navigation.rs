//! Navigation stack of pushed screens.
//!
//! Each element is a [`Destination`] variant carrying its own screen state.
//! A child detail screen stores only the child's id; the child itself lives in
//! the registry, so there is exactly one writer for it.

use uuid::Uuid;

use super::forms::{ChildForm, TransactionForm};

/// Stable identity of a stack element; never reused within one stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackElementId(u64);

/// Screens and sheets the host UI can be asked to dismiss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    AddChild,
    EditChild(Uuid),
    AddTransaction(Uuid),
    ChildDetail(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChildDetailState {
    pub child_id: Uuid,
    pub add_transaction: Option<TransactionForm>,
    pub edit_child: Option<ChildForm>,
}

impl ChildDetailState {
    pub fn new(child_id: Uuid) -> Self {
        Self {
            child_id,
            add_transaction: None,
            edit_child: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    ChildDetail(ChildDetailState),
}

impl Destination {
    /// Child the screen is showing, if any
    pub fn child_id(&self) -> Option<Uuid> {
        match self {
            Destination::ChildDetail(detail) => Some(detail.child_id),
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            Destination::ChildDetail(detail) => Screen::ChildDetail(detail.child_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationStack {
    elements: Vec<(StackElementId, Destination)>,
    next_id: u64,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, destination: Destination) -> StackElementId {
        let id = StackElementId(self.next_id);
        self.next_id += 1;
        self.elements.push((id, destination));
        id
    }

    pub fn get(&self, id: StackElementId) -> Option<&Destination> {
        self.elements.iter().find(|(e, _)| *e == id).map(|(_, d)| d)
    }

    pub fn get_mut(&mut self, id: StackElementId) -> Option<&mut Destination> {
        self.elements.iter_mut().find(|(e, _)| *e == id).map(|(_, d)| d)
    }

    pub fn last(&self) -> Option<(StackElementId, &Destination)> {
        self.elements.last().map(|(id, d)| (*id, d))
    }

    pub fn ids(&self) -> Vec<StackElementId> {
        self.elements.iter().map(|(id, _)| *id).collect()
    }

    pub fn pop(&mut self) -> Option<Destination> {
        self.elements.pop().map(|(_, d)| d)
    }

    /// Remove the element and everything pushed above it
    pub fn pop_from(&mut self, id: StackElementId) -> Vec<Destination> {
        match self.elements.iter().position(|(e, _)| *e == id) {
            Some(index) => self
                .elements
                .split_off(index)
                .into_iter()
                .map(|(_, d)| d)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Drop every element showing one of the given children, returning them
    pub fn remove_children(&mut self, child_ids: &[Uuid]) -> Vec<Destination> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.elements)
            .into_iter()
            .partition(|(_, d)| d.child_id().is_some_and(|id| child_ids.contains(&id)));
        self.elements = kept;
        removed.into_iter().map(|(_, d)| d).collect()
    }

    /// Keep only elements whose child still satisfies `exists`
    pub fn retain_existing(&mut self, exists: impl Fn(Uuid) -> bool) {
        self.elements.retain(|(_, d)| d.child_id().map_or(true, &exists));
    }
}
