//! Stacks that receive removed nails
//!
//! Each stack holds nails of a single type up to a fixed capacity. A push
//! that fills a stack clears it in the same call, so a stack is never
//! observed full.

use serde::Serialize;

use super::nail::{Nail, NailId, NailType};

/// Outcome of offering a removed nail to the stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PlacementResult {
    /// The nail went into the stack at `stack`; `cleared` is true if that
    /// push filled the stack and emptied it
    Placed { stack: usize, cleared: bool },

    /// No stack would take the nail
    Rejected,
}

impl PlacementResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementResult::Placed { .. })
    }
}

/// A capacity-bounded, type-homogeneous stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stack {
    capacity: usize,
    items: Vec<NailId>,
    accepted_type: Option<NailType>,
}

impl Stack {
    /// Creates an empty stack
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
            accepted_type: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Nails currently on the stack, bottom first
    pub fn items(&self) -> &[NailId] {
        &self.items
    }

    /// The type this stack takes, unset while empty
    pub fn accepted_type(&self) -> Option<NailType> {
        self.accepted_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if the nail may be pushed onto this stack
    pub fn can_accept(&self, nail: &Nail) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }
        match self.accepted_type {
            None => true,
            Some(t) => t == nail.nail_type,
        }
    }

    /// Pushes a nail, clearing the stack if it reaches capacity
    ///
    /// Returns `None` if the stack cannot accept the nail, otherwise whether
    /// the push cleared the stack.
    fn push(&mut self, nail: &Nail) -> Option<bool> {
        if !self.can_accept(nail) {
            return None;
        }

        self.items.push(nail.id);
        self.accepted_type = Some(nail.nail_type);

        if self.items.len() >= self.capacity {
            self.clear();
            return Some(true);
        }
        Some(false)
    }

    fn clear(&mut self) {
        self.items.clear();
        self.accepted_type = None;
    }
}

/// The ordered collection of stacks for a level
///
/// Placement is first-fit in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stacks {
    capacity: usize,
    stacks: Vec<Stack>,
}

impl Stacks {
    /// Creates a collection holding one empty stack
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            stacks: vec![Stack::new(capacity)],
        }
    }

    /// Capacity given to every stack in this collection
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the stack at `index` exists and would take the nail
    pub fn can_accept(&self, index: usize, nail: &Nail) -> bool {
        self.stacks
            .get(index)
            .map(|stack| stack.can_accept(nail))
            .unwrap_or(false)
    }

    /// Places a nail into the first stack that accepts it
    pub fn try_place(&mut self, nail: &Nail) -> PlacementResult {
        for (index, stack) in self.stacks.iter_mut().enumerate() {
            if let Some(cleared) = stack.push(nail) {
                return PlacementResult::Placed {
                    stack: index,
                    cleared,
                };
            }
        }
        PlacementResult::Rejected
    }

    /// Appends an empty stack and returns its index
    pub fn add_stack(&mut self) -> usize {
        self.stacks.push(Stack::new(self.capacity));
        self.stacks.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Stack> {
        self.stacks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter()
    }

    pub fn as_slice(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
