//! Level definition
//!
//! A level is static configuration: the nail set, cosmetic positions,
//! dependency lists, type tags and the stack capacity. Nothing here changes
//! while a level is played; the live state lives in [`Session`](super::Session).

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use thiserror::Error;

use super::nail::{NailId, NailType};

#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("Level number must be positive")]
    InvalidNumber,

    #[error("Level {0} has a stack capacity of zero")]
    ZeroCapacity(u32),

    #[error("Level {0} has no nails")]
    Empty(u32),

    #[error("Nail {0} has no type")]
    MissingType(NailId),

    #[error("Nail {0} is referenced but has no position")]
    UnknownNail(NailId),

    #[error("Nail {nail} depends on unknown nail {dependency}")]
    UnknownDependency { nail: NailId, dependency: NailId },

    #[error("Dependency cycle between nails {}", join_ids(.0))]
    Cycle(Vec<NailId>),
}

fn join_ids(ids: &[NailId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cosmetic grid coordinates of a nail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// Static description of one puzzle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    /// Level number (positive)
    pub number: u32,

    /// Human-readable title
    pub description: String,

    /// Grid size used for rendering
    pub width: u16,
    pub height: u16,

    /// Capacity of every stack in this level
    pub stack_capacity: usize,

    /// Nail positions; the key set is the level's nail set
    pub positions: BTreeMap<NailId, Position>,

    /// Nail -> nails that must be removed first
    pub dependencies: BTreeMap<NailId, Vec<NailId>>,

    pub types: BTreeMap<NailId, NailType>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub descriptions: BTreeMap<NailId, String>,
}

impl Level {
    /// Creates an empty level
    pub fn new(number: u32, description: impl Into<String>, stack_capacity: usize) -> Self {
        Self {
            number,
            description: description.into(),
            width: 0,
            height: 0,
            stack_capacity,
            positions: BTreeMap::new(),
            dependencies: BTreeMap::new(),
            types: BTreeMap::new(),
            descriptions: BTreeMap::new(),
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Adds a nail at a position with a type
    pub fn nail(mut self, id: u32, (x, y): (u16, u16), nail_type: NailType) -> Self {
        self.add_nail(NailId::new(id), Position { x, y }, nail_type);
        self
    }

    /// Declares that `id` can only be removed after every nail in `deps`
    pub fn depends_on(mut self, id: u32, deps: &[u32]) -> Self {
        self.add_dependencies(NailId::new(id), deps.iter().copied().map(NailId::new));
        self
    }

    pub fn describe(mut self, id: u32, description: impl Into<String>) -> Self {
        self.set_description(NailId::new(id), description);
        self
    }

    pub fn add_nail(&mut self, id: NailId, position: Position, nail_type: NailType) {
        self.positions.insert(id, position);
        self.types.insert(id, nail_type);
    }

    pub fn add_dependencies(&mut self, id: NailId, deps: impl IntoIterator<Item = NailId>) {
        self.dependencies.entry(id).or_default().extend(deps);
    }

    pub fn set_description(&mut self, id: NailId, description: impl Into<String>) {
        self.descriptions.insert(id, description.into());
    }

    /// Nail IDs in ascending order
    pub fn nail_ids(&self) -> impl Iterator<Item = NailId> + '_ {
        self.positions.keys().copied()
    }

    pub fn nail_count(&self) -> usize {
        self.positions.len()
    }

    pub fn dependencies_of(&self, id: NailId) -> &[NailId] {
        self.dependencies.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn description_of(&self, id: NailId) -> Option<&str> {
        self.descriptions.get(&id).map(String::as_str)
    }

    pub fn position_of(&self, id: NailId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    /// Checks that the level is well formed
    ///
    /// Every referenced nail must have a position, every positioned nail
    /// must have a type, and the dependency relation must be acyclic.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.number == 0 {
            return Err(LevelError::InvalidNumber);
        }
        if self.stack_capacity == 0 {
            return Err(LevelError::ZeroCapacity(self.number));
        }
        if self.positions.is_empty() {
            return Err(LevelError::Empty(self.number));
        }

        for id in self.positions.keys() {
            if !self.types.contains_key(id) {
                return Err(LevelError::MissingType(*id));
            }
        }

        let stray = self
            .types
            .keys()
            .chain(self.descriptions.keys())
            .chain(self.dependencies.keys())
            .find(|id| !self.positions.contains_key(*id));
        if let Some(id) = stray {
            return Err(LevelError::UnknownNail(*id));
        }

        for (nail, deps) in &self.dependencies {
            if let Some(dependency) = deps.iter().find(|d| !self.positions.contains_key(*d)) {
                return Err(LevelError::UnknownDependency {
                    nail: *nail,
                    dependency: *dependency,
                });
            }
        }

        match self.find_cycle() {
            Some(cycle) => Err(LevelError::Cycle(cycle)),
            None => Ok(()),
        }
    }

    /// Returns the nails of one dependency cycle, if any exists
    fn find_cycle(&self) -> Option<Vec<NailId>> {
        let mut graph = DiGraphMap::<NailId, ()>::new();
        for id in self.positions.keys() {
            graph.add_node(*id);
        }
        for (nail, deps) in &self.dependencies {
            for dep in deps {
                graph.add_edge(*dep, *nail, ());
            }
        }

        tarjan_scc(&graph)
            .into_iter()
            .find(|component| {
                component.len() > 1 || graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let sorted: BTreeSet<NailId> = component.into_iter().collect();
                sorted.into_iter().collect()
            })
    }
}
