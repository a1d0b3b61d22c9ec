//! Dependency graph for nails
//!
//! Owns every nail of the active level and answers removal-eligibility
//! queries. Uses petgraph for storage: nails are node weights, and an edge
//! `dep -> nail` means "dep must be removed before nail".

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::BTreeMap;

use super::level::{Level, LevelError};
use super::nail::{Nail, NailId};

/// The nail store of one level
#[derive(Debug, Clone)]
pub struct NailGraph {
    /// The underlying directed graph
    graph: DiGraph<Nail, ()>,

    /// Map from NailId to node index, ordered by id
    node_map: BTreeMap<NailId, NodeIndex>,
}

impl NailGraph {
    /// Builds the graph for a level
    ///
    /// Fails if the level does not validate; in particular an unknown
    /// dependency id or a dependency cycle is rejected here.
    pub fn from_level(level: &Level) -> Result<Self, LevelError> {
        level.validate()?;

        let mut graph = DiGraph::with_capacity(level.nail_count(), 0);
        let mut node_map = BTreeMap::new();

        // First pass: add all nodes
        for (id, nail_type) in &level.types {
            let idx = graph.add_node(Nail::new(*id, *nail_type));
            node_map.insert(*id, idx);
        }

        // Second pass: add all edges
        for (id, deps) in &level.dependencies {
            let nail_idx = *node_map.get(id).ok_or(LevelError::UnknownNail(*id))?;
            for dep in deps {
                let dep_idx = node_map
                    .get(dep)
                    .copied()
                    .ok_or(LevelError::UnknownDependency {
                        nail: *id,
                        dependency: *dep,
                    })?;
                graph.update_edge(dep_idx, nail_idx, ());
            }
        }

        Ok(Self { graph, node_map })
    }

    /// Returns true if the nail exists, is still in place, and every nail
    /// it depends on has been removed
    pub fn is_removable(&self, id: NailId) -> bool {
        let Some(&idx) = self.node_map.get(&id) else {
            return false;
        };
        if self.graph[idx].removed {
            return false;
        }

        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .all(|dep| self.graph[dep].removed)
    }

    /// Marks a nail as removed
    ///
    /// Callers check [`is_removable`](Self::is_removable) first; this only
    /// flips the flag and returns the updated nail.
    pub(crate) fn remove(&mut self, id: NailId) -> Option<&Nail> {
        let idx = *self.node_map.get(&id)?;
        let nail = &mut self.graph[idx];
        nail.removed = true;
        Some(&*nail)
    }

    /// Returns true once every nail has been removed
    pub fn is_complete(&self) -> bool {
        self.graph.node_weights().all(|nail| nail.removed)
    }

    /// Looks up a nail
    pub fn get(&self, id: NailId) -> Option<&Nail> {
        self.node_map.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Returns true if the graph contains the nail
    pub fn contains(&self, id: NailId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// All nails in ascending id order
    pub fn nails(&self) -> impl Iterator<Item = &Nail> {
        self.node_map.values().map(|idx| &self.graph[*idx])
    }

    /// Nails that can be removed right now, in id order
    pub fn removable(&self) -> Vec<NailId> {
        self.node_map
            .keys()
            .copied()
            .filter(|id| self.is_removable(*id))
            .collect()
    }

    /// Nails that have been removed, in id order
    pub fn removed(&self) -> Vec<NailId> {
        self.nails().filter(|n| n.removed).map(|n| n.id).collect()
    }

    /// Returns the direct dependencies of a nail, in id order
    pub fn dependencies(&self, id: NailId) -> Vec<NailId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Returns the direct dependents of a nail (nails that depend on it)
    pub fn dependents(&self, id: NailId) -> Vec<NailId> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: NailId, direction: Direction) -> Vec<NailId> {
        let Some(&idx) = self.node_map.get(&id) else {
            return vec![];
        };

        let mut ids: Vec<NailId> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].id)
            .collect();
        ids.sort();
        ids
    }

    /// Returns all nails in a legal removal order (dependencies first)
    pub fn removal_order(&self) -> Vec<NailId> {
        // Levels are validated acyclic before construction
        toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|idx| self.graph[idx].id).collect())
            .unwrap_or_default()
    }

    /// Returns the number of nails in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}
