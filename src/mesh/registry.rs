//! Diagonal registry.
//!
//! Tracks which vertex pairs are already joined, either by a boundary edge
//! or by a diagonal, and keeps the diagonals in the order they were created
//! together with a flag telling whether each one is still part of the mesh.
//!
//! The adjacency sets serve two readers: [`DiagonalRegistry::adjacent`]
//! suppresses duplicate diagonals, and [`DiagonalRegistry::adjacency_degree`]
//! feeds the merge eligibility test. Because boundary neighbours are part of
//! the sets, the adjacency degree of a boundary vertex is
//! `2 + diagonal_degree`.

use std::collections::{HashMap, HashSet};

use super::index::{HalfEdgeId, MeshIndex, VertexId};

/// A diagonal created by the split phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalRecord<I: MeshIndex = u32> {
    /// The half-edge that was inserted (its twin runs the other way).
    pub halfedge: HalfEdgeId<I>,
    /// False once the merge phase has removed the diagonal.
    pub retained: bool,
}

/// Per-vertex adjacency bookkeeping plus the ordered diagonal list.
#[derive(Debug, Clone)]
pub struct DiagonalRegistry<I: MeshIndex = u32> {
    neighbors: HashMap<VertexId<I>, HashSet<VertexId<I>>>,
    diagonal_degree: HashMap<VertexId<I>, usize>,
    records: Vec<DiagonalRecord<I>>,
}

impl<I: MeshIndex> Default for DiagonalRegistry<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> DiagonalRegistry<I> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            neighbors: HashMap::new(),
            diagonal_degree: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Returns true if `v1` and `v2` are joined by a boundary edge or a diagonal.
    pub fn adjacent(&self, v1: VertexId<I>, v2: VertexId<I>) -> bool {
        let has = |a: VertexId<I>, b: VertexId<I>| {
            self.neighbors.get(&a).is_some_and(|set| set.contains(&b))
        };
        has(v1, v2) || has(v2, v1)
    }

    /// Number of vertices joined to `v`, boundary neighbours included.
    pub fn adjacency_degree(&self, v: VertexId<I>) -> usize {
        self.neighbors.get(&v).map_or(0, HashSet::len)
    }

    /// Number of live diagonals incident to `v`.
    pub fn diagonal_degree(&self, v: VertexId<I>) -> usize {
        self.diagonal_degree.get(&v).copied().unwrap_or(0)
    }

    /// Iterate over the vertices joined to `v`.
    pub fn neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.neighbors.get(&v).into_iter().flatten().copied()
    }

    /// Record a boundary edge between `v1` and `v2`.
    pub(crate) fn link_boundary(&mut self, v1: VertexId<I>, v2: VertexId<I>) {
        self.link(v1, v2);
    }

    /// Record a new diagonal, appending it to the creation order.
    pub(crate) fn push_diagonal(&mut self, he: HalfEdgeId<I>, v1: VertexId<I>, v2: VertexId<I>) {
        self.link(v1, v2);
        *self.diagonal_degree.entry(v1).or_insert(0) += 1;
        *self.diagonal_degree.entry(v2).or_insert(0) += 1;
        self.records.push(DiagonalRecord {
            halfedge: he,
            retained: true,
        });
    }

    /// Mark a diagonal as removed and forget the adjacency of its endpoints.
    ///
    /// Returns false if `he` is not a retained diagonal.
    pub(crate) fn drop_diagonal(
        &mut self,
        he: HalfEdgeId<I>,
        v1: VertexId<I>,
        v2: VertexId<I>,
    ) -> bool {
        let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.retained && r.halfedge == he)
        else {
            return false;
        };
        record.retained = false;

        self.unlink(v1, v2);
        for v in [v1, v2] {
            if let Some(count) = self.diagonal_degree.get_mut(&v) {
                *count = count.saturating_sub(1);
            }
        }
        true
    }

    /// Returns true if `he` is a diagonal that is still in the mesh.
    pub fn is_diagonal(&self, he: HalfEdgeId<I>) -> bool {
        self.records.iter().any(|r| r.retained && r.halfedge == he)
    }

    /// All diagonals ever inserted, in creation order.
    pub fn records(&self) -> &[DiagonalRecord<I>] {
        &self.records
    }

    /// Retained diagonals, in creation order.
    pub fn diagonals(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.records
            .iter()
            .filter(|r| r.retained)
            .map(|r| r.halfedge)
    }

    /// Number of retained diagonals.
    pub fn num_diagonals(&self) -> usize {
        self.records.iter().filter(|r| r.retained).count()
    }

    fn link(&mut self, v1: VertexId<I>, v2: VertexId<I>) {
        self.neighbors.entry(v1).or_default().insert(v2);
        self.neighbors.entry(v2).or_default().insert(v1);
    }

    fn unlink(&mut self, v1: VertexId<I>, v2: VertexId<I>) {
        if let Some(set) = self.neighbors.get_mut(&v1) {
            set.remove(&v2);
        }
        if let Some(set) = self.neighbors.get_mut(&v2) {
            set.remove(&v1);
        }
    }
}
