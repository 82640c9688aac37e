//! Observable state of a mesh at a pipeline stage.

use nalgebra::Point2;

use super::halfedge::HalfEdgeMesh;
use super::index::{HalfEdgeId, MeshIndex};

/// Vertices and undirected segments of a mesh.
///
/// Segments list the boundary edges first, in boundary order, followed by the
/// retained diagonals in the order they were inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Vertex positions, in boundary order.
    pub vertices: Vec<Point2<f64>>,
    /// Segment endpoints.
    pub segments: Vec<[Point2<f64>; 2]>,
    /// How many leading segments are boundary edges.
    pub boundary_edges: usize,
}

impl Snapshot {
    /// Number of diagonals among the segments.
    pub fn num_diagonals(&self) -> usize {
        self.segments.len() - self.boundary_edges
    }

    /// The diagonal segments.
    pub fn diagonals(&self) -> &[[Point2<f64>; 2]] {
        &self.segments[self.boundary_edges..]
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Capture the current vertices, boundary edges and diagonals.
    pub fn snapshot(&self) -> Snapshot {
        let vertices = self.vertices.iter().map(|v| v.position).collect();

        let segment = |he: HalfEdgeId<I>| {
            [*self.position(self.origin(he)), *self.position(self.dest(he))]
        };
        let mut segments: Vec<[Point2<f64>; 2]> =
            self.boundary_halfedges().iter().map(|&he| segment(he)).collect();
        let boundary_edges = segments.len();
        segments.extend(self.diagonals().map(segment));

        Snapshot {
            vertices,
            segments,
            boundary_edges,
        }
    }
}
