//! # Polydecomp
//!
//! Convex decomposition of simple polygons on a half-edge mesh.
//!
//! A polygon ring is loaded into a doubly-connected edge list whose single
//! face is the polygon interior. The split phase then cuts the interior into
//! convex faces by inserting diagonals, and the merge phase removes the
//! diagonals that turned out to be unnecessary.
//!
//! ## Features
//!
//! - **Half-edge data structure**: arena storage with type-safe handles and
//!   reusable slots
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Stage snapshots**: the boundary, the split result and the merge result
//!   can be captured and written out for plotting
//!
//! ## Quick Start
//!
//! ```
//! use polydecomp::prelude::*;
//! use nalgebra::Point2;
//!
//! // Counter-clockwise L-shape with a reflex corner at (2, 2)
//! let ring: Vec<_> = [(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0), (2.0, 4.0), (0.0, 4.0)]
//!     .iter()
//!     .map(|&(x, y)| Point2::new(x, y))
//!     .collect();
//!
//! let result = decompose::<u32>(&ring, &DecomposeOptions::default()).unwrap();
//! for piece in result.pieces() {
//!     println!("{:?}", piece);
//! }
//! assert_eq!(result.num_pieces(), 2);
//! ```
//!
//! ## Working on the Mesh Directly
//!
//! ```
//! use polydecomp::prelude::*;
//! use nalgebra::Point2;
//!
//! let mut mesh = HalfEdgeMesh::<u32>::new();
//! for (x, y) in [(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (4.0, 2.0), (4.0, 0.0), (2.0, 0.0)] {
//!     mesh.add_vertex(Point2::new(x, y)).unwrap();
//! }
//! mesh.close_boundary().unwrap();
//!
//! // Cut the rectangle in two, then let the merge phase undo it
//! mesh.connect(VertexId::new(2), VertexId::new(5)).unwrap();
//! assert_eq!(mesh.num_faces(), 2);
//! merge(&mut mesh).unwrap();
//! assert_eq!(mesh.num_faces(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use polydecomp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{decompose, merge, split, DecomposeOptions, Decomposition, Progress};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_ring, Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, MeshIndex, Snapshot,
        Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
