//! Core mesh data structures.
//!
//! This module provides the half-edge mesh over a simple polygon together
//! with the bookkeeping the decomposition algorithms rely on.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], a doubly-connected edge list whose
//! faces start as the single polygon interior and are cut by diagonals. A
//! [`DiagonalRegistry`] inside the mesh records which vertex pairs are
//! already joined and the order in which diagonals were created.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe handles:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! Handles are generic over the underlying integer type ([`MeshIndex`]).
//!
//! # Construction
//!
//! ```
//! use polydecomp::mesh::{HalfEdgeMesh, build_from_ring};
//! use nalgebra::Point2;
//!
//! let ring = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(1.0, 0.0),
//! ];
//!
//! let mesh: HalfEdgeMesh = build_from_ring(&ring).unwrap();
//! assert_eq!(mesh.num_faces(), 1);
//! ```

mod builder;
mod halfedge;
mod index;
mod registry;
mod snapshot;

pub use builder::{build_from_ring, build_from_ring_oriented};
pub use halfedge::{Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use registry::{DiagonalRecord, DiagonalRegistry};
pub use snapshot::Snapshot;
