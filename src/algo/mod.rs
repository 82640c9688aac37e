//! Convex decomposition algorithms.
//!
//! The decomposition runs in two phases over a closed [`HalfEdgeMesh`]:
//!
//! - **Split**: greedily carves convex pieces off the boundary and inserts
//!   the diagonal closing each one.
//! - **Merge**: a single pass over the inserted diagonals that removes every
//!   one whose two faces stay convex once joined.
//!
//! [`decompose`] chains both phases from a raw ring of points and keeps a
//! [`Snapshot`](crate::mesh::Snapshot) of the mesh after each stage.
//!
//! # Example
//!
//! ```
//! use polydecomp::algo::{merge, split};
//! use polydecomp::mesh::HalfEdgeMesh;
//! use nalgebra::Point2;
//!
//! let ring: Vec<_> = [(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0), (2.0, 4.0), (0.0, 4.0)]
//!     .iter()
//!     .map(|&(x, y)| Point2::new(x, y))
//!     .collect();
//!
//! let mut mesh = HalfEdgeMesh::<u32>::from_ring(&ring).unwrap();
//! split(&mut mesh).unwrap();
//! merge(&mut mesh).unwrap();
//! assert!(mesh.face_ids().all(|f| mesh.is_convex_face(f)));
//! ```
//!
//! [`HalfEdgeMesh`]: crate::mesh::HalfEdgeMesh

mod decompose;
pub mod merge;
mod progress;
pub mod split;

pub use decompose::{decompose, decompose_with_progress, DecomposeOptions, Decomposition};
pub use merge::{is_mergeable, merge, merge_with_progress};
pub use progress::Progress;
pub use split::{convex_pieces, split, split_with_progress};
