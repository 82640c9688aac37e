//! The full decomposition pipeline.

use log::debug;
use nalgebra::Point2;

use super::{merge_with_progress, split_with_progress, Progress};
use crate::error::Result;
use crate::mesh::{build_from_ring, HalfEdgeMesh, MeshIndex, Snapshot};

/// Options for [`decompose`].
#[derive(Debug, Clone)]
pub struct DecomposeOptions {
    /// Whether to run the merge phase after splitting.
    pub merge: bool,
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        Self { merge: true }
    }
}

impl DecomposeOptions {
    /// Options with every phase enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to run the merge phase.
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }
}

/// Result of decomposing a polygon.
#[derive(Debug, Clone)]
pub struct Decomposition<I: MeshIndex = u32> {
    /// The final mesh.
    pub mesh: HalfEdgeMesh<I>,
    /// The closed boundary before any diagonal.
    pub initial: Snapshot,
    /// State after the split phase.
    pub after_split: Snapshot,
    /// State after the merge phase, if it ran.
    pub after_merge: Option<Snapshot>,
}

impl<I: MeshIndex> Decomposition<I> {
    /// The last snapshot taken.
    pub fn final_snapshot(&self) -> &Snapshot {
        self.after_merge.as_ref().unwrap_or(&self.after_split)
    }

    /// Number of convex pieces.
    pub fn num_pieces(&self) -> usize {
        self.mesh.num_faces()
    }

    /// Each convex piece as its vertex positions, in face-cycle order.
    pub fn pieces(&self) -> Vec<Vec<Point2<f64>>> {
        self.mesh
            .face_ids()
            .map(|f| self.mesh.face_positions(f))
            .collect()
    }
}

/// Decompose a simple polygon ring of either orientation into convex pieces.
///
/// # Example
///
/// ```
/// use polydecomp::algo::{decompose, DecomposeOptions};
/// use nalgebra::Point2;
///
/// let l_shape: Vec<_> = [(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0), (2.0, 4.0), (0.0, 4.0)]
///     .iter()
///     .map(|&(x, y)| Point2::new(x, y))
///     .collect();
///
/// let result = decompose::<u32>(&l_shape, &DecomposeOptions::default()).unwrap();
/// assert_eq!(result.num_pieces(), 2);
/// ```
pub fn decompose<I: MeshIndex>(
    points: &[Point2<f64>],
    options: &DecomposeOptions,
) -> Result<Decomposition<I>> {
    decompose_with_progress(points, options, &Progress::none())
}

/// Decompose with progress reporting from each phase.
pub fn decompose_with_progress<I: MeshIndex>(
    points: &[Point2<f64>],
    options: &DecomposeOptions,
    progress: &Progress,
) -> Result<Decomposition<I>> {
    let mut mesh = build_from_ring(points)?;
    debug!(
        "built boundary with {} vertices, {} notches",
        mesh.num_vertices(),
        mesh.notches().count()
    );
    let initial = mesh.snapshot();

    split_with_progress(&mut mesh, progress)?;
    let after_split = mesh.snapshot();

    let after_merge = if options.merge {
        merge_with_progress(&mut mesh, progress)?;
        Some(mesh.snapshot())
    } else {
        None
    };

    Ok(Decomposition {
        mesh,
        initial,
        after_split,
        after_merge,
    })
}
