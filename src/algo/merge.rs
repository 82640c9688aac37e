//! Merge phase: removal of unnecessary diagonals.
//!
//! A single pass visits the retained diagonals in insertion order. A
//! diagonal is removed when its endpoints are eligible and the two turns it
//! currently splits stay non-reflex once it is gone. Only those two turns
//! change, so faces stay convex provided the split phase left them convex.

use log::{debug, trace};

use super::Progress;
use crate::error::Result;
use crate::geometry::signed_angle;
use crate::mesh::{HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId};

/// Returns true if the diagonal between `vs` and `vt` may be considered for removal.
///
/// Uses each endpoint's adjacency degree (boundary neighbours included) and
/// its notch flag from the original boundary.
pub fn is_mergeable<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, vs: VertexId<I>, vt: VertexId<I>) -> bool {
    let registry = mesh.registry();
    let ds = registry.adjacency_degree(vs);
    let dt = registry.adjacency_degree(vt);
    let ns = mesh.is_notch(vs);
    let nt = mesh.is_notch(vt);

    (ds > 2 && dt > 2) || (ds > 2 && !nt) || (dt > 2 && !ns) || (!ns && !nt)
}

/// The turns at the diagonal's origin and destination once it is removed.
///
/// For a diagonal `d` from `vs` to `vt`, the turn at `vs` runs from the
/// vertex before `d` in its face to the vertex after the twin in the other
/// face, and symmetrically at `vt`.
pub fn merged_turns<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, diagonal: HalfEdgeId<I>) -> (f64, f64) {
    let twin = mesh.twin(diagonal);
    let vs = mesh.origin(diagonal);
    let vt = mesh.origin(twin);

    let at_origin = signed_angle(
        mesh.position(mesh.origin(mesh.prev(diagonal))),
        mesh.position(vs),
        mesh.position(mesh.dest(mesh.next(twin))),
    );
    let at_dest = signed_angle(
        mesh.position(mesh.origin(mesh.prev(twin))),
        mesh.position(vt),
        mesh.position(mesh.dest(mesh.next(diagonal))),
    );
    (at_origin, at_dest)
}

/// Remove every diagonal whose removal keeps both merged faces convex.
///
/// Returns the number of diagonals removed.
pub fn merge<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<usize> {
    merge_with_progress(mesh, &Progress::none())
}

/// Merge with progress reporting, one step per visited diagonal.
pub fn merge_with_progress<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    progress: &Progress,
) -> Result<usize> {
    mesh.ensure_closed()?;

    let diagonals: Vec<HalfEdgeId<I>> = mesh.diagonals().collect();
    let total = diagonals.len();
    let mut removed = 0;

    for (i, diagonal) in diagonals.into_iter().enumerate() {
        progress.report(i, total, "Merging");

        let vs = mesh.origin(diagonal);
        let vt = mesh.dest(diagonal);
        if !is_mergeable(mesh, vs, vt) {
            trace!("keeping {:?}: endpoints not eligible", diagonal);
            continue;
        }

        let (at_origin, at_dest) = merged_turns(mesh, diagonal);
        if at_origin >= 0.0 && at_dest >= 0.0 {
            mesh.remove_diagonal(diagonal)?;
            removed += 1;
        } else {
            trace!(
                "keeping {:?}: merged turns {:.3} and {:.3}",
                diagonal,
                at_origin,
                at_dest
            );
        }
    }
    progress.report(total, total, "Merging");

    debug!(
        "merge removed {} of {} diagonals, {} faces remain",
        removed,
        total,
        mesh.num_faces()
    );
    Ok(removed)
}
