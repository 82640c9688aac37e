//! Split phase: greedy carving of convex pieces.
//!
//! Walking a working ring from its first vertex, a candidate piece is grown
//! one vertex at a time while it stays locally convex. A candidate that does
//! not consume the whole ring may still enclose a notch lying further along
//! the boundary, so it is shrunk from its far end until no notch remains
//! inside. Surviving candidates become pieces; the ring is then reduced to
//! the part not yet carved and the walk repeats.
//!
//! Diagonals are only inserted once every piece is known, in the order the
//! pieces were found.

use log::debug;
use nalgebra::Point2;

use super::Progress;
use crate::error::{MeshError, Result};
use crate::geometry::{point_in_polygon, same_side, signed_angle, BoundingBox};
use crate::mesh::{HalfEdgeMesh, MeshIndex, VertexId};

/// Compute the ordered convex pieces of a closed mesh's boundary.
///
/// Each piece is a run of consecutive vertices of the working ring; the
/// diagonal that cuts it off joins its first and last vertices. The last
/// entry is the residual ring of at most three vertices, whose closing
/// diagonal already exists.
pub fn convex_pieces<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Result<Vec<Vec<VertexId<I>>>> {
    mesh.ensure_closed()?;

    let mut ring: Vec<VertexId<I>> = mesh.vertex_ids().collect();
    let mut pieces = Vec::new();
    let mut stalled = 0;

    while ring.len() > 3 {
        let n = ring.len();
        let mut candidate = grow_candidate(mesh, &ring);
        if candidate.len() == n {
            pieces.push(candidate);
            return Ok(pieces);
        }

        let notches: Vec<VertexId<I>> = ring[candidate.len()..]
            .iter()
            .copied()
            .filter(|&v| mesh.is_notch(v))
            .collect();
        while let Some(notch) = contained_notch(mesh, &candidate, &notches) {
            cut_at_notch(mesh, &mut candidate, notch);
        }

        let kept = candidate.len();
        if kept > 2 {
            pieces.push(candidate);
            stalled = 0;
        } else {
            // A sliver; the ring only rotates by one vertex.
            stalled += 1;
            if stalled >= n {
                return Err(MeshError::SplitStalled { remaining: n });
            }
        }

        let first = ring[0];
        ring.drain(..kept - 1);
        ring.push(first);
    }

    pieces.push(ring);
    Ok(pieces)
}

/// Split a closed mesh into convex faces.
///
/// Returns the number of diagonals inserted. Star-shaped rings always yield
/// convex faces; other simple rings may leave a non-convex residual face or
/// fail with [`MeshError::SplitStalled`].
///
/// # Example
///
/// ```
/// use polydecomp::algo::split;
/// use polydecomp::mesh::{build_from_ring, HalfEdgeMesh};
/// use nalgebra::Point2;
///
/// let l_shape: Vec<_> = [(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0), (2.0, 4.0), (0.0, 4.0)]
///     .iter()
///     .map(|&(x, y)| Point2::new(x, y))
///     .collect();
///
/// let mut mesh: HalfEdgeMesh = build_from_ring(&l_shape).unwrap();
/// split(&mut mesh).unwrap();
/// assert!(mesh.face_ids().all(|f| mesh.is_convex_face(f)));
/// ```
pub fn split<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<usize> {
    split_with_progress(mesh, &Progress::none())
}

/// Split with progress reporting, one step per piece.
pub fn split_with_progress<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    progress: &Progress,
) -> Result<usize> {
    let pieces = convex_pieces(mesh)?;
    debug!("split found {} convex pieces", pieces.len());

    let total = pieces.len();
    let mut inserted = 0;
    for (i, piece) in pieces.iter().enumerate() {
        progress.report(i, total, "Splitting");
        if mesh.insert_diagonal(piece)?.is_some() {
            inserted += 1;
        }
    }
    progress.report(total, total, "Splitting");

    debug!("split inserted {} diagonals", inserted);
    Ok(inserted)
}

#[inline]
fn turn<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, a: VertexId<I>, b: VertexId<I>, c: VertexId<I>) -> f64 {
    signed_angle(mesh.position(a), mesh.position(b), mesh.position(c))
}

/// Grow a candidate from `ring[0], ring[1]` while the closed candidate stays convex.
///
/// Checks the turn at the current last vertex, at the new vertex, and at the
/// first vertex when closing back through the new vertex.
fn grow_candidate<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, ring: &[VertexId<I>]) -> Vec<VertexId<I>> {
    let mut candidate = vec![ring[0], ring[1]];
    for &w in &ring[2..] {
        let k = candidate.len();
        let (before, last) = (candidate[k - 2], candidate[k - 1]);
        let (first, second) = (candidate[0], candidate[1]);

        let convex = turn(mesh, before, last, w) >= 0.0
            && turn(mesh, last, w, first) >= 0.0
            && turn(mesh, w, first, second) >= 0.0;
        if !convex {
            break;
        }
        candidate.push(w);
    }
    candidate
}

/// Find a notch strictly inside the candidate's bounding box and polygon.
fn contained_notch<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    candidate: &[VertexId<I>],
    notches: &[VertexId<I>],
) -> Option<VertexId<I>> {
    let polygon: Vec<Point2<f64>> = candidate.iter().map(|&v| *mesh.position(v)).collect();
    let bbox = BoundingBox::from_points(&polygon)?;
    notches
        .iter()
        .copied()
        .filter(|&v| bbox.contains(mesh.position(v)))
        .find(|&v| point_in_polygon(&polygon, mesh.position(v)))
}

/// Drop the far end of the candidate, then every trailing vertex lying on the
/// same side as the dropped one of the line from the first vertex through `notch`.
fn cut_at_notch<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    candidate: &mut Vec<VertexId<I>>,
    notch: VertexId<I>,
) {
    let Some(far) = candidate.pop() else {
        return;
    };
    let Some(&first) = candidate.first() else {
        return;
    };

    let line_start = *mesh.position(first);
    let line_end = *mesh.position(notch);
    let far = *mesh.position(far);
    while candidate.len() > 2 {
        let v = candidate[candidate.len() - 1];
        if same_side(&line_start, &line_end, &far, mesh.position(v)) {
            candidate.pop();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_ring;

    fn ring(points: &[(f64, f64)]) -> Vec<Point2<f64>> {
        points.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn l_shape() -> HalfEdgeMesh {
        build_from_ring(&ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ]))
        .unwrap()
    }

    /// Clockwise square with its bottom edge pushed in to a notch at (2, 3).
    fn dart() -> HalfEdgeMesh {
        build_from_ring(&ring(&[
            (0.0, 0.0),
            (0.0, 4.0),
            (4.0, 4.0),
            (4.0, 0.0),
            (2.0, 3.0),
        ]))
        .unwrap()
    }

    #[test]
    fn test_convex_polygon_is_one_piece() {
        let mut mesh: HalfEdgeMesh =
            build_from_ring(&ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])).unwrap();
        let pieces = convex_pieces(&mesh).unwrap();
        assert_eq!(pieces, vec![vec![v(0), v(1), v(2), v(3)]]);

        assert_eq!(split(&mut mesh).unwrap(), 0);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_diagonals(), 0);
    }

    #[test]
    fn test_triangle_is_residual_ring() {
        let mut mesh: HalfEdgeMesh =
            build_from_ring(&ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])).unwrap();
        assert_eq!(convex_pieces(&mesh).unwrap().len(), 1);
        assert_eq!(split(&mut mesh).unwrap(), 0);
        assert_eq!(mesh.num_faces(), 1);
    }

    #[test]
    fn test_l_shape_pieces() {
        // Stored clockwise: (0,4) (2,4) (2,2) (4,2) (4,0) (0,0)
        let mesh = l_shape();
        let pieces = convex_pieces(&mesh).unwrap();
        assert_eq!(
            pieces,
            vec![
                vec![v(0), v(1), v(2)],
                vec![v(2), v(3), v(4), v(5)],
                vec![v(5), v(0), v(2)],
            ]
        );
    }

    #[test]
    fn test_l_shape_split() {
        let mut mesh = l_shape();
        // The residual ring's closing diagonal already exists
        assert_eq!(split(&mut mesh).unwrap(), 2);
        assert_eq!(mesh.num_faces(), 3);
        assert!(mesh.adjacent(v(0), v(2)));
        assert!(mesh.adjacent(v(2), v(5)));
        assert!(mesh.is_valid());
        for f in mesh.face_ids() {
            assert!(mesh.is_convex_face(f));
        }
    }

    #[test]
    fn test_cut_at_notch_drops_far_side() {
        let mesh = dart();
        assert_eq!(mesh.notches().collect::<Vec<_>>(), vec![v(4)]);

        // The whole square is locally convex but swallows the notch
        let mut candidate = grow_candidate(&mesh, &[v(0), v(1), v(2), v(3), v(4)]);
        assert_eq!(candidate, vec![v(0), v(1), v(2), v(3)]);
        assert_eq!(contained_notch(&mesh, &candidate, &[v(4)]), Some(v(4)));

        cut_at_notch(&mesh, &mut candidate, v(4));
        assert_eq!(candidate, vec![v(0), v(1)]);
        assert_eq!(contained_notch(&mesh, &candidate, &[v(4)]), None);
    }

    #[test]
    fn test_dart_pieces_skip_slivers() {
        let mesh = dart();
        let pieces = convex_pieces(&mesh).unwrap();
        assert_eq!(
            pieces,
            vec![
                vec![v(2), v(3), v(4)],
                vec![v(4), v(0), v(1)],
                vec![v(1), v(2), v(4)],
            ]
        );

        let notch = *mesh.position(v(4));
        for piece in &pieces {
            let polygon: Vec<_> = piece.iter().map(|&p| *mesh.position(p)).collect();
            let bbox = BoundingBox::from_points(&polygon).unwrap();
            assert!(!(bbox.contains(&notch) && point_in_polygon(&polygon, &notch)));
        }
    }

    #[test]
    fn test_split_dart_gives_convex_faces() {
        let mut mesh = dart();
        assert_eq!(split(&mut mesh).unwrap(), 2);
        assert!(mesh.is_valid());
        assert_eq!(mesh.num_faces(), 3);
        for f in mesh.face_ids() {
            assert!(mesh.is_convex_face(f), "face {:?} is not convex", f);
        }
    }

    #[test]
    fn test_split_stalls_on_trapped_ring() {
        // Simple but not star-shaped; every start of the last four-vertex
        // ring is cut back to a sliver.
        let mut mesh: HalfEdgeMesh = build_from_ring(&ring(&[
            (76.0, 92.0),
            (31.0, 32.0),
            (50.0, 24.0),
            (37.0, 40.0),
            (44.0, 43.0),
            (62.0, 22.0),
            (53.0, 6.0),
            (9.0, 7.0),
            (1.0, 9.0),
            (5.0, 58.0),
            (29.0, 88.0),
            (52.0, 60.0),
            (72.0, 69.0),
            (92.0, 93.0),
        ]))
        .unwrap();

        assert!(matches!(
            convex_pieces(&mesh),
            Err(MeshError::SplitStalled { remaining: 4 })
        ));
        // Nothing is inserted when the walk gives up
        assert!(matches!(
            split(&mut mesh),
            Err(MeshError::SplitStalled { remaining: 4 })
        ));
        assert_eq!(mesh.num_diagonals(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_split_requires_closed_mesh() {
        let mut mesh = HalfEdgeMesh::<u32>::new();
        mesh.add_vertex(Point2::new(0.0, 0.0)).unwrap();
        assert!(matches!(split(&mut mesh), Err(MeshError::NotClosed)));
    }

    #[test]
    fn test_split_reports_progress() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let progress = Progress::new(move |_, _, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let mut mesh = l_shape();
        split_with_progress(&mut mesh, &progress).unwrap();
        // One report per piece plus the final one
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
