//! Mesh construction from coordinate rings.
//!
//! The mesh expects its boundary in clockwise order. These helpers take a ring
//! in either orientation, feed the vertices in clockwise order and close the
//! boundary.

use nalgebra::Point2;

use super::halfedge::HalfEdgeMesh;
use super::index::MeshIndex;
use crate::error::{MeshError, Result};
use crate::geometry::is_clockwise;

/// Build a closed half-edge mesh from a polygon ring of either orientation.
///
/// # Example
/// ```
/// use polydecomp::mesh::{build_from_ring, HalfEdgeMesh};
/// use nalgebra::Point2;
///
/// // Counter-clockwise square; stored clockwise internally.
/// let ring = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(0.0, 4.0),
/// ];
///
/// let mesh: HalfEdgeMesh = build_from_ring(&ring).unwrap();
/// assert_eq!(mesh.num_vertices(), 4);
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.notches().count(), 0);
/// ```
pub fn build_from_ring<I: MeshIndex>(points: &[Point2<f64>]) -> Result<HalfEdgeMesh<I>> {
    build_from_ring_oriented(points, is_clockwise(points))
}

/// Build a closed half-edge mesh from a ring whose orientation is known.
///
/// With `clockwise == false` the ring is fed in reverse.
pub fn build_from_ring_oriented<I: MeshIndex>(
    points: &[Point2<f64>],
    clockwise: bool,
) -> Result<HalfEdgeMesh<I>> {
    if points.len() < 3 {
        return Err(MeshError::invalid_polygon(format!(
            "a polygon needs at least 3 vertices, got {}",
            points.len()
        )));
    }

    let mut mesh = HalfEdgeMesh::with_capacity(points.len());
    if clockwise {
        for &p in points {
            mesh.add_vertex(p)?;
        }
    } else {
        for &p in points.iter().rev() {
            mesh.add_vertex(p)?;
        }
    }
    mesh.close_boundary()?;
    Ok(mesh)
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Build a closed mesh from a ring of either orientation.
    ///
    /// Shorthand for [`build_from_ring`].
    pub fn from_ring(points: &[Point2<f64>]) -> Result<Self> {
        build_from_ring(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexId;

    fn ccw_square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ]
    }

    #[test]
    fn test_ccw_ring_is_reversed() {
        let mesh: HalfEdgeMesh = build_from_ring(&ccw_square()).unwrap();
        assert_eq!(*mesh.position(VertexId::new(0)), Point2::new(0.0, 4.0));
        assert_eq!(*mesh.position(VertexId::new(3)), Point2::new(0.0, 0.0));
        assert_eq!(mesh.notches().count(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_cw_ring_is_kept() {
        let cw: Vec<_> = ccw_square().into_iter().rev().collect();
        let mesh: HalfEdgeMesh = build_from_ring(&cw).unwrap();
        for (i, p) in cw.iter().enumerate() {
            assert_eq!(mesh.position(VertexId::new(i)), p);
        }
    }

    #[test]
    fn test_wrong_orientation_flag_marks_every_vertex() {
        // Feeding a CCW ring as if it were clockwise flips every turn
        let mesh: HalfEdgeMesh = build_from_ring_oriented(&ccw_square(), true).unwrap();
        assert_eq!(mesh.notches().count(), 4);
    }

    #[test]
    fn test_too_few_points() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(matches!(
            build_from_ring::<u32>(&pts),
            Err(MeshError::InvalidPolygon { .. })
        ));
        assert!(build_from_ring::<u32>(&[]).is_err());
    }

    #[test]
    fn test_small_index_type() {
        let mesh = HalfEdgeMesh::<u16>::from_ring(&ccw_square()).unwrap();
        assert_eq!(mesh.num_faces(), 1);
    }
}
