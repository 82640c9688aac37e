//! Geometric primitives over 2D points.
//!
//! Every convexity and notch decision in the crate reduces to
//! [`signed_angle`]. Angles are measured for a clockwise traversal of the
//! boundary: a convex turn is positive, a reflex turn negative.

use nalgebra::Point2;

/// Signed interior angle at `b` in degrees, formed by the rays `b→a` and `b→c`.
///
/// Computed as `atan2` of the cross and dot products of `b - a` and `b - c`.
/// Positive for a convex turn of a clockwise ring, negative for a reflex one.
/// Collinear triples yield `0` or `180`, both of which count as convex.
///
/// # Example
///
/// ```
/// use polydecomp::geometry::signed_angle;
/// use nalgebra::Point2;
///
/// // Clockwise corner of a square.
/// let a = Point2::new(0.0, 0.0);
/// let b = Point2::new(0.0, 4.0);
/// let c = Point2::new(4.0, 4.0);
/// assert!((signed_angle(&a, &b, &c) - 90.0).abs() < 1e-9);
/// ```
#[inline]
pub fn signed_angle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    let u = b - a;
    let w = b - c;
    let dot = u.dot(&w);
    let det = u.x * w.y - w.x * u.y;
    if det == 0.0 {
        // A signed zero would send atan2 to -180.
        return if dot < 0.0 { 180.0 } else { 0.0 };
    }
    det.atan2(dot).to_degrees()
}

/// Returns true if `b` is a reflex vertex between `a` and `c`.
#[inline]
pub fn is_notch(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> bool {
    signed_angle(a, b, c) < 0.0
}

/// Evaluates the implicit line equation through `p` and `q` at `x`.
///
/// The sign tells which side of the directed line `x` lies on; zero means on
/// the line. No slope is formed, so vertical lines need no special casing.
#[inline]
fn line_side(p: &Point2<f64>, q: &Point2<f64>, x: &Point2<f64>) -> f64 {
    (q.x - p.x) * (x.y - p.y) - (q.y - p.y) * (x.x - p.x)
}

/// Returns true if `r` and `s` lie on the same side of the infinite line
/// through `p` and `q`, or on the line itself.
///
/// A degenerate line (`p == q`) has no sides; every pair is reported as
/// being on the same side.
pub fn same_side(p: &Point2<f64>, q: &Point2<f64>, r: &Point2<f64>, s: &Point2<f64>) -> bool {
    if p == q {
        return true;
    }
    line_side(p, q, r) * line_side(p, q, s) >= 0.0
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point2<f64>,
    /// Maximum corner.
    pub max: Point2<f64>,
}

impl BoundingBox {
    /// Compute the bounding box of a set of points.
    ///
    /// Returns `None` for an empty set.
    pub fn from_points<'a, It>(points: It) -> Option<Self>
    where
        It: IntoIterator<Item = &'a Point2<f64>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bbox = BoundingBox {
            min: first,
            max: first,
        };
        for p in iter {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    /// Strict interior containment: points on the box border are outside.
    #[inline]
    pub fn contains(&self, p: &Point2<f64>) -> bool {
        self.min.x < p.x && p.x < self.max.x && self.min.y < p.y && p.y < self.max.y
    }
}

/// Even-odd ray casting test of `p` against the ordered ring `polygon`.
///
/// Rings with two or fewer vertices contain nothing.
pub fn point_in_polygon(polygon: &[Point2<f64>], p: &Point2<f64>) -> bool {
    let n = polygon.len();
    if n <= 2 {
        return false;
    }

    let mut inside = false;
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Returns true if the ring is oriented clockwise.
///
/// Uses the shoelace sum `Σ (x₂ - x₁)(y₂ + y₁)`, which is twice the negated
/// signed area.
pub fn is_clockwise(ring: &[Point2<f64>]) -> bool {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = &ring[i];
        let b = &ring[(i + 1) % n];
        sum += (b.x - a.x) * (b.y + a.y);
    }
    sum > 0.0
}

/// Returns true if every turn of the clockwise ring is non-reflex.
pub fn is_convex_ring(ring: &[Point2<f64>]) -> bool {
    let n = ring.len();
    if n < 3 {
        return true;
    }
    (0..n).all(|i| !is_notch(&ring[i], &ring[(i + 1) % n], &ring[(i + 2) % n]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_signed_angle_convex_and_reflex() {
        // Clockwise L-shape, reflex corner at (2, 2)
        let convex = signed_angle(&p(0.0, 4.0), &p(2.0, 4.0), &p(2.0, 2.0));
        assert!((convex - 90.0).abs() < 1e-9);

        let reflex = signed_angle(&p(2.0, 4.0), &p(2.0, 2.0), &p(4.0, 2.0));
        assert!((reflex + 90.0).abs() < 1e-9);
        assert!(is_notch(&p(2.0, 4.0), &p(2.0, 2.0), &p(4.0, 2.0)));
    }

    #[test]
    fn test_signed_angle_collinear_is_not_notch() {
        let straight = signed_angle(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0));
        assert!((straight - 180.0).abs() < 1e-9);
        assert!(!is_notch(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0)));
        // Walking leftwards the cross product comes out as -0.0
        assert!(!is_notch(&p(4.0, 0.0), &p(2.0, 0.0), &p(0.0, 0.0)));
        assert_eq!(signed_angle(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_same_side_regular_line() {
        let a = p(0.0, 0.0);
        let b = p(4.0, 1.0);
        assert!(same_side(&a, &b, &p(0.0, 3.0), &p(5.0, 5.0)));
        assert!(!same_side(&a, &b, &p(0.0, 3.0), &p(2.0, -3.0)));
        // On the line counts as same side
        assert!(same_side(&a, &b, &p(8.0, 2.0), &p(2.0, -3.0)));
    }

    #[test]
    fn test_same_side_vertical_line() {
        let a = p(1.0, 0.0);
        let b = p(1.0, 5.0);
        assert!(same_side(&a, &b, &p(2.0, 1.0), &p(3.0, -7.0)));
        assert!(!same_side(&a, &b, &p(2.0, 1.0), &p(0.0, 1.0)));
    }

    #[test]
    fn test_same_side_degenerate_line() {
        let a = p(1.0, 1.0);
        assert!(same_side(&a, &a, &p(2.0, 1.0), &p(-3.0, 0.0)));
    }

    #[test]
    fn test_bounding_box() {
        let pts = [p(1.0, 2.0), p(-1.0, 5.0), p(3.0, 0.0)];
        let bbox = BoundingBox::from_points(&pts).unwrap();
        assert_eq!(bbox.min, p(-1.0, 0.0));
        assert_eq!(bbox.max, p(3.0, 5.0));

        assert!(bbox.contains(&p(0.0, 1.0)));
        // Border is not interior
        assert!(!bbox.contains(&p(3.0, 1.0)));
        assert!(!bbox.contains(&p(0.0, 0.0)));

        let empty: [Point2<f64>; 0] = [];
        assert!(BoundingBox::from_points(&empty).is_none());
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [p(0.0, 0.0), p(0.0, 4.0), p(4.0, 4.0), p(4.0, 0.0)];
        assert!(point_in_polygon(&square, &p(2.0, 2.0)));
        assert!(!point_in_polygon(&square, &p(5.0, 2.0)));
        assert!(!point_in_polygon(&square, &p(2.0, -1.0)));

        // Concave: the notch pocket of an L is outside
        let l_shape = [
            p(0.0, 4.0),
            p(2.0, 4.0),
            p(2.0, 2.0),
            p(4.0, 2.0),
            p(4.0, 0.0),
            p(0.0, 0.0),
        ];
        assert!(point_in_polygon(&l_shape, &p(1.0, 3.0)));
        assert!(!point_in_polygon(&l_shape, &p(3.0, 3.0)));
    }

    #[test]
    fn test_point_in_polygon_needs_three_vertices() {
        let segment = [p(0.0, 0.0), p(4.0, 4.0)];
        assert!(!point_in_polygon(&segment, &p(2.0, 2.0)));
        assert!(!point_in_polygon(&[], &p(0.0, 0.0)));
    }

    #[test]
    fn test_is_clockwise() {
        let ccw = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        assert!(!is_clockwise(&ccw));

        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!(is_clockwise(&cw));
    }

    #[test]
    fn test_is_convex_ring() {
        let cw_square = [p(0.0, 0.0), p(0.0, 4.0), p(4.0, 4.0), p(4.0, 0.0)];
        assert!(is_convex_ring(&cw_square));

        let cw_l = [
            p(0.0, 4.0),
            p(2.0, 4.0),
            p(2.0, 2.0),
            p(4.0, 2.0),
            p(4.0, 0.0),
            p(0.0, 0.0),
        ];
        assert!(!is_convex_ring(&cw_l));
    }

    fn coord() -> impl Strategy<Value = f64> {
        -100.0..100.0f64
    }

    proptest! {
        #[test]
        fn prop_signed_angle_is_antisymmetric(
            ax in coord(), ay in coord(),
            bx in coord(), by in coord(),
            cx in coord(), cy in coord(),
        ) {
            let (a, b, c) = (p(ax, ay), p(bx, by), p(cx, cy));
            let u = b - a;
            let w = b - c;
            // Skip near-collinear triples, where ±180 flips
            prop_assume!((u.x * w.y - w.x * u.y).abs() > 1e-6);
            let forward = signed_angle(&a, &b, &c);
            let backward = signed_angle(&c, &b, &a);
            prop_assert!((forward + backward).abs() < 1e-9);
        }

        #[test]
        fn prop_reversal_flips_orientation(
            radii in proptest::collection::vec(1.0..10.0f64, 3..24),
        ) {
            // Star-shaped ring around the origin, counter-clockwise by construction
            let n = radii.len();
            let ring: Vec<_> = radii
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let t = std::f64::consts::TAU * i as f64 / n as f64;
                    p(r * t.cos(), r * t.sin())
                })
                .collect();
            let reversed: Vec<_> = ring.iter().rev().copied().collect();
            prop_assert!(!is_clockwise(&ring));
            prop_assert_eq!(is_clockwise(&ring), !is_clockwise(&reversed));
        }
    }
}
