use crate::error::{Result, ShadowError};
use crate::geom::EPS;
use crate::geom::footprint::signed_area;

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

impl TriangleIndex {
    pub fn offset(self, n: usize) -> Self {
        Self(self.0 + n, self.1 + n, self.2 + n)
    }
}

/// Triangulates a planar ring with ear clipping.
///
/// `pts` is an open ring (no repeated closing vertex). Consecutive repeated
/// points are treated as one vertex.
/// Returned indices refer to `pts` and keep the winding of the ring.
/// Fails for zero-area rings and for self-intersecting rings where no ear
/// can be found.
pub fn triangulate(pts: &[(f64, f64)]) -> Result<Vec<TriangleIndex>> {
    if pts.len() < 3 {
        return Err(ShadowError::geometry("cannot triangulate less than 3 points"));
    }

    let mut vertices: Vec<usize> = Vec::with_capacity(pts.len());
    for (i, &p) in pts.iter().enumerate() {
        if vertices.last().is_none_or(|&last| !same_point(pts[last], p)) {
            vertices.push(i);
        }
    }
    while vertices.len() > 1 && same_point(pts[vertices[0]], pts[vertices[vertices.len() - 1]]) {
        vertices.pop();
    }
    if vertices.len() < 3 {
        return Err(ShadowError::geometry("cannot triangulate less than 3 distinct points"));
    }

    let ring: Vec<(f64, f64)> = vertices.iter().map(|&i| pts[i]).collect();
    let area = signed_area(&ring);
    if area.abs() < EPS {
        return Err(ShadowError::geometry("cannot triangulate a ring with zero area"));
    }
    let orientation = area.signum();

    let mut triangles: Vec<TriangleIndex> = Vec::new();
    let mut pos: usize = 0;
    let mut num_fail: usize = 0;

    while vertices.len() > 2 {
        if num_fail > vertices.len() {
            return Err(ShadowError::geometry("ear-clipping algorithm failed"));
        }

        // If last vertex, start from the beginning
        if pos > vertices.len() - 1 {
            pos = 0;
        }
        let prev_pos = if pos > 0 { pos - 1 } else { vertices.len() - 1 };
        let next_pos = if pos < vertices.len() - 1 { pos + 1 } else { 0 };
        let (prev, curr, next) = (vertices[prev_pos], vertices[pos], vertices[next_pos]);

        let turn = cross(pts[prev], pts[curr], pts[next]);
        if turn.abs() < EPS {
            // Collinear corner, drop the middle vertex without a triangle
            vertices.remove(pos);
            num_fail = 0;
            continue;
        }

        if turn.signum() == orientation {
            // Needed for non-convex rings. Copies of the corners do not block the ear.
            let corners = [pts[prev], pts[curr], pts[next]];
            let any_point_inside = vertices.iter().any(|&i| {
                !corners.iter().any(|&c| same_point(pts[i], c))
                    && is_point_inside_triangle(pts[i], corners[0], corners[1], corners[2])
            });
            if !any_point_inside {
                triangles.push(TriangleIndex(prev, curr, next));
                vertices.remove(pos);
                num_fail = 0;
                continue;
            }
        }
        num_fail += 1;
        pos += 1;
    }

    Ok(triangles)
}

fn same_point(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS
}

fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Tests if point `p` is inside (or on the boundary of) the triangle `(a, b, c)`.
pub fn is_point_inside_triangle(p: (f64, f64), a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < -EPS || d2 < -EPS || d3 < -EPS;
    let has_pos = d1 > EPS || d2 > EPS || d3 > EPS;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(pts: &[(f64, f64)], tri: &[TriangleIndex]) -> f64 {
        tri.iter()
            .map(|t| signed_area(&[pts[t.0], pts[t.1], pts[t.2]]).abs())
            .sum()
    }

    #[test]
    fn test_triangulate_square() -> Result<()> {
        let pts = vec![(0., 0.), (1., 0.), (1., 1.), (0., 1.)];
        let tri = triangulate(&pts)?;
        assert_eq!(tri.len(), 2);
        assert!((area_of(&pts, &tri) - 1.).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_triangulate_l_shape_any_start() -> Result<()> {
        let mut pts = vec![(0., 0.), (1., 0.), (1., 1.), (2., 1.), (2., 2.), (0., 2.)];
        for _ in 0..pts.len() {
            pts.rotate_right(1);
            let tri = triangulate(&pts)?;
            assert_eq!(tri.len(), 4);
            assert!((area_of(&pts, &tri) - 3.).abs() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_triangulate_clockwise_ring() -> Result<()> {
        let pts = vec![(0., 0.), (0., 1.), (1., 1.), (1., 0.)];
        let tri = triangulate(&pts)?;
        assert_eq!(tri.len(), 2);
        for t in tri {
            assert!(signed_area(&[pts[t.0], pts[t.1], pts[t.2]]) < 0.);
        }
        Ok(())
    }

    #[test]
    fn test_triangulate_degenerate() {
        assert!(triangulate(&[(0., 0.), (1., 1.)]).is_err());
        assert!(triangulate(&[(0., 0.), (1., 1.), (2., 2.)]).is_err());
    }

    #[test]
    fn test_triangulate_collinear_ring_fails() {
        let res = triangulate(&[(0., 0.), (1., 0.), (3., 0.), (2., 0.)]);
        assert!(matches!(res, Err(ShadowError::InvalidGeometry(_))));
    }

    #[test]
    fn test_triangulate_repeated_points() -> Result<()> {
        // Consecutive copies and a copy of the first vertex at the end
        let pts = vec![(0., 0.), (1., 0.), (1., 0.), (1., 1.), (0., 1.), (0., 0.)];
        let tri = triangulate(&pts)?;
        assert_eq!(tri.len(), 2);
        assert!((area_of(&pts, &tri) - 1.).abs() < 1e-12);
        for t in tri {
            assert!(t.0 != t.1 && t.1 != t.2 && t.0 != t.2);
        }
        Ok(())
    }

    #[test]
    fn test_point_inside_triangle() {
        let (a, b, c) = ((0., 0.), (2., 0.), (0., 2.));
        assert!(is_point_inside_triangle((0.5, 0.5), a, b, c));
        assert!(is_point_inside_triangle((1., 0.), a, b, c));
        assert!(!is_point_inside_triangle((2., 2.), a, b, c));
    }
}
