//! Building footprints: closed 2D rings on the ground plane.
use crate::error::{Result, ShadowError};
use crate::geom::point::Point;
use serde::{Deserialize, Serialize};

/// Ordered, closed ring of (x, y) vertices. The first and last vertex coincide.
///
/// Simplicity (no self-intersection) is not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct Footprint {
    ring: Vec<(f64, f64)>,
}

impl Footprint {
    /// Creates a footprint from a ring of vertices.
    ///
    /// An open ring (first != last) gets closed by repeating the first vertex.
    /// Fails if the ring has fewer than 3 distinct vertices.
    pub fn new(mut ring: Vec<(f64, f64)>) -> Result<Self> {
        let is_open = match (ring.first(), ring.last()) {
            (Some(&first), Some(&last)) => ring.len() > 1 && !same_vertex(first, last),
            _ => false,
        };
        if is_open {
            ring.push(ring[0]);
        }
        Self::new_strict(ring)
    }

    /// Creates a footprint from a ring that must already be closed.
    pub fn new_strict(ring: Vec<(f64, f64)>) -> Result<Self> {
        if ring.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(ShadowError::geometry("footprint has non-finite coordinates"));
        }
        let (first, last) = match (ring.first(), ring.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return Err(ShadowError::geometry("footprint is empty")),
        };
        if ring.len() < 2 || !same_vertex(first, last) {
            return Err(ShadowError::geometry("footprint ring is not closed"));
        }
        let num_distinct = count_distinct(&ring[..ring.len() - 1]);
        if num_distinct < 3 {
            return Err(ShadowError::geometry(format!(
                "footprint needs at least 3 distinct vertices, got {num_distinct}"
            )));
        }

        Ok(Self { ring })
    }

    /// Axis-aligned rectangle with its min corner at `(x0, y0)`.
    pub fn rectangle(x0: f64, y0: f64, width: f64, depth: f64) -> Result<Self> {
        Self::new(vec![
            (x0, y0),
            (x0, y0 + depth),
            (x0 + width, y0 + depth),
            (x0 + width, y0),
            (x0, y0),
        ])
    }

    /// Closed ring, including the repeated first vertex.
    pub fn ring(&self) -> &[(f64, f64)] {
        &self.ring
    }

    /// Ring without the closing vertex.
    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.ring[..self.ring.len() - 1]
    }

    /// Closed ring lifted to elevation `z`.
    pub fn points_at(&self, z: f64) -> Vec<Point> {
        self.ring.iter().map(|&(x, y)| Point::new(x, y, z)).collect()
    }

    pub fn first(&self) -> (f64, f64) {
        self.ring[0]
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Shoelace area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.ring)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

impl TryFrom<Vec<(f64, f64)>> for Footprint {
    type Error = ShadowError;

    fn try_from(ring: Vec<(f64, f64)>) -> Result<Self> {
        Self::new(ring)
    }
}

impl From<Footprint> for Vec<(f64, f64)> {
    fn from(fp: Footprint) -> Self {
        fp.ring
    }
}

pub(crate) fn same_vertex(a: (f64, f64), b: (f64, f64)) -> bool {
    Point::ground(a.0, a.1).is_close(&Point::ground(b.0, b.1))
}

fn count_distinct(pts: &[(f64, f64)]) -> usize {
    let mut seen: Vec<(f64, f64)> = Vec::new();
    for &p in pts {
        if !seen.iter().any(|&q| same_vertex(p, q)) {
            seen.push(p);
        }
    }
    seen.len()
}

/// Shoelace formula over a ring. Works for open or closed rings.
pub fn signed_area(ring: &[(f64, f64)]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.;
    }
    let mut acc = 0.;
    for i in 0..n {
        let (x0, y0) = ring[i];
        let (x1, y1) = ring[(i + 1) % n];
        acc += x0 * y1 - x1 * y0;
    }
    0.5 * acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<(f64, f64)> {
        vec![(0., 0.), (0., 1.), (1., 1.), (1., 0.), (0., 0.)]
    }

    #[test]
    fn test_closed_ring_kept_as_is() -> Result<()> {
        let fp = Footprint::new(unit_square())?;
        assert_eq!(fp.len(), 5);
        assert_eq!(fp.vertices().len(), 4);
        assert_eq!(fp.first(), (0., 0.));
        Ok(())
    }

    #[test]
    fn test_open_ring_gets_closed() -> Result<()> {
        let fp = Footprint::new(vec![(0., 0.), (0., 1.), (1., 1.)])?;
        assert_eq!(fp.ring(), &[(0., 0.), (0., 1.), (1., 1.), (0., 0.)]);
        Ok(())
    }

    #[test]
    fn test_strict_rejects_open_ring() {
        let res = Footprint::new_strict(vec![(0., 0.), (0., 1.), (1., 1.)]);
        assert!(matches!(res, Err(ShadowError::InvalidGeometry(_))));
    }

    #[test]
    fn test_too_few_distinct_vertices() {
        let res = Footprint::new(vec![(0., 0.), (1., 1.), (1., 1.), (0., 0.)]);
        assert!(matches!(res, Err(ShadowError::InvalidGeometry(_))));
        assert!(Footprint::new(vec![]).is_err());
        assert!(Footprint::new(vec![(2., 2.)]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let res = Footprint::new(vec![(0., 0.), (f64::NAN, 1.), (1., 1.), (0., 0.)]);
        assert!(res.is_err());
    }

    #[test]
    fn test_area() -> Result<()> {
        // Clockwise unit square
        let fp = Footprint::new(unit_square())?;
        assert!((fp.signed_area() + 1.).abs() < 1e-12);
        assert!((fp.area() - 1.).abs() < 1e-12);
        let rect = Footprint::rectangle(2., 0., 1., 3.)?;
        assert!((rect.area() - 3.).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_points_at() -> Result<()> {
        let fp = Footprint::new(unit_square())?;
        let top = fp.points_at(4.);
        assert_eq!(top.len(), 5);
        assert!(top.iter().all(|p| p.z == 4.));
        Ok(())
    }

    #[test]
    fn test_serde_validates() {
        let ok: std::result::Result<Footprint, _> =
            serde_json::from_str("[[0,0],[0,1],[1,1],[1,0],[0,0]]");
        assert!(ok.is_ok());
        let bad: std::result::Result<Footprint, _> = serde_json::from_str("[[0,0],[0,0]]");
        assert!(bad.is_err());
    }
}
