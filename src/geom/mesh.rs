use crate::error::Result;
use crate::geom::point::Point;
use crate::geom::triangles::{TriangleIndex, triangulate};
use crate::geom::vector::Vector;

/// Triangle mesh handed to the drawing layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub faces: Vec<TriangleIndex>,
}

impl Mesh {
    /// Appends another mesh, shifting its face indices.
    pub fn extend(&mut self, other: Mesh) {
        let n = self.vertices.len();
        self.vertices.extend(other.vertices);
        self.faces.extend(other.faces.into_iter().map(|t| t.offset(n)));
    }

    /// Flat horizontal mesh of a ring at elevation `z`.
    ///
    /// A closing vertex equal to the first one is ignored.
    pub fn flat(ring: &[(f64, f64)], z: f64) -> Result<Self> {
        let open = match (ring.first(), ring.last()) {
            (Some(f), Some(l)) if ring.len() > 1 && f == l => &ring[..ring.len() - 1],
            _ => ring,
        };
        let faces = triangulate(open)?;
        let vertices = open.iter().map(|&(x, y)| Point::new(x, y, z)).collect();
        Ok(Self { vertices, faces })
    }

    /// Per-vertex normals from the winding of the adjacent triangles,
    /// weighted by triangle area. Unused vertices point up.
    pub fn vertex_normals(&self) -> Vec<Vector> {
        let mut sums = vec![Vector::new(0., 0., 0.); self.vertices.len()];
        for t in self.faces.iter() {
            let (a, b, c) = (self.vertices[t.0], self.vertices[t.1], self.vertices[t.2]);
            let n = (b - a).cross(c - a);
            for i in [t.0, t.1, t.2] {
                sums[i] = sums[i] + n;
            }
        }
        sums.iter()
            .map(|n| n.normalize().unwrap_or(Vector::new(0., 0., 1.)))
            .collect()
    }

    /// Same mesh with reversed triangle winding.
    pub fn flipped(mut self) -> Self {
        for t in self.faces.iter_mut() {
            *t = TriangleIndex(t.0, t.2, t.1);
        }
        self
    }
}

pub trait HasMesh {
    fn copy_mesh(&self) -> Result<Mesh>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_skips_closing_vertex() -> Result<()> {
        let ring = vec![(0., 0.), (1., 0.), (1., 1.), (0., 1.), (0., 0.)];
        let mesh = Mesh::flat(&ring, 2.)?;
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 2);
        assert!(mesh.vertices.iter().all(|p| p.z == 2.));
        Ok(())
    }

    #[test]
    fn test_extend_offsets_faces() -> Result<()> {
        let ring = vec![(0., 0.), (1., 0.), (1., 1.)];
        let mut mesh = Mesh::flat(&ring, 0.)?;
        mesh.extend(Mesh::flat(&ring, 1.)?);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.faces[1], mesh.faces[0].offset(3));
        Ok(())
    }

    #[test]
    fn test_vertex_normals_follow_winding() -> Result<()> {
        let ring = vec![(0., 0.), (1., 0.), (1., 1.), (0., 1.)];
        let up = Mesh::flat(&ring, 0.)?;
        assert!(up.vertex_normals().iter().all(|n| *n == Vector::new(0., 0., 1.)));
        let down = up.flipped();
        assert!(down.vertex_normals().iter().all(|n| *n == Vector::new(0., 0., -1.)));
        Ok(())
    }
}
