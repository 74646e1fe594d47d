//! Extrusion of footprints into vertical prisms.
use crate::error::{Result, ShadowError};
use crate::geom::footprint::{Footprint, signed_area};
use crate::geom::mesh::{HasMesh, Mesh};
use crate::geom::point::Point;
use crate::geom::triangles::TriangleIndex;

/// Building footprint extruded from the ground to `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prism {
    pub height: f64,
    /// Closed ring at elevation 0.
    pub base: Vec<Point>,
    /// Closed ring at elevation `height`, same (x, y) as `base`.
    pub top: Vec<Point>,
    /// One quad per ring edge: (bottom_i, bottom_next, top_next, top_i).
    pub walls: Vec<[Point; 4]>,
    ring: Vec<(f64, f64)>,
}

impl Prism {
    /// Extrudes the footprint to `height`.
    ///
    /// Walls are made for every edge of the ring, including the edge that
    /// closes the ring back to its first vertex.
    pub fn extrude(footprint: &Footprint, height: f64) -> Result<Self> {
        if !height.is_finite() || height < 0. {
            return Err(ShadowError::geometry(format!("invalid building height: {height}")));
        }

        let base = footprint.points_at(0.);
        let top = footprint.points_at(height);

        let plan = footprint.vertices();
        let mut walls: Vec<[Point; 4]> = Vec::with_capacity(plan.len());
        for ths in 0..plan.len() {
            let mut nxt = ths + 1;
            if nxt >= plan.len() {
                nxt = 0;
            }
            let (x0, y0) = plan[ths];
            let (x1, y1) = plan[nxt];
            walls.push([
                Point::new(x0, y0, 0.),
                Point::new(x1, y1, 0.),
                Point::new(x1, y1, height),
                Point::new(x0, y0, height),
            ]);
        }

        Ok(Self {
            height,
            base,
            top,
            walls,
            ring: footprint.ring().to_vec(),
        })
    }

    /// Top-face vertices of the open ring (roof corners).
    pub fn apexes(&self) -> &[Point] {
        &self.top[..self.top.len() - 1]
    }
}

impl HasMesh for Prism {
    /// Closed surface mesh with outward-facing triangles.
    fn copy_mesh(&self) -> Result<Mesh> {
        let ccw = signed_area(&self.ring) > 0.;

        // Floor faces down, roof faces up
        let floor = Mesh::flat(&self.ring, 0.)?;
        let roof = Mesh::flat(&self.ring, self.height)?;
        let (floor, roof) = if ccw {
            (floor.flipped(), roof)
        } else {
            (floor, roof.flipped())
        };

        let mut mesh = floor;
        mesh.extend(roof);
        for wall in self.walls.iter() {
            let quad = Mesh {
                vertices: wall.to_vec(),
                faces: vec![TriangleIndex(0, 1, 2), TriangleIndex(0, 2, 3)],
            };
            mesh.extend(if ccw { quad } else { quad.flipped() });
        }

        Ok(mesh)
    }
}
