//! Assembly of the drawable scene: prisms, shadows, sun, rays, labels, ground.
use crate::error::{Result, ShadowError};
use crate::geom::footprint::Footprint;
use crate::geom::mesh::{HasMesh, Mesh};
use crate::geom::point::Point;
use crate::geom::prism::Prism;
use crate::geom::triangles::TriangleIndex;
use crate::shadow::{ShadowMode, ShadowPolygon};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Ground plane extent, same on both axes.
    pub ground_min: f64,
    pub ground_max: f64,
}

impl SceneConfig {
    pub fn new() -> Self {
        Self {
            ground_min: -10.0,
            ground_max: 15.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat shadow surface at elevation 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowSurface {
    /// Outline in the same order as the shadow polygon.
    pub vertices: Vec<Point>,
    mode: ShadowMode,
    num_displaced: usize,
}

impl ShadowSurface {
    pub fn from_polygon(shadow: &ShadowPolygon) -> Self {
        Self {
            vertices: shadow
                .vertices()
                .iter()
                .map(|&(x, y)| Point::ground(x, y))
                .collect(),
            mode: shadow.mode,
            num_displaced: shadow.displaced().len(),
        }
    }

    fn ring(pts: &[Point]) -> Vec<(f64, f64)> {
        pts.iter().map(|p| p.xy()).collect()
    }
}

impl HasMesh for ShadowSurface {
    /// Hull shadows are meshed as one convex ring.
    ///
    /// A concatenated outline usually crosses itself, so its area is meshed
    /// as the footprint, the displaced footprint and the quad swept by every
    /// footprint edge between the two.
    fn copy_mesh(&self) -> Result<Mesh> {
        if self.mode == ShadowMode::Hull {
            return Mesh::flat(&Self::ring(&self.vertices), 0.);
        }

        let (displaced, footprint) = self.vertices.split_at(self.num_displaced);
        if displaced.len() != footprint.len() {
            return Err(ShadowError::geometry(format!(
                "shadow outline has {} displaced and {} footprint vertices",
                displaced.len(),
                footprint.len()
            )));
        }

        let mut mesh = Mesh::flat(&Self::ring(footprint), 0.)?;
        if displaced.iter().zip(footprint).all(|(d, f)| d.is_close(f)) {
            return Ok(mesh);
        }
        mesh.extend(Mesh::flat(&Self::ring(displaced), 0.)?);
        for i in 0..footprint.len() - 1 {
            mesh.extend(Mesh {
                vertices: vec![footprint[i], footprint[i + 1], displaced[i + 1], displaced[i]],
                faces: vec![TriangleIndex(0, 1, 2), TriangleIndex(0, 2, 3)],
            });
        }

        Ok(mesh)
    }
}

/// Line from the sun to one roof corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunRay {
    pub building: usize,
    pub from: Point,
    pub to: Point,
}

/// Shadow length annotation placed at the first shadow vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLabel {
    pub building: usize,
    pub anchor: Point,
    pub length: f64,
    pub text: String,
}

/// Bounded ground quad, for visual context only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub min: f64,
    pub max: f64,
}

impl GroundPlane {
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::ground(self.min, self.min),
            Point::ground(self.max, self.min),
            Point::ground(self.max, self.max),
            Point::ground(self.min, self.max),
        ]
    }
}

impl HasMesh for GroundPlane {
    fn copy_mesh(&self) -> Result<Mesh> {
        Ok(Mesh {
            vertices: self.corners().to_vec(),
            faces: vec![TriangleIndex(0, 1, 2), TriangleIndex(0, 2, 3)],
        })
    }
}

/// Immutable snapshot handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub prisms: Vec<Prism>,
    pub shadows: Vec<ShadowSurface>,
    pub sun: Point,
    pub rays: Vec<SunRay>,
    pub labels: Vec<ShadowLabel>,
    pub ground: GroundPlane,
}

impl Scene {
    pub fn num_buildings(&self) -> usize {
        self.prisms.len()
    }
}

/// Builds the scene from parallel sequences: index `i` of `footprints`,
/// `heights` and `shadows` describes one building.
pub fn build_scene(
    footprints: &[Footprint],
    heights: &[f64],
    shadows: &[ShadowPolygon],
    sun_position: Point,
    config: &SceneConfig,
) -> Result<Scene> {
    if footprints.len() != heights.len() || footprints.len() != shadows.len() {
        return Err(ShadowError::geometry(format!(
            "scene inputs differ in length: {} footprints, {} heights, {} shadows",
            footprints.len(),
            heights.len(),
            shadows.len()
        )));
    }

    let mut prisms: Vec<Prism> = Vec::with_capacity(footprints.len());
    let mut surfaces: Vec<ShadowSurface> = Vec::with_capacity(shadows.len());
    let mut rays: Vec<SunRay> = Vec::new();
    let mut labels: Vec<ShadowLabel> = Vec::with_capacity(shadows.len());

    for (i, ((fp, &height), shadow)) in footprints.iter().zip(heights).zip(shadows).enumerate() {
        let prism = Prism::extrude(fp, height)?;

        for &apex in prism.apexes() {
            rays.push(SunRay {
                building: i,
                from: sun_position,
                to: apex,
            });
        }
        prisms.push(prism);

        surfaces.push(ShadowSurface::from_polygon(shadow));

        let anchor = Point::ground(shadow.first().0, shadow.first().1);
        let length = anchor.distance(&Point::ground(fp.first().0, fp.first().1));
        labels.push(ShadowLabel {
            building: i,
            anchor,
            length,
            text: format!("{length:.2}m"),
        });
    }

    Ok(Scene {
        prisms,
        shadows: surfaces,
        sun: sun_position,
        rays,
        labels,
        ground: GroundPlane {
            min: config.ground_min,
            max: config.ground_max,
        },
    })
}
