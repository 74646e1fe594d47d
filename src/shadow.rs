//! Projection of building footprints into ground shadow polygons.
//!
//! Every footprint vertex is displaced directly away from the sun by the
//! shadow length `height / tan(altitude)`. The shadow polygon is the
//! displaced ring followed by the original ring. It approximates the swept
//! silhouette of the extruded building and is not guaranteed to be simple.
use crate::building::Building;
use crate::error::{Result, ShadowError};
use crate::geom::footprint::Footprint;
use crate::geom::hull::convex_hull;
use crate::sun::{SunAngle, shadow_length};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the shadow polygon is assembled from the displaced and original rings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMode {
    /// Displaced ring followed by the original ring (may self-intersect).
    #[default]
    Concatenate,
    /// Convex hull of both rings. Changes the outline of non-convex footprints.
    Hull,
}

/// One footprint vertex and where its shadow lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexMapping {
    pub index: usize,
    pub original: (f64, f64),
    pub shadow: (f64, f64),
}

/// Observer of vertex mappings made during projection.
pub trait ShadowTrace {
    fn vertex(&mut self, mapping: &VertexMapping);
}

/// Discards all mappings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl ShadowTrace for NoTrace {
    fn vertex(&mut self, _mapping: &VertexMapping) {}
}

/// Emits each mapping as a `debug` tracing event.
#[derive(Debug, Clone, Default)]
pub struct LogTrace {
    pub building: String,
}

impl ShadowTrace for LogTrace {
    fn vertex(&mut self, m: &VertexMapping) {
        debug!(
            building = %self.building,
            index = m.index,
            "Building vertex: ({}, {}) -> Shadow vertex: ({}, {})",
            m.original.0,
            m.original.1,
            m.shadow.0,
            m.shadow.1
        );
    }
}

/// Collects mappings for later inspection or ordered flushing.
#[derive(Debug, Clone, Default)]
pub struct BufferedTrace {
    pub mappings: Vec<VertexMapping>,
}

impl ShadowTrace for BufferedTrace {
    fn vertex(&mut self, mapping: &VertexMapping) {
        self.mappings.push(*mapping);
    }
}

impl BufferedTrace {
    /// Replays the buffered mappings into another trace.
    pub fn flush_into(&mut self, trace: &mut dyn ShadowTrace) {
        for m in self.mappings.drain(..) {
            trace.vertex(&m);
        }
    }
}

/// Ground polygon derived from a footprint, a height and a sun angle.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPolygon {
    vertices: Vec<(f64, f64)>,
    num_displaced: usize,
    /// Shadow length used for the displacement.
    pub length: f64,
    pub mode: ShadowMode,
}

impl ShadowPolygon {
    /// Full vertex sequence of the polygon.
    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// The displaced copy of the footprint ring (concatenate mode), or the
    /// whole hull ring (hull mode).
    pub fn displaced(&self) -> &[(f64, f64)] {
        &self.vertices[..self.num_displaced]
    }

    pub fn first(&self) -> (f64, f64) {
        self.vertices[0]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Projects the shadow of a building, with the default mode and no tracing.
pub fn project_shadow(
    footprint: &Footprint,
    height: f64,
    azimuth_deg: f64,
    altitude_deg: f64,
) -> Result<ShadowPolygon> {
    let sun = SunAngle {
        azimuth: azimuth_deg,
        altitude: altitude_deg,
    };
    project_shadow_with(footprint, height, &sun, ShadowMode::default(), &mut NoTrace)
}

/// Projects the shadow of a building.
///
/// Fails with `InvalidSunAngle` when the altitude is outside (0, 90] and with
/// `InvalidGeometry` for a negative or non-finite height. A zero shadow length
/// (zero height or sun at zenith) yields a shadow coincident with the footprint.
pub fn project_shadow_with(
    footprint: &Footprint,
    height: f64,
    sun: &SunAngle,
    mode: ShadowMode,
    trace: &mut dyn ShadowTrace,
) -> Result<ShadowPolygon> {
    sun.validate()?;
    if !height.is_finite() || height < 0. {
        return Err(ShadowError::geometry(format!("invalid building height: {height}")));
    }
    let length = shadow_length(height, sun.altitude)?;
    let (dx, dy) = sun.direction();

    let ring = footprint.ring();
    let mut displaced: Vec<(f64, f64)> = Vec::with_capacity(ring.len());
    for (index, &(x, y)) in ring.iter().enumerate() {
        let shadow = (x - length * dx, y - length * dy);
        trace.vertex(&VertexMapping {
            index,
            original: (x, y),
            shadow,
        });
        displaced.push(shadow);
    }

    let polygon = match mode {
        ShadowMode::Concatenate => {
            let num_displaced = displaced.len();
            let mut vertices = displaced;
            vertices.extend_from_slice(ring);
            ShadowPolygon {
                vertices,
                num_displaced,
                length,
                mode,
            }
        }
        ShadowMode::Hull if length == 0. => ShadowPolygon {
            vertices: ring.to_vec(),
            num_displaced: ring.len(),
            length,
            mode,
        },
        ShadowMode::Hull => {
            let mut all = displaced;
            all.extend_from_slice(ring);
            let vertices = convex_hull(&all);
            ShadowPolygon {
                num_displaced: vertices.len(),
                vertices,
                length,
                mode,
            }
        }
    };

    Ok(polygon)
}

/// Projects shadows of many buildings under one sun.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowProjector {
    pub mode: ShadowMode,
    /// Log every vertex mapping at `debug` level.
    pub trace_vertices: bool,
}

impl ShadowProjector {
    pub fn new(mode: ShadowMode) -> Self {
        Self {
            mode,
            trace_vertices: false,
        }
    }

    pub fn project(&self, building: &Building, sun: &SunAngle) -> Result<ShadowPolygon> {
        if self.trace_vertices {
            let mut trace = LogTrace {
                building: building.id.clone(),
            };
            project_shadow_with(building.footprint(), building.height(), sun, self.mode, &mut trace)
        } else {
            project_shadow_with(building.footprint(), building.height(), sun, self.mode, &mut NoTrace)
        }
    }

    /// Projects all buildings in parallel. Results follow the input order.
    ///
    /// Vertex traces are buffered per building and flushed in input order.
    pub fn project_all(&self, buildings: &[Building], sun: &SunAngle) -> Vec<Result<ShadowPolygon>> {
        let results: Vec<(Result<ShadowPolygon>, BufferedTrace)> = buildings
            .par_iter()
            .map(|b| {
                let mut buffer = BufferedTrace::default();
                let res = if self.trace_vertices {
                    project_shadow_with(b.footprint(), b.height(), sun, self.mode, &mut buffer)
                } else {
                    project_shadow_with(b.footprint(), b.height(), sun, self.mode, &mut NoTrace)
                };
                (res, buffer)
            })
            .collect();

        results
            .into_iter()
            .zip(buildings.iter())
            .map(|((res, mut buffer), b)| {
                if self.trace_vertices {
                    let mut log = LogTrace {
                        building: b.id.clone(),
                    };
                    buffer.flush_into(&mut log);
                }
                res
            })
            .collect()
    }
}
