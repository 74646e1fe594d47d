//! End-to-end run: footprints -> heights -> shadows -> scene.
use crate::building::Building;
use crate::config::ShadowConfig;
use crate::error::{Result, ShadowError};
use crate::geom::footprint::Footprint;
use crate::io::FootprintSource;
use crate::scene::{Scene, build_scene};
use crate::shadow::{ShadowPolygon, ShadowProjector};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What to do when one building fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the run at the first failing building.
    #[default]
    Abort,
    /// Leave the building out of the scene and report it.
    Skip,
}

/// Building left out of a run.
#[derive(Debug)]
pub struct SkippedBuilding {
    /// Position in the source sequence.
    pub index: usize,
    pub id: Option<String>,
    pub error: ShadowError,
}

#[derive(Debug)]
pub struct PipelineReport {
    pub buildings: Vec<Building>,
    pub shadows: Vec<ShadowPolygon>,
    pub scene: Scene,
    pub skipped: Vec<SkippedBuilding>,
}

impl PipelineReport {
    pub fn heights(&self) -> Vec<f64> {
        self.buildings.iter().map(|b| b.height()).collect()
    }
}

pub struct Pipeline {
    pub config: ShadowConfig,
}

impl Pipeline {
    pub fn new(config: ShadowConfig) -> Self {
        Self { config }
    }

    /// Runs the whole pipeline on the footprints of `source`.
    ///
    /// An invalid sun angle or a failing source always aborts the run.
    /// Per-building failures follow the configured `FailurePolicy`.
    pub fn run(&self, source: &dyn FootprintSource) -> Result<PipelineReport> {
        let sun = self.config.sun;
        sun.validate()?;

        info!("Loading building data...");
        let records = source.load()?;
        info!("Loaded {} buildings", records.len());

        let mut skipped: Vec<SkippedBuilding> = Vec::new();

        info!("Assigning building heights...");
        let mut provider = self.config.height_provider();
        let mut origins: Vec<(usize, Option<String>)> = Vec::with_capacity(records.len());
        let mut buildings: Vec<Building> = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            let raw = match record {
                Ok(raw) => raw,
                Err(e) => {
                    self.handle_failure(&mut skipped, i, None, e)?;
                    continue;
                }
            };
            let height = provider.height_for(&raw);
            match Building::new(raw.id.clone(), raw.footprint, height) {
                Ok(b) => {
                    origins.push((i, raw.id));
                    buildings.push(b);
                }
                Err(e) => self.handle_failure(&mut skipped, i, raw.id, e)?,
            }
        }
        info!(
            "Building heights: {:?}",
            buildings.iter().map(|b| b.height()).collect::<Vec<_>>()
        );

        info!("Calculating shadows...");
        let projector = ShadowProjector {
            mode: self.config.mode,
            trace_vertices: self.config.trace_vertices,
        };
        let results = projector.project_all(&buildings, &sun);

        let mut kept: Vec<Building> = Vec::with_capacity(buildings.len());
        let mut shadows: Vec<ShadowPolygon> = Vec::with_capacity(buildings.len());
        for ((b, res), (i, id)) in buildings.into_iter().zip(results).zip(origins) {
            match res {
                Ok(shadow) => {
                    kept.push(b);
                    shadows.push(shadow);
                }
                Err(e) => self.handle_failure(&mut skipped, i, id, e)?,
            }
        }
        for (b, s) in kept.iter().zip(shadows.iter()) {
            info!("Shadow of building {}: {} vertices, length {:.2}", b.id, s.len(), s.length);
        }

        let footprints: Vec<Footprint> = kept.iter().map(|b| b.footprint().clone()).collect();
        let heights: Vec<f64> = kept.iter().map(|b| b.height()).collect();
        let sun_position = sun.position(self.config.sun_distance);
        let scene = build_scene(&footprints, &heights, &shadows, sun_position, &self.config.scene)?;
        info!(
            "Scene ready: {} buildings, {} rays, {} skipped",
            scene.num_buildings(),
            scene.rays.len(),
            skipped.len()
        );

        Ok(PipelineReport {
            buildings: kept,
            shadows,
            scene,
            skipped,
        })
    }

    fn handle_failure(
        &self,
        skipped: &mut Vec<SkippedBuilding>,
        index: usize,
        id: Option<String>,
        error: ShadowError,
    ) -> Result<()> {
        match self.config.failure_policy {
            FailurePolicy::Abort => Err(error),
            FailurePolicy::Skip => {
                warn!("Skipping building {index} ({id:?}): {error}");
                skipped.push(SkippedBuilding { index, id, error });
                Ok(())
            }
        }
    }
}
