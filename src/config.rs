use crate::error::Result;
use crate::height::{AttributeOr, FixedHeight, HeightProvider, RandomHeight};
use crate::pipeline::FailurePolicy;
use crate::scene::SceneConfig;
use crate::shadow::ShadowMode;
use crate::sun::{SUN_DISTANCE, SunAngle};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Height assignment for buildings without a usable height attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum HeightStrategy {
    Fixed { value: f64 },
    Random { min: u32, max: u32, seed: u64 },
}

/// Configuration of a shadow run.
///
/// Every field has a default, so a JSON file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub sun: SunAngle,
    /// Distance of the sun marker from the origin.
    pub sun_distance: f64,
    pub mode: ShadowMode,
    pub heights: HeightStrategy,
    /// Prefer the height attribute of the data source when present.
    pub use_source_heights: bool,
    pub failure_policy: FailurePolicy,
    /// Log every vertex mapping at `debug` level.
    pub trace_vertices: bool,
    pub scene: SceneConfig,
}

impl ShadowConfig {
    pub fn new() -> Self {
        Self {
            sun: SunAngle {
                azimuth: 135.0,
                altitude: 45.0,
            },
            sun_distance: SUN_DISTANCE,
            mode: ShadowMode::Concatenate,
            heights: HeightStrategy::Random {
                min: 5,
                max: 20,
                seed: 0,
            },
            use_source_heights: true,
            failure_policy: FailurePolicy::Abort,
            trace_vertices: false,
            scene: SceneConfig::new(),
        }
    }

    /// Reads a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Builds the height provider described by this configuration.
    pub fn height_provider(&self) -> Box<dyn HeightProvider> {
        let inner: Box<dyn HeightProvider> = match self.heights {
            HeightStrategy::Fixed { value } => Box::new(FixedHeight(value)),
            HeightStrategy::Random { min, max, seed } => Box::new(RandomHeight::new(min, max, seed)),
        };
        if self.use_source_heights {
            Box::new(AttributeOr::new(inner))
        } else {
            inner
        }
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::RawBuilding;
    use crate::geom::footprint::Footprint;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ShadowConfig::new();
        assert_eq!(config.sun.azimuth, 135.0);
        assert_eq!(config.sun.altitude, 45.0);
        assert_eq!(config.sun_distance, 50.0);
        assert_eq!(config.mode, ShadowMode::Concatenate);
        assert_eq!(config.scene.ground_min, -10.0);
        assert_eq!(config.scene.ground_max, 15.0);
        assert!(!config.trace_vertices);
    }

    #[test]
    fn test_partial_json() -> Result<()> {
        let json = r#"{"sun": {"azimuth": 200, "altitude": 30}, "mode": "hull",
                       "heights": {"kind": "fixed", "value": 12.0}}"#;
        let config: ShadowConfig = serde_json::from_str(json)?;
        assert_eq!(config.sun.azimuth, 200.);
        assert_eq!(config.mode, ShadowMode::Hull);
        assert_eq!(config.heights, HeightStrategy::Fixed { value: 12.0 });
        assert_eq!(config.sun_distance, 50.0);
        Ok(())
    }

    #[test]
    fn test_from_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"failure_policy": "skip", "scene": {"ground_max": 40}}"#)?;
        let config = ShadowConfig::from_file(&path)?;
        assert_eq!(config.failure_policy, FailurePolicy::Skip);
        assert_eq!(config.scene.ground_max, 40.);
        assert_eq!(config.scene.ground_min, -10.);
        Ok(())
    }

    #[test]
    fn test_height_provider() {
        let raw = RawBuilding::new(Footprint::rectangle(0., 0., 1., 1.).unwrap());
        let mut config = ShadowConfig::new();
        config.heights = HeightStrategy::Fixed { value: 3. };
        let mut provider = config.height_provider();
        assert_eq!(provider.height_for(&raw.clone().with_height(8.)), 8.);
        config.use_source_heights = false;
        let mut provider = config.height_provider();
        assert_eq!(provider.height_for(&raw.with_height(8.)), 3.);
    }
}
