//! Footprint data sources and sinks.
//!
//! The shadow core only consumes footprints; these are the collaborators that
//! fetch and persist them.

pub mod geojson;

pub use geojson::GeoJsonFile;

use crate::building::RawBuilding;
use crate::error::Result;
use crate::geom::footprint::Footprint;

/// Yields building footprints with optional height attributes.
pub trait FootprintSource {
    /// Returns one entry per source record, in source order.
    ///
    /// Fails with `DataUnavailable` when the underlying data cannot be read.
    /// A record that cannot be turned into a building is returned as an
    /// error entry so the caller decides whether to abort or skip it.
    fn load(&self) -> Result<Vec<Result<RawBuilding>>>;
}

/// Persists footprints together with their metadata.
pub trait FootprintSink {
    fn save(&self, buildings: &[RawBuilding]) -> Result<()>;
}

/// In-memory source, mostly for tests and demos.
impl FootprintSource for Vec<RawBuilding> {
    fn load(&self) -> Result<Vec<Result<RawBuilding>>> {
        Ok(self.iter().cloned().map(Ok).collect())
    }
}

/// Three sample buildings: two unit squares and a 1 x 3 rectangle.
pub fn sample_footprints() -> Result<Vec<RawBuilding>> {
    let rings = [
        vec![(0., 0.), (0., 1.), (1., 1.), (1., 0.), (0., 0.)],
        vec![(1., 1.), (1., 2.), (2., 2.), (2., 1.), (1., 1.)],
        vec![(2., 0.), (2., 3.), (3., 3.), (3., 0.), (2., 0.)],
    ];
    rings
        .into_iter()
        .enumerate()
        .map(|(i, ring)| Ok(RawBuilding::new(Footprint::new(ring)?).with_id(&(i + 1).to_string())))
        .collect()
}
