pub mod building;
pub mod config;
pub mod draw;
pub mod error;
pub mod geom;
pub mod height;
pub mod io;
pub mod pipeline;
pub mod scene;
pub mod shadow;
pub mod sun;

// Prelude
pub use building::{Building, RawBuilding};
pub use config::{HeightStrategy, ShadowConfig};
pub use error::{Result, ShadowError};
pub use geom::footprint::Footprint;
pub use geom::point::Point;
pub use geom::prism::Prism;
pub use geom::vector::Vector;
pub use pipeline::{FailurePolicy, Pipeline, PipelineReport};
pub use scene::{Scene, SceneConfig, build_scene};
pub use shadow::{ShadowMode, ShadowPolygon, ShadowProjector, project_shadow, project_shadow_with};
pub use sun::{SunAngle, shadow_length, sun_direction, sun_position_3d};
