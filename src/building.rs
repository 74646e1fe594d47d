//! Buildings: a footprint with a height.
use crate::error::{Result, ShadowError};
use crate::geom::footprint::Footprint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Footprint as delivered by a data source, before a height is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBuilding {
    pub id: Option<String>,
    pub footprint: Footprint,
    /// Height attribute of the source, if it has one.
    pub height: Option<f64>,
}

impl RawBuilding {
    pub fn new(footprint: Footprint) -> Self {
        Self {
            id: None,
            footprint,
            height: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }
}

/// Footprint with a fixed height. Immutable during a shadow computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    footprint: Footprint,
    height: f64,
}

impl Building {
    /// Creates a building. A missing id is replaced by a random UUID.
    pub fn new(id: Option<String>, footprint: Footprint, height: f64) -> Result<Self> {
        if !height.is_finite() || height < 0. {
            return Err(ShadowError::geometry(format!("invalid building height: {height}")));
        }
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        Ok(Self {
            id,
            footprint,
            height,
        })
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Footprint {
        Footprint::rectangle(0., 0., 1., 1.).unwrap()
    }

    #[test]
    fn test_random_id_when_missing() -> Result<()> {
        let a = Building::new(None, square(), 5.)?;
        let b = Building::new(None, square(), 5.)?;
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 36);
        Ok(())
    }

    #[test]
    fn test_height_validation() {
        assert!(Building::new(Some("a".into()), square(), 0.).is_ok());
        assert!(Building::new(Some("a".into()), square(), -1.).is_err());
        assert!(Building::new(Some("a".into()), square(), f64::NAN).is_err());
    }

    #[test]
    fn test_raw_builder() {
        let raw = RawBuilding::new(square()).with_id("7").with_height(12.);
        assert_eq!(raw.id.as_deref(), Some("7"));
        assert_eq!(raw.height, Some(12.));
    }
}
