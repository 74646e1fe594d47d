//! Height assignment strategies for buildings without a known height.
use crate::building::RawBuilding;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies a height for each building, in input order.
pub trait HeightProvider {
    fn height_for(&mut self, building: &RawBuilding) -> f64;
}

/// Same height for every building.
#[derive(Debug, Clone, Copy)]
pub struct FixedHeight(pub f64);

impl HeightProvider for FixedHeight {
    fn height_for(&mut self, _building: &RawBuilding) -> f64 {
        self.0
    }
}

/// Whole-meter heights drawn uniformly from `[min, max]` with a seeded generator.
#[derive(Debug, Clone)]
pub struct RandomHeight {
    min: u32,
    max: u32,
    rng: StdRng,
}

impl RandomHeight {
    /// Bounds are swapped if given in reverse order.
    pub fn new(min: u32, max: u32, seed: u64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl HeightProvider for RandomHeight {
    fn height_for(&mut self, _building: &RawBuilding) -> f64 {
        self.rng.gen_range(self.min..=self.max) as f64
    }
}

/// Uses the source height attribute when it is a positive number,
/// otherwise asks the fallback provider.
#[derive(Debug, Clone)]
pub struct AttributeOr<P: HeightProvider> {
    pub fallback: P,
}

impl<P: HeightProvider> AttributeOr<P> {
    pub fn new(fallback: P) -> Self {
        Self { fallback }
    }
}

impl<P: HeightProvider> HeightProvider for AttributeOr<P> {
    fn height_for(&mut self, building: &RawBuilding) -> f64 {
        match building.height {
            Some(h) if h.is_finite() && h > 0. => h,
            _ => self.fallback.height_for(building),
        }
    }
}

impl<P: HeightProvider + ?Sized> HeightProvider for Box<P> {
    fn height_for(&mut self, building: &RawBuilding) -> f64 {
        (**self).height_for(building)
    }
}
