//! Threat fog: a slowly thickening ambient haze that closes in hard when a
//! zombie gets near.

use crate::config::FogParams;

#[derive(Debug, Clone, PartialEq)]
pub struct Fog {
    params: FogParams,
    base: f32,
    density: f32,
    caught: bool,
}

impl Fog {
    pub fn new(params: FogParams) -> Self {
        let base = params.base_density;
        Self {
            params,
            base,
            density: base,
            caught: false,
        }
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    /// True once [`Fog::close_in`] turned the fog red.
    pub fn is_caught(&self) -> bool {
        self.caught
    }

    /// Raises the ambient floor for `delta` seconds of survival.
    pub fn creep(&mut self, delta: f32) {
        self.base = (self.base + delta / self.params.creep_divisor).min(self.params.max_base_density);
    }

    /// Sets the density from the closest zombie, or the ambient floor when
    /// there is none.
    pub fn update(&mut self, min_distance: Option<f32>) {
        if self.caught {
            return;
        }
        self.density = match min_distance {
            Some(distance) => threat_density(&self.params, self.base, distance),
            None => self.base,
        };
    }

    pub fn close_in(&mut self) {
        self.caught = true;
        self.density = self.params.caught_density;
    }

    /// Fraction of light surviving `distance` world units of exponential
    /// squared fog, in `(0, 1]`.
    pub fn visibility(&self, distance: f32) -> f32 {
        let optical = self.density * distance;
        (-(optical * optical)).exp()
    }
}

/// `max(base, 1 / max(distance / scale, floor))`: never thinner than the
/// ambient base and never thicker than `1 / floor`.
pub fn threat_density(params: &FogParams, base: f32, distance: f32) -> f32 {
    let proximity = (distance / params.proximity_scale).max(params.proximity_floor);
    (1.0 / proximity).max(base)
}
