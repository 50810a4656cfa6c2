//! Hover-aware marquee scrolling for the contact page.
//!
//! The strip drifts left at a base speed. While hovered it eases down to a
//! stop at `decel_rate`; once released it eases back up at `accel_rate`.
//! The offset loops through `(-loop_distance, 0]` so duplicated content can
//! tile seamlessly.

use wasm_bindgen::prelude::*;

/// Speeds in px/s, rates in px/s², distances in px.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MarqueeConfig {
    pub base_speed: f64,
    pub decel_rate: f64,
    pub accel_rate: f64,
    pub loop_distance: f64,
}

/// The contact page's email strip.
impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            base_speed: 50.0,
            decel_rate: 50.0 / 3.0,
            accel_rate: 80.0,
            loop_distance: 1000.0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MarqueeState {
    pub speed: f64,
    pub offset: f64,
}

impl MarqueeState {
    /// Already moving at full speed, offset at the loop start.
    #[must_use]
    pub fn new(config: &MarqueeConfig) -> Self {
        Self {
            speed: config.base_speed.max(0.0),
            offset: 0.0,
        }
    }

    /// Advance by `delta_s` seconds and return the new offset.
    pub fn step(&mut self, config: &MarqueeConfig, delta_s: f64, hovered: bool) -> f64 {
        let delta = delta_s.max(0.0);
        let (target, rate) = if hovered {
            (0.0, config.decel_rate)
        } else {
            (config.base_speed.max(0.0), config.accel_rate)
        };
        let max_change = (rate * delta).max(0.0);
        let diff = target - self.speed;
        let next = if diff.abs() <= max_change {
            target
        } else {
            self.speed + max_change.copysign(diff)
        };
        self.speed = next.max(0.0).min(config.base_speed.max(0.0));
        self.offset = wrap_offset(self.offset - self.speed * delta, config.loop_distance);
        self.offset
    }
}

/// Fold `offset` into `(-loop_distance, 0]`.
#[must_use]
pub fn wrap_offset(offset: f64, loop_distance: f64) -> f64 {
    if loop_distance <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    let folded = offset % loop_distance;
    if folded > 0.0 {
        folded - loop_distance
    } else if folded <= -loop_distance {
        folded + loop_distance
    } else {
        folded
    }
}

/// JS handle: one marquee strip driven from `requestAnimationFrame`.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct Marquee {
    config: MarqueeConfig,
    state: MarqueeState,
}

#[wasm_bindgen]
impl Marquee {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(base_speed: f64, decel_rate: f64, accel_rate: f64, loop_distance: f64) -> Marquee {
        let config = MarqueeConfig {
            base_speed,
            decel_rate,
            accel_rate,
            loop_distance,
        };
        Self {
            config,
            state: MarqueeState::new(&config),
        }
    }

    pub fn step(&mut self, delta_s: f64, hovered: bool) -> f64 {
        self.state.step(&self.config, delta_s, hovered)
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.state.offset
    }
}
