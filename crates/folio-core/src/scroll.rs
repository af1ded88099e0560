//! # Scroll Progress
//!
//! Normalizes the scroll position to [0, 1] and smooths it with a spring before it drives
//! the progress bar.

use serde::{Deserialize, Serialize};

/// Scroll position normalized to the scrollable length of the document.
///
/// A document that does not scroll reports 0.
pub fn scroll_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpringFilterConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub rest_delta: f32,
    pub rest_speed: f32,
}

impl Default for SpringFilterConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 30.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

/// A spring that chases a moving target, integrated per frame.
#[derive(Clone, Debug)]
pub struct SpringFilter {
    config: SpringFilterConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

const MAX_SUBSTEP: f32 = 1.0 / 240.0;

impl SpringFilter {
    pub fn new(config: SpringFilterConfig) -> Self {
        Self {
            config,
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advances the filter by `dt` seconds and returns the new value.
    pub fn step(&mut self, dt: f32) -> f32 {
        if self.is_at_rest() || dt <= 0.0 {
            return self.value;
        }

        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            let force = -self.config.stiffness * (self.value - self.target);
            let damping = -self.config.damping * self.velocity;
            let acceleration = (force + damping) / self.config.mass;
            self.velocity += acceleration * h;
            self.value += self.velocity * h;

            if (self.value - self.target).abs() < self.config.rest_delta
                && self.velocity.abs() < self.config.rest_speed
            {
                self.value = self.target;
                self.velocity = 0.0;
                break;
            }
        }
        self.value
    }
}
