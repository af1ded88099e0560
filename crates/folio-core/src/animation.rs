//! # Animation Primitives
//!
//! Keyframe tracks, easing curves and spring baking shared by every moving value.
//!
//! ## Key Types
//! - `EasingType`: The easing curves a tween can use.
//! - `SpringConfig`: Physical parameters of a spring transition.
//! - `Animated<T>`: A keyframe track built on `keyframe::AnimationSequence`.

use keyframe::{AnimationSequence, EasingFunction, Keyframe};
use serde::Serialize;
use std::fmt;

/// Easing curves available to tweens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
        }
    }
}

impl EasingType {
    pub fn eval(&self, x: f32) -> f32 {
        self.y(x as f64) as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    pub stiffness: f32, // Tension
    pub damping: f32,   // Friction
    pub mass: f32,
    pub velocity: f32, // Initial velocity
    /// Distance from the target below which the spring may settle.
    pub rest_delta: f32,
    /// Speed below which the spring may settle.
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            velocity: 0.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// Damping ratio; 1.0 is critically damped.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

#[derive(Clone)]
pub struct Animated<T>
where
    T: Clone + keyframe::CanTween + Default,
{
    pub raw_keyframes: Vec<(T, f64, EasingType)>,
    pub sequence: AnimationSequence<T>,
    pub current_value: T,
}

impl<T> Animated<T>
where
    T: Clone + keyframe::CanTween + Default,
{
    pub fn new(initial: T) -> Self {
        let raw = vec![(initial.clone(), 0.0, EasingType::Linear)];
        let kf = Keyframe::new(initial.clone(), 0.0, EasingType::Linear);

        Self {
            sequence: AnimationSequence::from(vec![kf]),
            raw_keyframes: raw,
            current_value: initial,
        }
    }

    pub fn add_keyframe(&mut self, target: T, duration: f64, easing: EasingType) {
        let current_end_time = self.sequence.duration();
        let new_time = current_end_time + duration;

        self.raw_keyframes.push((target, new_time, easing));

        // Rebuild sequence
        let frames: Vec<Keyframe<T>> = self
            .raw_keyframes
            .iter()
            .map(|(val, time, ease_type)| Keyframe::new(val.clone(), *time, *ease_type))
            .collect();

        self.sequence = AnimationSequence::from(frames);
    }

    /// Keeps the last keyframe value for `duration` seconds.
    pub fn hold(&mut self, duration: f64) {
        if duration <= 0.0 {
            return;
        }
        let last = self.end_value();
        self.add_keyframe(last, duration, EasingType::Linear);
    }

    /// Value of the last keyframe, i.e. where the track comes to rest.
    pub fn end_value(&self) -> T {
        self.raw_keyframes
            .last()
            .map(|(v, _, _)| v.clone())
            .unwrap_or_else(|| self.current_value.clone())
    }

    pub fn duration(&self) -> f64 {
        self.sequence.duration()
    }

    pub fn update(&mut self, time: f64) {
        self.sequence.advance_to(time);
        self.current_value = self.sequence.now();
    }
}

impl Animated<f32> {
    pub fn add_spring(&mut self, target: f32, config: SpringConfig) {
        let start = self.end_value();
        self.add_spring_with_start(start, target, config);
    }

    pub fn add_spring_with_start(&mut self, start: f32, target: f32, config: SpringConfig) {
        if (self.end_value() - start).abs() > 0.0001 {
            self.add_keyframe(start, 0.0, EasingType::Linear);
        }

        let frames = solve_spring(start, target, config);

        let mut previous_time = 0.0;
        for (value, time) in frames {
            self.add_keyframe(value, time - previous_time, EasingType::Linear);
            previous_time = time;
        }
    }
}

const BAKE_STEP: f32 = 1.0 / 60.0;
const MAX_SPRING_DURATION: f64 = 10.0;

/// Integrates a spring from `start` to `end` at 60 Hz, returning `(value, time)` samples.
///
/// The last sample always lands exactly on `end`.
pub fn solve_spring(start: f32, end: f32, config: SpringConfig) -> Vec<(f32, f64)> {
    let mut frames = Vec::new();
    if (start - end).abs() < f32::EPSILON && config.velocity == 0.0 {
        return frames;
    }

    let mut t = 0.0;
    let mut current = start;
    let mut velocity = config.velocity;

    loop {
        let force = -config.stiffness * (current - end);
        let damping = -config.damping * velocity;
        let acceleration = (force + damping) / config.mass;

        velocity += acceleration * BAKE_STEP;
        current += velocity * BAKE_STEP;
        t += BAKE_STEP as f64;

        let settled =
            (current - end).abs() < config.rest_delta && velocity.abs() < config.rest_speed;
        if settled || t > MAX_SPRING_DURATION {
            frames.push((end, t));
            break;
        }
        frames.push((current, t));
    }
    frames
}

/// Time in seconds a spring needs to settle between two values.
pub fn spring_settle_time(start: f32, end: f32, config: SpringConfig) -> f64 {
    solve_spring(start, end, config)
        .last()
        .map(|(_, t)| *t)
        .unwrap_or(0.0)
}

impl<T> fmt::Debug for Animated<T>
where
    T: Clone + keyframe::CanTween + Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animated")
            .field("current_value", &self.current_value)
            .field("duration", &self.duration())
            .finish()
    }
}
