//! Pulse rings around the promotional city markers.
//!
//! Each ring is driven frame by frame by its owner's timer queue. The loop
//! never ends on its own; it stops when its [`CancellationToken`] is
//! cancelled, which happens when the marker it decorates is torn down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::surface::{CircleStyle, Color, LayerId};
use crate::timers::Millis;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub base_radius: f64,
    pub base_fill_opacity: f64,
    pub weight: f64,
    /// Scale added per frame.
    pub scale_step: f64,
    /// Scale at which the ring snaps back to 1.0.
    pub max_scale: f64,
    pub frame_interval_ms: Millis,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            base_radius: 8.0,
            base_fill_opacity: 0.3,
            weight: 1.0,
            scale_step: 0.05,
            max_scale: 2.0,
            frame_interval_ms: 16,
        }
    }
}

impl PulseConfig {
    pub fn next_scale(&self, scale: f64) -> f64 {
        if scale >= self.max_scale {
            1.0
        } else {
            (scale + self.scale_step).min(self.max_scale)
        }
    }

    pub fn style_at(&self, scale: f64, color: Color) -> CircleStyle {
        CircleStyle {
            color,
            fill_color: color,
            fill_opacity: self.base_fill_opacity / scale,
            radius: self.base_radius * scale,
            weight: self.weight,
        }
    }
}

/// A running pulse ring.
#[derive(Debug, Clone)]
pub struct PulseAnimation {
    ring: LayerId,
    color: Color,
    scale: f64,
    token: CancellationToken,
}

impl PulseAnimation {
    pub fn new(ring: LayerId, color: Color) -> Self {
        Self {
            ring,
            color,
            scale: 1.0,
            token: CancellationToken::new(),
        }
    }

    pub fn ring(&self) -> LayerId {
        self.ring
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Handle that stops the animation when cancelled.
    pub fn handle(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Advance one frame. Returns the ring's new style, or `None` once cancelled.
    pub fn advance(&mut self, config: &PulseConfig) -> Option<CircleStyle> {
        if self.token.is_cancelled() {
            return None;
        }
        self.scale = config.next_scale(self.scale);
        Some(config.style_at(self.scale, self.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_cycles_between_one_and_two() {
        let config = PulseConfig::default();
        let mut scale = 1.0;
        let mut saw_max = false;
        let mut saw_reset = false;
        for _ in 0..100 {
            let next = config.next_scale(scale);
            assert!((1.0..=2.0).contains(&next), "scale {next}");
            if next == 2.0 {
                saw_max = true;
            }
            if scale == 2.0 {
                assert_eq!(next, 1.0);
                saw_reset = true;
            }
            scale = next;
        }
        assert!(saw_max && saw_reset);
    }

    #[test]
    fn opacity_shrinks_as_radius_grows() {
        let config = PulseConfig::default();
        let small = config.style_at(1.0, Color::GOLD);
        let large = config.style_at(2.0, Color::GOLD);
        assert_eq!(small.radius, 8.0);
        assert_eq!(large.radius, 16.0);
        assert!((small.fill_opacity - 0.3).abs() < 1e-12);
        assert!((large.fill_opacity - 0.15).abs() < 1e-12);
    }

    #[test]
    fn cancelled_animation_stops_producing_frames() {
        let config = PulseConfig::default();
        let mut pulse = PulseAnimation::new(LayerId(1), Color::GOLD);
        assert!(pulse.advance(&config).is_some());
        assert!((pulse.scale() - 1.05).abs() < 1e-12);

        pulse.handle().cancel();
        assert!(pulse.is_cancelled());
        assert!(pulse.advance(&config).is_none());
        assert!((pulse.scale() - 1.05).abs() < 1e-12);
    }
}
