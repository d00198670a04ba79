//! Physical body and health bookkeeping shared by moveable entities.
//!
//! Coordinates are screen-like: y grows downward, but vertical velocity is
//! stored with up positive, so gravity integration reads
//! `pos.y -= vel_y * dt; vel_y -= GRAVITY * dt`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::{GRAVITY, HURT_WINDOW_TICKS};

/// Position, extent and vertical motion state of a moveable entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the drawn sprite
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical speed, up positive (px/s)
    pub vel_y: f32,
    /// Drawn mirrored when true; hitboxes never mirror
    pub facing_left: bool,
    /// Resting y for the top edge (bottom sits on the ground line)
    pub ground_y: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, ground_y: f32) -> Self {
        Self {
            pos,
            size,
            vel_y: 0.0,
            facing_left: false,
            ground_y,
        }
    }

    /// Sprite rectangle as drawn (and, for un-padded entities, the hitbox)
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn airborne(&self) -> bool {
        self.pos.y < self.ground_y
    }

    /// One gravity step. Airborne bodies (or bodies still rising) integrate;
    /// a body arriving at the ground with no upward speed left snaps exactly
    /// onto it so it can never sink or jitter below the ground line.
    ///
    /// `always_airborne` exempts projectiles from the snap so they fly a full
    /// parabola past level geometry.
    pub fn apply_gravity(&mut self, dt: f32, always_airborne: bool) {
        if always_airborne || self.airborne() || self.vel_y > 0.0 {
            self.pos.y -= self.vel_y * dt;
            self.vel_y -= GRAVITY * dt;
        }
        if !always_airborne && self.pos.y >= self.ground_y && self.vel_y <= 0.0 {
            self.pos.y = self.ground_y;
            self.vel_y = 0.0;
        }
    }

    /// Begin a jump with the given upward speed
    pub fn jump(&mut self, speed: f32) {
        self.vel_y = speed;
    }
}

/// Health pool with the hurt-cooldown timestamp
///
/// Health only decreases; the only reset is constructing a fresh entity on a
/// level switch. The 1-second hurt window drives both the hurt animation and
/// damage gating (callers check `is_hurt` before re-applying damage).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub health: u32,
    pub last_hit_tick: Option<u64>,
}

impl Vitals {
    pub fn full() -> Self {
        Self {
            health: 100,
            last_hit_tick: None,
        }
    }

    /// Apply damage and timestamp it. Saturates at zero.
    pub fn hit(&mut self, amount: u32, now: u64) {
        self.health = self.health.saturating_sub(amount);
        self.last_hit_tick = Some(now);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Within the hurt window of the most recent hit (and still alive)
    pub fn is_hurt(&self, now: u64) -> bool {
        !self.is_dead()
            && self
                .last_hit_tick
                .is_some_and(|t| now.saturating_sub(t) < HURT_WINDOW_TICKS)
    }
}
