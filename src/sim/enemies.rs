//! Walker enemies: the regular and small chickens.
//!
//! One struct with a closed kind enum instead of a subtype per species; the
//! per-kind differences are data (size, speed range). A stomp kills a walker
//! outright regardless of any health pool, so death is a soft-delete marker
//! plus a removal deadline - the corpse plays its death frame until the world
//! tick prunes it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::body::Body;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkerKind {
    Chicken,
    SmallChicken,
}

impl WalkerKind {
    pub fn size(&self) -> Vec2 {
        match self {
            WalkerKind::Chicken => CHICKEN_SIZE,
            WalkerKind::SmallChicken => SMALL_CHICKEN_SIZE,
        }
    }

    /// Walk speed range (px/s); small chickens scurry faster
    pub fn speed_range(&self) -> (f32, f32) {
        match self {
            WalkerKind::Chicken => (20.0, 45.0),
            WalkerKind::SmallChicken => (30.0, 65.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Walker {
    pub id: u32,
    pub kind: WalkerKind,
    pub body: Body,
    /// Leftward walk speed (px/s)
    pub speed: f32,
    /// Soft-delete marker; the walker stops acting but keeps rendering
    pub dead: bool,
    /// Tick at which the corpse leaves the level
    pub remove_at: Option<u64>,
    pub anim: Animation,
}

impl Walker {
    /// Spawn at a given x with a speed drawn from the kind's range
    pub fn spawn(id: u32, kind: WalkerKind, x: f32, rng: &mut Pcg32) -> Self {
        let size = kind.size();
        let (lo, hi) = kind.speed_range();
        let ground_y = GROUND_Y - size.y;
        Self {
            id,
            kind,
            body: Body::new(Vec2::new(x, ground_y), size, ground_y),
            speed: rng.random_range(lo..hi),
            dead: false,
            remove_at: None,
            anim: Animation::looping(3, 6),
        }
    }

    /// One tick of walking; corpses hold still
    pub fn step(&mut self, dt: f32) {
        if !self.dead {
            self.body.pos.x -= self.speed * dt;
            self.body.facing_left = false; // sprite strip already faces left
        }
        self.anim.advance();
    }

    /// A qualifying stomp landed on this walker
    pub fn kill(&mut self, now: u64) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.remove_at = Some(now + WALKER_REMOVE_DELAY_TICKS);
        self.anim = Animation::once(1, 1);
    }

    /// Corpse past its removal deadline
    pub fn due_for_removal(&self, now: u64) -> bool {
        self.remove_at.is_some_and(|t| now >= t)
    }
}
